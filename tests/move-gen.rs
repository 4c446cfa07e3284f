//! Tests the legal move generator by counting the variations from well known positions
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////

mod move_gen {
    use arbiter::chess::{movegen, Game, Color, MoveOutcome, PieceKind};

    const PROMOTIONS: [PieceKind; 4] =
        [PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight];

    /// Counts the leaf nodes of the game tree to the given depth. Each promotion choice is a
    /// separate variation.
    fn count(game: &Game, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        if game.is_over() {
            return 0;
        }

        let mut total = 0;
        for (start, end) in movegen::legal_moves(game.board(), game.en_passant(), game.turn()) {
            let mut next = game.clone();
            match next.attempt_move(start, end).expect("generated moves are legal") {
                MoveOutcome::PromotionPending(_) => {
                    for kind in PROMOTIONS.iter() {
                        let mut promoted = next.clone();
                        promoted.resolve_promotion(*kind).expect("promotion is pending");
                        total += count(&promoted, depth - 1);
                    }
                },
                _ => total += count(&next, depth - 1),
            }
        }
        total
    }

    fn game(diagram: &str) -> Game {
        Game::from_board(diagram.parse().expect("valid board"), Color::White)
    }

    mod starting_position {
        use super::*;

        #[test]
        fn depth_1() { assert_eq!(count(&Game::new(), 1), 20); }

        #[test]
        fn depth_2() { assert_eq!(count(&Game::new(), 2), 400); }

        #[test]
        fn depth_3() { assert_eq!(count(&Game::new(), 3), 8902); }
    }

    mod kiwipete {
        use super::*;

        const POSITION: &str = "\
            r . . . k . . r\n\
            p . p p q p b .\n\
            b n . . p n p .\n\
            . . . P N . . .\n\
            . p . . P . . .\n\
            . . N . . Q . p\n\
            P P P B B P P P\n\
            R . . . K . . R\n";

        #[test]
        fn depth_1() { assert_eq!(count(&game(POSITION), 1), 48); }

        #[test]
        fn depth_2() { assert_eq!(count(&game(POSITION), 2), 2039); }
    }

    #[test]
    fn king_and_rook() {
        let position = "\
            . . . . k . . .\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . . K . . R\n";
        assert_eq!(count(&game(position), 1), 15);
        assert_eq!(count(&game(position), 2), 66);
    }
}
