//! Legal move generation
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::result::Result;
use super::*;
use super::pieces::check_geometry;
use super::attacks::is_in_check;

/// Validates the move from `start` to `end`, returning its kind if it is fully legal.
///
/// The move must follow the piece's movement rules, and after playing it on a scratch copy of
/// `board` the mover's king must not be attacked. `board` itself is never modified.
pub fn validate(board: &Board, en_passant: Option<Square>,
                start: Square, end: Square) -> Result<MoveKind, Illegal> {
    let kind = check_geometry(board, en_passant, start, end)?;
    let color = match board.piece_at(start) {
        Some(piece) => piece.color(),
        None => return Err(Illegal::Unreachable),
    };

    let mut scratch = board.clone();
    scratch.apply(start, end, kind);
    if is_in_check(&scratch, color) {
        Err(Illegal::LeavesKingInCheck)
    } else {
        Ok(kind)
    }
}

/// Returns every square the piece on `sq` may legally move to, in row-major order from `a8`.
/// Returns an empty list if `sq` is empty.
pub fn legal_destinations(board: &Board, en_passant: Option<Square>, sq: Square) -> Vec<Square> {
    if board.is_empty(sq) {
        return Vec::new();
    }

    Square::all()
        .filter(|end| validate(board, en_passant, sq, *end).is_ok())
        .collect()
}

/// Returns every legal move `(start, end)` for the pieces of color `c`.
pub fn legal_moves(board: &Board, en_passant: Option<Square>, c: Color) -> Vec<(Square, Square)> {
    let mut moves = Vec::new();

    for piece in board.pieces_of(c) {
        let start = piece.square();
        for end in legal_destinations(board, en_passant, start) {
            moves.push((start, end));
        }
    }

    moves
}

/// Returns `true` if any piece of color `c` has a legal move.
pub fn has_legal_move(board: &Board, en_passant: Option<Square>, c: Color) -> bool {
    board.pieces_of(c).any(|piece| {
        let start = piece.square();
        Square::all().any(|end| validate(board, en_passant, start, end).is_ok())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use Color::*;

    fn sq(s: &str) -> Square {
        s.parse().expect("valid square")
    }

    fn squares(list: &[&str]) -> Vec<Square> {
        let mut v: Vec<Square> = list.iter().map(|s| sq(s)).collect();
        v.sort_by_key(|s| (s.row(), s.col()));
        v
    }

    fn board(diagram: &str) -> Board {
        diagram.parse().expect("valid board")
    }

    #[test]
    fn twenty_moves_from_the_start() {
        let b = Board::new();
        assert_eq!(legal_moves(&b, None, White).len(), 20);
        assert_eq!(legal_moves(&b, None, Black).len(), 20);
    }

    #[test]
    fn knight_and_pawn_destinations_at_the_start() {
        let b = Board::new();
        assert_eq!(legal_destinations(&b, None, sq("g1")), squares(&["f3", "h3"]));
        assert_eq!(legal_destinations(&b, None, sq("e2")), squares(&["e3", "e4"]));
        assert!(legal_destinations(&b, None, sq("a1")).is_empty());
        assert!(legal_destinations(&b, None, sq("e4")).is_empty());
    }

    #[test]
    fn no_destination_holds_an_own_piece() {
        let b = Board::new();
        for piece in b.pieces() {
            for end in legal_destinations(&b, None, piece.square()) {
                assert!(!b.is_occupied_by(end, piece.color()));
            }
        }
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        let b = board("\
            . . . . k . . .\n\
            . . . . r . . .\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . . B . . .\n\
            . . . . K . . .\n");
        assert_eq!(validate(&b, None, sq("e2"), sq("d3")), Err(Illegal::LeavesKingInCheck));
        assert!(legal_destinations(&b, None, sq("e2")).is_empty());
    }

    #[test]
    fn in_check_only_escapes_are_legal() {
        let b = board("\
            . . . . k . . .\n\
            . . . . r . . .\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . . K . . R\n");
        let moves = legal_moves(&b, None, White);
        // the rook can't reach the e-file, and castling out of check is illegal
        assert!(moves.iter().all(|(start, _)| *start == sq("e1")));
        assert_eq!(legal_destinations(&b, None, sq("e1")),
            squares(&["d1", "f1", "d2", "f2"]));
    }

    #[test]
    fn block_and_capture_escape_check() {
        let b = board("\
            . . . . k . . .\n\
            . . . . r . . .\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . R . . . .\n\
            . . . . K . . .\n");
        assert_eq!(validate(&b, None, sq("d2"), sq("e2")), Ok(MoveKind::Standard));
        assert_eq!(validate(&b, None, sq("d2"), sq("d3")), Err(Illegal::LeavesKingInCheck));
    }

    #[test]
    fn en_passant_that_exposes_the_king_is_illegal() {
        let b = board("\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            K . . p P . . r\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . . . . . k\n");
        assert_eq!(validate(&b, Some(sq("d6")), sq("e5"), sq("d6")),
            Err(Illegal::LeavesKingInCheck));
    }

    #[test]
    fn validation_leaves_the_board_untouched() {
        let b = Board::new();
        let before = b.clone();
        let _ = validate(&b, None, sq("e2"), sq("e4"));
        let _ = legal_moves(&b, None, White);
        assert_eq!(b, before);
    }

    #[test]
    fn no_moves_when_mated() {
        let b = board("\
            . . . . . . . k\n\
            . . . . . . Q .\n\
            . . . . . K . .\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . . . . . .\n");
        assert!(is_in_check(&b, Black));
        assert!(!has_legal_move(&b, None, Black));
        assert!(has_legal_move(&b, None, White));
    }
}
