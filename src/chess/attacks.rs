//! Attack and check detection
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;
use super::pieces::path_is_clear;

use PieceKind::*;

/// Returns `true` if `piece` could capture an enemy piece standing on `target`.
///
/// This is the capturing pattern of each piece: pawns attack the two squares diagonally forward
/// (whether or not anything stands there), sliders need a clear line, and the king attacks its
/// eight neighbours without any regard for its own safety.
pub fn attacks(board: &Board, piece: &Piece, target: Square) -> bool {
    let from = piece.square();
    let drow = target.row() as isize - from.row() as isize;
    let dcol = target.col() as isize - from.col() as isize;
    let diagonal = drow != 0 && drow.abs() == dcol.abs();
    let straight = (drow == 0) != (dcol == 0);

    match piece.kind() {
        Pawn => drow == piece.color().forward() && dcol.abs() == 1,
        Knight => {
            match (drow.abs(), dcol.abs()) {
                (1, 2) | (2, 1) => true,
                _ => false,
            }
        },
        Bishop => diagonal && path_is_clear(board, from, target),
        Rook => straight && path_is_clear(board, from, target),
        Queen => (diagonal || straight) && path_is_clear(board, from, target),
        King => (drow != 0 || dcol != 0) && drow.abs() <= 1 && dcol.abs() <= 1,
    }
}

/// Returns `true` if `sq` is attacked by a piece of color `by`.
pub fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    board.pieces_of(by).any(|p| attacks(board, p, sq))
}

/// Returns the squares of all pieces of color `by` attacking `sq`.
pub fn attackers(board: &Board, sq: Square, by: Color) -> Vec<Square> {
    board.pieces_of(by)
        .filter(|p| attacks(board, p, sq))
        .map(|p| p.square())
        .collect()
}

/// Returns `true` if the king of color `c` is attacked. A board without that king is never in
/// check.
pub fn is_in_check(board: &Board, c: Color) -> bool {
    match board.king_square(c) {
        Some(sq) => is_square_attacked(board, sq, !c),
        None => false,
    }
}
