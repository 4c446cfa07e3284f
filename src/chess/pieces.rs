//! Movement rules for each kind of piece
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::result::Result;
use super::*;
use super::attacks::is_square_attacked;

use PieceKind::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The kind of a move, which determines what happens on the board besides the moving piece
/// changing squares.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveKind {
    /// A normal move or capture
    Standard,
    /// A pawn advancing two squares from its starting rank
    DoubleStep,
    /// A pawn capturing en passant. The captured pawn stands on `captured`, beside the
    /// moving pawn's start square.
    EnPassant {
        /// Square of the pawn being captured
        captured: Square,
    },
    /// The king moving two squares toward a rook, which jumps over it
    Castle {
        /// The rook's starting square
        rook_from: Square,
        /// The rook's destination
        rook_to: Square,
    },
    /// A pawn reaching the far rank (with or without a capture)
    Promotion,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Why a move is illegal
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Illegal {
    /// The piece doesn't move that way
    Unreachable,
    /// The destination holds a piece of the mover's own color
    OwnPiece,
    /// A piece stands in the way
    PathBlocked,
    /// The king would move onto an attacked square
    KingMovesIntoCheck,
    /// The king or the rook has already moved, or the rook is gone
    CastlingRightsLost,
    /// The king would castle out of, through, or into check
    CastlingThroughCheck,
    /// The move would leave the mover's king in check
    LeavesKingInCheck,
}

impl fmt::Display for Illegal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Illegal::*;

        match self {
            Unreachable => "piece cannot move there",
            OwnPiece => "square is occupied by own piece",
            PathBlocked => "path is blocked",
            KingMovesIntoCheck => "king cannot move into check",
            CastlingRightsLost => "king or rook has already moved",
            CastlingThroughCheck => "attempt to castle through check",
            LeavesKingInCheck => "king would be left in check",
        }.fmt(f)
    }
}

/// Returns `true` if the piece on `start` may move to `end` by its own movement rules, without
/// regard to whether the move exposes its own king.
pub fn is_geometrically_legal(board: &Board, en_passant: Option<Square>,
                              start: Square, end: Square) -> bool {
    check_geometry(board, en_passant, start, end).is_ok()
}

/// Checks the movement rules for the piece on `start` moving to `end`, returning the kind of
/// move if it is allowed.
///
/// `en_passant` is the square a pawn passed over on the previous move, if any. The check that the
/// move doesn't leave the mover's own king in check is made separately, by
/// [`movegen::validate`](../movegen/fn.validate.html). The king is the exception: it may never step
/// onto an attacked square, so that is checked here too.
pub fn check_geometry(board: &Board, en_passant: Option<Square>,
                      start: Square, end: Square) -> Result<MoveKind, Illegal> {
    let piece = match board.piece_at(start) {
        Some(piece) => *piece,
        None => return Err(Illegal::Unreachable),
    };
    if start == end {
        return Err(Illegal::Unreachable);
    }
    if board.is_occupied_by(end, piece.color()) {
        return Err(Illegal::OwnPiece);
    }

    let drow = end.row() as isize - start.row() as isize;
    let dcol = end.col() as isize - start.col() as isize;

    match piece.kind() {
        Pawn => pawn_move(board, en_passant, &piece, end, drow, dcol),
        Knight => {
            match (drow.abs(), dcol.abs()) {
                (1, 2) | (2, 1) => Ok(MoveKind::Standard),
                _ => Err(Illegal::Unreachable),
            }
        },
        Bishop => {
            if drow.abs() != dcol.abs() {
                return Err(Illegal::Unreachable);
            }
            slide(board, start, end)
        },
        Rook => {
            if drow != 0 && dcol != 0 {
                return Err(Illegal::Unreachable);
            }
            slide(board, start, end)
        },
        Queen => {
            if drow != 0 && dcol != 0 && drow.abs() != dcol.abs() {
                return Err(Illegal::Unreachable);
            }
            slide(board, start, end)
        },
        King => {
            if drow == 0 && dcol.abs() == 2 {
                return castle(board, &piece, dcol);
            }
            if drow.abs() > 1 || dcol.abs() > 1 {
                return Err(Illegal::Unreachable);
            }
            if king_attacked_at(board, &piece, end) {
                return Err(Illegal::KingMovesIntoCheck);
            }
            Ok(MoveKind::Standard)
        },
    }
}

/// Returns `true` if the squares strictly between `start` and `end` on a straight or diagonal
/// line are all empty. `start` and `end` must share a row, column or diagonal.
pub(crate) fn path_is_clear(board: &Board, start: Square, end: Square) -> bool {
    let drow = end.row() as isize - start.row() as isize;
    let dcol = end.col() as isize - start.col() as isize;
    let steps = drow.abs().max(dcol.abs());
    let (srow, scol) = (drow.signum(), dcol.signum());

    (1..steps).all(|i| {
        start.offset(srow * i, scol * i).map_or(false, |sq| board.is_empty(sq))
    })
}

fn slide(board: &Board, start: Square, end: Square) -> Result<MoveKind, Illegal> {
    if path_is_clear(board, start, end) {
        Ok(MoveKind::Standard)
    } else {
        Err(Illegal::PathBlocked)
    }
}

fn pawn_move(board: &Board, en_passant: Option<Square>, pawn: &Piece, end: Square,
             drow: isize, dcol: isize) -> Result<MoveKind, Illegal> {
    let color = pawn.color();
    let forward = color.forward();
    let start = pawn.square();
    let arrive = if end.row() == color.promotion_row() {
        MoveKind::Promotion
    } else {
        MoveKind::Standard
    };

    if dcol == 0 {
        if drow == forward {
            return if board.is_empty(end) { Ok(arrive) } else { Err(Illegal::PathBlocked) };
        }
        if drow == 2 * forward && start.row() == color.pawn_row() {
            let passed = start.offset(forward, 0).ok_or(Illegal::Unreachable)?;
            return if board.is_empty(passed) && board.is_empty(end) {
                Ok(MoveKind::DoubleStep)
            } else {
                Err(Illegal::PathBlocked)
            };
        }
        return Err(Illegal::Unreachable);
    }

    if dcol.abs() == 1 && drow == forward {
        if board.is_occupied_by(end, !color) {
            return Ok(arrive);
        }
        if en_passant == Some(end) {
            let captured = start.offset(0, dcol).ok_or(Illegal::Unreachable)?;
            let victim = board.piece_at(captured);
            if victim.map_or(false, |p| p.kind() == Pawn && p.color() != color) {
                return Ok(MoveKind::EnPassant { captured });
            }
        }
    }

    Err(Illegal::Unreachable)
}

fn castle(board: &Board, king: &Piece, dcol: isize) -> Result<MoveKind, Illegal> {
    let color = king.color();
    let start = king.square();
    if king.has_moved() || start.row() != color.back_row() {
        return Err(Illegal::CastlingRightsLost);
    }

    let dir = dcol.signum();
    let rook_col = if dir > 0 { Square::SIZE - 1 } else { 0 };
    let rook_from = Square::new(start.row(), rook_col).map_err(|_| Illegal::Unreachable)?;
    match board.piece_at(rook_from) {
        Some(rook) if rook.kind() == Rook && rook.color() == color && !rook.has_moved() => {},
        _ => return Err(Illegal::CastlingRightsLost),
    }

    if !path_is_clear(board, start, rook_from) {
        return Err(Illegal::PathBlocked);
    }

    for step in 0..=2 {
        let sq = start.offset(0, dir * step).ok_or(Illegal::Unreachable)?;
        if king_attacked_at(board, king, sq) {
            return Err(Illegal::CastlingThroughCheck);
        }
    }

    let rook_to = start.offset(0, dir).ok_or(Illegal::Unreachable)?;
    Ok(MoveKind::Castle { rook_from, rook_to })
}

/// Returns `true` if `king` would be attacked standing on `sq`, with the king lifted off its
/// current square so it can't shield the squares behind it.
fn king_attacked_at(board: &Board, king: &Piece, sq: Square) -> bool {
    let mut scratch = board.clone();
    scratch.remove(king.square());
    scratch.place(Piece::new(King, king.color(), sq));
    is_square_attacked(&scratch, sq, !king.color())
}
