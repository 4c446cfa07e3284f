//! The `chess` module implements the rules of play: piece movement, castling, en passant,
//! promotion, check and checkmate.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::ops;
use std::fmt;
use std::str::FromStr;
use std::convert::TryFrom;
use error::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which side a piece or player is on, based on the color of the pieces for that side.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The number of colors
    pub const COUNT: usize = 2;

    /// The direction pawns of this color advance in, as a change of row index. White moves
    /// toward row 0 (rank 8), black toward row 7 (rank 1).
    pub fn forward(self) -> isize {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// The row holding this color's king and rooks at the start of the game.
    pub fn back_row(self) -> usize {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// The row this color's pawns start on.
    pub fn pawn_row(self) -> usize {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// The row on which this color's pawns promote.
    pub fn promotion_row(self) -> usize {
        (!self).back_row()
    }
}

impl ops::Not for Color {
    type Output = Color;

    /// Returns the opposite color
    ///
    /// # Example
    /// ```
    /// use arbiter::chess::Color;
    /// assert_eq!(!Color::White, Color::Black);
    /// assert_eq!(!Color::Black, Color::White);
    /// ```
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => "White".fmt(f),
            Color::Black => "Black".fmt(f),
        }
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "w" | "white" => Ok(Color::White),
            "b" | "black" => Ok(Color::Black),
            _   => Err(ParseColorError),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::White
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The kind of a chess piece
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// The number of piece kinds
    pub const COUNT: usize = PieceKind::King as usize + 1;

    /// Returns `true` for the kinds a pawn may be promoted to.
    pub fn is_promotion_choice(self) -> bool {
        match self {
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight => true,
            PieceKind::Pawn | PieceKind::King => false,
        }
    }

    /// Returns the kind a pawn is promoted to when `choice` is requested. Anything that isn't a
    /// queen, rook, bishop or knight becomes a queen.
    pub fn promotion_or_queen(choice: Option<PieceKind>) -> PieceKind {
        match choice {
            Some(kind) if kind.is_promotion_choice() => kind,
            _ => PieceKind::Queen,
        }
    }

    /// The letter used for a piece of this kind and the given color: upper case for white,
    /// lower case for black.
    pub fn symbol(self, color: Color) -> char {
        let c = match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        };

        match color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    /// Inverse of [`symbol`](#method.symbol).
    pub fn from_symbol(c: char) -> Option<(PieceKind, Color)> {
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        let kind = match c.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            _ => return None,
        };

        Some((kind, color))
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => "P",
            PieceKind::Knight => "N",
            PieceKind::Bishop => "B",
            PieceKind::Rook => "R",
            PieceKind::Queen => "Q",
            PieceKind::King => "K",
        }.fmt(f)
    }
}

impl FromStr for PieceKind {
    type Err = ParsePieceKindError;

    /// Accepts the piece letter or the full name, in any case.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "p" | "pawn" => Ok(PieceKind::Pawn),
            "n" | "knight" => Ok(PieceKind::Knight),
            "b" | "bishop" => Ok(PieceKind::Bishop),
            "r" | "rook" => Ok(PieceKind::Rook),
            "q" | "queen" => Ok(PieceKind::Queen),
            "k" | "king" => Ok(PieceKind::King),
            _ => Err(ParsePieceKindError),
        }
    }
}

impl Default for PieceKind {
    fn default() -> Self {
        PieceKind::Pawn
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A specific square on the board.
///
/// Internally a square is a grid cell `(row, col)`: row 0 is rank 8 (black's back rank), row 7 is
/// rank 1, column 0 is file `a`. Externally it is written in algebraic form, such as `e2`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// The number of squares
    pub const COUNT: usize = 64;

    /// The number of rows (and of columns)
    pub const SIZE: usize = 8;

    /// Returns the square at grid cell `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSquare` if either index is outside `0..8`.
    pub fn new(row: usize, col: usize) -> Result<Square> {
        if row < Self::SIZE && col < Self::SIZE {
            Ok(Square { row: row as u8, col: col as u8 })
        } else {
            Err(Error::InvalidSquare)
        }
    }

    /// Returns the square's row index (0 = rank 8).
    pub fn row(self) -> usize {
        self.row as usize
    }

    /// Returns the square's column index (0 = file `a`).
    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Returns the square `drow` rows and `dcol` columns away, or `None` if that falls off the
    /// board.
    pub fn offset(self, drow: isize, dcol: isize) -> Option<Square> {
        let row = self.row as isize + drow;
        let col = self.col as isize + dcol;

        if row < 0 || col < 0 {
            return None;
        }
        Square::new(row as usize, col as usize).ok()
    }

    /// Returns an iterator over all 64 squares in row-major order, starting at `a8`.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::COUNT).map(|i| {
            Square { row: (i / Self::SIZE) as u8, col: (i % Self::SIZE) as u8 }
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        let rank = (b'8' - self.row) as char;
        format!("{}{}", file, rank).fmt(f)
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (row, col) = coord::to_grid(s)?;
        Square::new(row, col)
    }
}

impl TryFrom<(usize, usize)> for Square {
    type Error = Error;

    fn try_from((row, col): (usize, usize)) -> Result<Self> {
        Square::new(row, col)
    }
}

impl From<Square> for (usize, usize) {
    fn from(value: Square) -> Self {
        (value.row(), value.col())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod error;
pub mod coord;
pub mod board;
pub mod pieces;
pub mod attacks;
pub mod movegen;
pub mod game;

pub use board::{Board, Piece};
pub use pieces::{MoveKind, Illegal};
pub use game::{Game, BoardView, MoveOutcome, Status, DrawReason, new_game};
pub use error::{Error, Result};

#[cfg(test)]
mod color_tests {
    use super::Color;

    #[test]
    fn display_trait_works() {
        assert_eq!(format!("{}", Color::White), "White");
        assert_eq!(format!("{}", Color::Black), "Black");
    }

    #[test]
    fn fromstr_trait_works() {
        assert_eq!("w".parse::<Color>().unwrap(), Color::White);
        assert_eq!("Black".parse::<Color>().unwrap(), Color::Black);
        assert!("x".parse::<Color>().is_err());
    }

    #[test]
    fn default_is_white() {
        assert_eq!(Color::White, Default::default());
    }

    #[test]
    fn rows_mirror_each_other() {
        assert_eq!(Color::White.back_row(), 7);
        assert_eq!(Color::Black.back_row(), 0);
        assert_eq!(Color::White.pawn_row(), 6);
        assert_eq!(Color::Black.pawn_row(), 1);
        assert_eq!(Color::White.promotion_row(), 0);
        assert_eq!(Color::Black.promotion_row(), 7);
    }
}
