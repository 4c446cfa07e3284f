//! Defines the error types needed by the chess module
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use super::pieces::Illegal;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type used by methods in the `chess` module. Every variant is a recoverable rejection:
/// the game is left exactly as it was before the failed call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// Text is not a square name (a file `a`-`h` followed by a rank `1`-`8`), or grid indices
    /// are off the board
    InvalidSquare,
    /// There is no piece on the start square
    NoPieceAtSquare,
    /// The piece on the start square belongs to the side not on move
    NotYourTurn,
    /// The move breaks a movement rule
    IllegalMove(Illegal),
    /// A pawn is waiting to be promoted
    PromotionRequired,
    /// A promotion choice was given when no pawn is waiting to be promoted
    NoPromotionPending,
    /// The game has already ended
    GameOver,
    /// There is no draw offer to answer
    NoDrawOffer,
    /// Cannot parse a color
    ParseColor,
    /// Cannot parse a piece kind
    ParsePieceKind,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;

        match self {
            InvalidSquare => "invalid square".fmt(f),
            NoPieceAtSquare => "no piece at square".fmt(f),
            NotYourTurn => "not your turn".fmt(f),
            IllegalMove(reason) => format!("illegal move: {}", reason).fmt(f),
            PromotionRequired => "a promotion must be chosen first".fmt(f),
            NoPromotionPending => "no promotion is pending".fmt(f),
            GameOver => "the game is over".fmt(f),
            NoDrawOffer => "no draw has been offered".fmt(f),
            ParseColor => "cannot parse color".fmt(f),
            ParsePieceKind => "cannot parse piece kind".fmt(f),
        }
    }
}

impl std::error::Error for Error { }

impl From<Illegal> for Error {
    fn from(reason: Illegal) -> Self {
        Error::IllegalMove(reason)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error returned when parsing a `Color` fails
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseColorError;

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Error::ParseColor.fmt(f)
    }
}

impl std::error::Error for ParseColorError { }

impl From<ParseColorError> for Error {
    fn from(_: ParseColorError) -> Self {
        Error::ParseColor
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error returned when parsing a `PieceKind` fails
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParsePieceKindError;

impl fmt::Display for ParsePieceKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Error::ParsePieceKind.fmt(f)
    }
}

impl std::error::Error for ParsePieceKindError { }

impl From<ParsePieceKindError> for Error {
    fn from(_: ParsePieceKindError) -> Self {
        Error::ParsePieceKind
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Result type used by methods in the `chess` module
pub type Result<T> = std::result::Result<T, Error>;
