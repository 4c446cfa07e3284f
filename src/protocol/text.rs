//! Commands and responses of the line-oriented text protocol
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::str::FromStr;
use lazy_static::lazy_static;
use regex::{RegexSet, Regex};
use crate::chess::{self, Color, PieceKind, Square, MoveOutcome, Status};
use crate::chess::error::ParsePieceKindError;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Commands typed by the players
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Moves a piece, optionally naming the promotion piece.
    ///
    /// ```text
    /// e2 e4
    /// e2e4
    /// e2-e4
    /// e7e8q
    /// ```
    Move {
        /// The square moved from
        start: Square,
        /// The square moved to
        end: Square,
        /// The piece to promote to. Only allowed on a move that promotes a pawn.
        promotion: Option<PieceKind>,
    },

    /// Chooses the piece for a pending promotion.
    ///
    /// ```text
    /// q
    /// promote rook
    /// ```
    ///
    /// An unrecognized choice is promoted to a queen.
    Promote(String),

    /// Lists the squares the piece on a square can move to.
    ///
    /// ```text
    /// moves e2
    /// ```
    Moves(Square),

    /// Prints the board.
    ///
    /// ```text
    /// board
    /// ```
    Board,

    /// The side to move offers a draw.
    ///
    /// ```text
    /// draw
    /// ```
    Draw,

    /// Accepts a draw offer.
    ///
    /// ```text
    /// accept
    /// ```
    Accept,

    /// Declines a draw offer.
    ///
    /// ```text
    /// reject
    /// ```
    Reject,

    /// The side to move resigns.
    ///
    /// ```text
    /// resign
    /// ```
    Resign,

    /// Starts a new game.
    ///
    /// ```text
    /// new
    /// ```
    New,

    /// Lists the commands.
    ///
    /// ```text
    /// help
    /// ```
    Help,

    /// Ends the session.
    ///
    /// ```text
    /// quit
    /// ```
    Quit,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Command::*;

        match self {
            Move { start, end, promotion: Some(kind) } =>
                format!("{}{}{}", start, end, kind.symbol(Color::Black)).fmt(f),
            Move { start, end, promotion: None } => format!("{}{}", start, end).fmt(f),
            Promote(choice) => format!("promote {}", choice).fmt(f),
            Moves(sq) => format!("moves {}", sq).fmt(f),
            Board => "board".fmt(f),
            Draw => "draw".fmt(f),
            Accept => "accept".fmt(f),
            Reject => "reject".fmt(f),
            Resign => "resign".fmt(f),
            New => "new".fmt(f),
            Help => "help".fmt(f),
            Quit => "quit".fmt(f),
        }
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, ParseCommandError> {
        use Command::*;

        let s = s.trim().to_lowercase();
        if let Some(ind) = COMMAND_SET.matches(&s).iter().next() {
            let args = COMMAND_VEC[ind].captures(&s).expect("INFALLIBLE");

            match ind {
                0 => {
                    let start = args.get(1).expect("INFALLIBLE").as_str().parse()?;
                    let end = args.get(2).expect("INFALLIBLE").as_str().parse()?;
                    let promotion = if let Some(choice) = args.get(3) {
                        Some(choice.as_str().parse()?)
                    } else {
                        None
                    };

                    Ok(Move { start, end, promotion })
                },
                1 | 2 => Ok(Promote(args.get(1).expect("INFALLIBLE").as_str().to_string())),
                3 => Ok(Moves(args.get(1).expect("INFALLIBLE").as_str().parse()?)),
                4 => Ok(Board),
                5 => Ok(Draw),
                6 => Ok(Accept),
                7 => Ok(Reject),
                8 => Ok(Resign),
                9 => Ok(New),
                10 => Ok(Help),
                11 => Ok(Quit),
                _ => unreachable!(),
            }
        } else {
            Err(ParseCommandError)
        }
    }
}

const COMMANDS: [&str; 12] = [
    r"^([a-h][1-8])(?:\s+|-)?([a-h][1-8])(?:\s*([qrbn]))?$",
    r"^(q|r|b|n|queen|rook|bishop|knight)$",
    r"^promote\s+(\w+)$",
    r"^moves\s+([a-h][1-8])$",
    r"^board$",
    r"^draw$",
    r"^accept$",
    r"^(?:reject|decline)$",
    r"^resign$",
    r"^new$",
    r"^(?:help|\?)$",
    r"^(?:quit|exit)$",
];

lazy_static! {
    static ref COMMAND_SET: RegexSet = RegexSet::new(&COMMANDS).expect("INFALLIBLE");
    static ref COMMAND_VEC: Vec<Regex> = {
        let mut cmd_vec = Vec::new();
        for cmd in &COMMANDS {
            cmd_vec.push(Regex::new(cmd).expect("INFALLIBLE"));
        }
        cmd_vec
    };
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error returned when a line isn't a known command
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseCommandError;

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "unknown or incorrectly formatted command".fmt(f)
    }
}

impl std::error::Error for ParseCommandError { }

impl From<chess::Error> for ParseCommandError {
    fn from(_: chess::Error) -> Self {
        ParseCommandError
    }
}

impl From<ParsePieceKindError> for ParseCommandError {
    fn from(_: ParsePieceKindError) -> Self {
        ParseCommandError
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Responses written back to the players
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// The result of a move or promotion.
    ///
    /// ```text
    /// ok
    /// check
    /// checkmate, White wins
    /// ```
    Outcome(MoveOutcome),

    /// The squares a piece can move to.
    ///
    /// ```text
    /// e2: e3 e4
    /// ```
    Destinations(Square, Vec<Square>),

    /// A move was rejected as illegal.
    ///
    /// ```text
    /// Illegal move [(REASON)]: MOVE
    /// ```
    IllegalMove(String, Option<String>),

    /// A command couldn't be carried out.
    ///
    /// ```text
    /// Error (ERRORTYPE): COMMAND
    /// ```
    ErrorMessage(String, String),

    /// A player offered a draw.
    DrawOffered(Color),

    /// A player declined a draw offer.
    DrawDeclined(Color),

    /// The game ended other than by a move.
    ///
    /// ```text
    /// draw by agreement
    /// Black resigns, White wins
    /// ```
    GameOver(Status),

    /// A new game started.
    NewGame,

    /// Whose turn it is.
    ///
    /// ```text
    /// White to move
    /// ```
    Prompt(Color),

    /// The list of commands.
    Help,
}

const HELP: &str = "\
commands:
  e2 e4        move a piece (also e2e4 or e2-e4; e7e8q promotes to a queen)
  q|r|b|n      choose the piece for a pending promotion
  moves e2     list the squares a piece can move to
  board        print the board
  draw         offer a draw
  accept       accept a draw offer
  reject       decline a draw offer
  resign       resign the game
  new          start a new game
  quit         end the session";

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Response::*;

        match self {
            Outcome(outcome) => outcome.fmt(f),
            Destinations(sq, list) if list.is_empty() => format!("{}: none", sq).fmt(f),
            Destinations(sq, list) => {
                let mut s = format!("{}:", sq);
                for dest in list {
                    s += &format!(" {}", dest);
                }
                s.fmt(f)
            },
            IllegalMove(mov, Some(reason)) => format!("Illegal move ({}): {}", reason, mov).fmt(f),
            IllegalMove(mov, None) => format!("Illegal move: {}", mov).fmt(f),
            ErrorMessage(cmd, err_type) => format!("Error ({}): {}", err_type, cmd).fmt(f),
            DrawOffered(c) => format!("{} offers a draw (accept or reject)", c).fmt(f),
            DrawDeclined(c) => format!("{} declines the draw", c).fmt(f),
            GameOver(status) => status.fmt(f),
            NewGame => "new game".fmt(f),
            Prompt(c) => format!("{} to move", c).fmt(f),
            Help => HELP.fmt(f),
        }
    }
}
