//! A text session that lets two players share one game over any line-oriented input and output
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::io::{self, BufRead, Write};
use log::{debug, info, error};
use crate::chess::{self, Game, MoveOutcome};
use crate::config::DisplaySettings;
use super::text::{Command, Response};

const NOT_A_PROMOTION: &str = "move does not promote a pawn";

/// Runs a game between two players typing commands on the same input.
///
/// All input and output is logged using the log crate (assuming a logger is set up).
#[derive(Debug)]
pub struct Session<R, W> {
    input: R,
    output: W,
    game: Game,
    display: DisplaySettings,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session with a new game.
    pub fn new(input: R, output: W, display: DisplaySettings) -> Self {
        Session {
            input,
            output,
            game: Game::new(),
            display,
        }
    }

    /// Returns the game being played
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the output, consuming the session.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads and carries out commands until `quit` or the end of the input.
    pub fn run(&mut self) -> io::Result<()> {
        self.show_board()?;
        self.send(Response::Prompt(self.game.turn()))?;

        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                debug!("end of input");
                break;
            }

            let line = line.trim();
            info!("<client>: {}", line);
            if line.is_empty() {
                continue;
            }
            if !self.execute(line)? {
                break;
            }
        }

        self.output.flush()
    }

    /// Carries out a single command line. Returns `false` if the session should end.
    pub fn execute(&mut self, line: &str) -> io::Result<bool> {
        use Command::*;

        let cmd = match line.parse::<Command>() {
            Ok(cmd) => cmd,
            Err(err) => {
                self.send(Response::ErrorMessage(line.to_string(), err.to_string()))?;
                return Ok(true);
            },
        };

        match cmd {
            Move { start, end, promotion } => {
                // played on a copy so a stray promotion letter leaves the game untouched
                let mut next = self.game.clone();
                let result = match (next.attempt_move(start, end), promotion) {
                    (Ok(MoveOutcome::PromotionPending(_)), Some(kind)) => {
                        next.resolve_promotion(kind)
                    },
                    (Ok(_), Some(_)) => {
                        let msg = NOT_A_PROMOTION.to_string();
                        self.send(Response::ErrorMessage(line.to_string(), msg))?;
                        return Ok(true);
                    },
                    (result, None) | (result @ Err(_), _) => result,
                };
                if result.is_ok() {
                    self.game = next;
                }
                self.report(line, result)?;
            },
            Promote(choice) => {
                let result = self.game.resolve_promotion_str(&choice);
                self.report(line, result)?;
            },
            Moves(sq) => {
                let list = self.game.legal_destinations(sq);
                self.send(Response::Destinations(sq, list))?;
            },
            Board => {
                self.write_board()?;
            },
            Draw => {
                let by = self.game.turn();
                match self.game.offer_draw(by) {
                    Ok(()) => self.send(Response::DrawOffered(by))?,
                    Err(err) => self.reject(line, err)?,
                }
            },
            Accept => {
                let by = self.answering_side();
                match self.game.accept_draw(by) {
                    Ok(()) => self.send(Response::GameOver(self.game.status()))?,
                    Err(err) => self.reject(line, err)?,
                }
            },
            Reject => {
                let by = self.answering_side();
                match self.game.decline_draw(by) {
                    Ok(()) => self.send(Response::DrawDeclined(by))?,
                    Err(err) => self.reject(line, err)?,
                }
            },
            Resign => {
                let by = self.game.turn();
                match self.game.resign(by) {
                    Ok(()) => self.send(Response::GameOver(self.game.status()))?,
                    Err(err) => self.reject(line, err)?,
                }
            },
            New => {
                self.game = Game::new();
                self.send(Response::NewGame)?;
                self.show_board()?;
                self.send(Response::Prompt(self.game.turn()))?;
            },
            Help => {
                self.send(Response::Help)?;
            },
            Quit => {
                return Ok(false);
            },
        }

        Ok(true)
    }

    /// The player answering a draw offer is the opponent of the one who made it.
    fn answering_side(&self) -> chess::Color {
        match self.game.draw_offer() {
            Some(offered_by) => !offered_by,
            None => self.game.turn(),
        }
    }

    fn report(&mut self, line: &str, result: chess::Result<MoveOutcome>) -> io::Result<()> {
        match result {
            Ok(outcome) => {
                self.send(Response::Outcome(outcome))?;
                self.show_board()?;
                if !self.game.is_over() && self.game.pending_promotion().is_none() {
                    self.send(Response::Prompt(self.game.turn()))?;
                }
                Ok(())
            },
            Err(err) => self.reject(line, err),
        }
    }

    fn reject(&mut self, line: &str, err: chess::Error) -> io::Result<()> {
        match err {
            chess::Error::IllegalMove(reason) => {
                debug!("illegal move {} ({})", line, reason);
                self.send(Response::IllegalMove(line.to_string(), Some(reason.to_string())))
            },
            _ => self.send(Response::ErrorMessage(line.to_string(), err.to_string())),
        }
    }

    fn show_board(&mut self) -> io::Result<()> {
        if self.display.show_board {
            self.write_board()
        } else {
            Ok(())
        }
    }

    fn write_board(&mut self) -> io::Result<()> {
        let view = self.game.snapshot();
        let result = if self.display.coordinates {
            write!(self.output, "{}", view)
        } else {
            write!(self.output, "{:#}", view)
        };

        result.map_err(|err| {
            error!("io error: {}", err);
            err
        })
    }

    /// Sends a response to the players.
    fn send(&mut self, response: Response) -> io::Result<()> {
        let s = response.to_string();
        info!("<arbiter>: {}", s);
        writeln!(self.output, "{}", s).map_err(|err| {
            error!("io error: {}", err);
            err
        })
    }
}
