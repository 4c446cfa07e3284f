//! Module to implement a chess game
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use log::{debug, info, warn, error};
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Why a game ended in a draw
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawReason {
    /// The side to move has no legal move but is not in check
    Stalemate,
    /// Both players agreed to a draw
    Agreement,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The state of a game
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    /// Waiting for the side to move, who is not in check
    InProgress,
    /// Waiting for the side to move, whose king is in check
    Check(Color),
    /// A pawn on the given square is waiting to be promoted
    PromotionPending(Square),
    /// The game ended in checkmate
    Checkmate {
        /// The side that delivered mate
        winner: Color,
    },
    /// The game ended in a draw
    Draw(DrawReason),
    /// The game ended by resignation
    Resigned {
        /// The side that did not resign
        winner: Color,
    },
}

impl Status {
    /// Returns `true` once the game has ended.
    pub fn is_over(&self) -> bool {
        match self {
            Status::Checkmate { .. } | Status::Draw(_) | Status::Resigned { .. } => true,
            Status::InProgress | Status::Check(_) | Status::PromotionPending(_) => false,
        }
    }

    /// Returns the winner, if the game has ended with one.
    pub fn winner(&self) -> Option<Color> {
        match self {
            Status::Checkmate { winner } | Status::Resigned { winner } => Some(*winner),
            _ => None,
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::InProgress
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Status::*;

        match self {
            InProgress => "in progress".to_string(),
            Check(c) => format!("{} is in check", c),
            PromotionPending(sq) => format!("pawn on {} awaits promotion", sq),
            Checkmate { winner } => format!("checkmate, {} wins", winner),
            Draw(DrawReason::Stalemate) => "draw by stalemate".to_string(),
            Draw(DrawReason::Agreement) => "draw by agreement".to_string(),
            Resigned { winner } => format!("{} resigns, {} wins", !*winner, winner),
        }.fmt(f)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The result of a successful move or promotion. Rejections are returned as `Err`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was played and the opponent is not in check
    Applied,
    /// The move was played and the king of the given color is in check
    AppliedWithCheck(Color),
    /// The move was played and the king of the given color is checkmated
    AppliedWithCheckmate(Color),
    /// The move was played and the opponent has no legal move, but is not in check
    AppliedWithStalemate,
    /// A pawn reached the far rank on the given square. The move isn't complete until
    /// [`Game::resolve_promotion`](struct.Game.html#method.resolve_promotion) is called.
    PromotionPending(Square),
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use MoveOutcome::*;

        match self {
            Applied => "ok".to_string(),
            AppliedWithCheck(_) => "check".to_string(),
            AppliedWithCheckmate(c) => format!("checkmate, {} wins", !*c),
            AppliedWithStalemate => "stalemate".to_string(),
            PromotionPending(sq) => format!("promote pawn on {} (q, r, b or n)", sq),
        }.fmt(f)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A read-only picture of a game, for rendering.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BoardView {
    /// The kind and color of the piece on each square, indexed `[row][col]` with row 0 = rank 8
    pub squares: [[Option<(PieceKind, Color)>; Square::SIZE]; Square::SIZE],
    /// The side to move
    pub turn: Color,
    /// The state of the game
    pub status: Status,
    /// `true` if the side to move is in check
    pub in_check: bool,
}

impl BoardView {
    /// Returns the kind and color of the piece on `sq`, if any.
    pub fn at(&self, sq: Square) -> Option<(PieceKind, Color)> {
        self.squares[sq.row()][sq.col()]
    }
}

impl fmt::Display for BoardView {
    /// Same layout as [`Board`](../board/struct.Board.html)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = !f.alternate();
        Board::write_grid(f, labels, |sq| self.at(sq).map(|(kind, color)| kind.symbol(color)))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A chess game: the board together with whose turn it is, the en passant target, any pending
/// promotion, and how the game stands.
///
/// Every operation either succeeds completely or returns an error and leaves the game exactly as
/// it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    turn: Color,
    en_passant: Option<Square>,
    pending_promotion: Option<Square>,
    status: Status,
    captured: Vec<Piece>,
    draw_offer: Option<Color>,
}

/// Creates a new game from the standard starting position, with white to move.
pub fn new_game() -> Game {
    Game::new()
}

impl Game {
    /// Creates a new game from the standard starting position
    pub fn new() -> Self {
        Game::from_board(Board::new(), Color::White)
    }

    /// Creates a new game from `board` with `turn` to move. Castling rights follow from the
    /// `has_moved` flags of the kings and rooks, and no en passant capture is available. A board
    /// where `turn` is already mated or stalemated gives a game that is over.
    pub fn from_board(board: Board, turn: Color) -> Self {
        let status = classify(&board, None, turn);

        Game {
            board,
            turn,
            en_passant: None,
            pending_promotion: None,
            status,
            captured: Vec::new(),
            draw_offer: None,
        }
    }

    /// Returns the color whose turn it is
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the state of the game
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns `true` once the game has ended.
    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Returns the square a pawn passed over on the previous move, where it may be captured en
    /// passant on this move only.
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Returns the square of the pawn waiting to be promoted, if any
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    /// Returns the board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the pieces captured so far, in the order they were taken
    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    /// Returns the color of the player with an outstanding draw offer, if any
    pub fn draw_offer(&self) -> Option<Color> {
        self.draw_offer
    }

    /// Returns a read-only picture of the game for rendering.
    pub fn snapshot(&self) -> BoardView {
        let mut squares = [[None; Square::SIZE]; Square::SIZE];
        for p in self.board.pieces() {
            squares[p.square().row()][p.square().col()] = Some((p.kind(), p.color()));
        }

        BoardView {
            squares,
            turn: self.turn,
            status: self.status,
            in_check: attacks::is_in_check(&self.board, self.turn),
        }
    }

    /// Returns every square the piece on `sq` may move to. The list is empty if `sq` is empty,
    /// holds a piece of the side not on move, or if the game is over or waiting for a promotion.
    pub fn legal_destinations(&self, sq: Square) -> Vec<Square> {
        if self.is_over() || self.pending_promotion.is_some()
            || !self.board.is_occupied_by(sq, self.turn) {
            return Vec::new();
        }

        movegen::legal_destinations(&self.board, self.en_passant, sq)
    }

    /// Same as [`legal_destinations`](#method.legal_destinations), with the square given in
    /// algebraic form.
    pub fn legal_destinations_str(&self, sq: &str) -> Result<Vec<Square>> {
        Ok(self.legal_destinations(sq.parse()?))
    }

    /// Plays the move from `start` to `end` for the side on move.
    ///
    /// If a pawn reaches the far rank, returns `MoveOutcome::PromotionPending` and the turn
    /// doesn't pass until [`resolve_promotion`](#method.resolve_promotion) is called.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the game unchanged, if the game is over, a promotion is pending,
    /// `start` is empty or holds a piece of the wrong color, or the move is illegal.
    ///
    /// # Panics
    ///
    /// Panics if the mover's own king is in check after the move has been committed. That can
    /// only happen through a bug in move validation.
    pub fn attempt_move(&mut self, start: Square, end: Square) -> Result<MoveOutcome> {
        self.ensure_in_play()?;
        if self.pending_promotion.is_some() {
            return Err(Error::PromotionRequired);
        }

        let mover = match self.board.piece_at(start) {
            Some(piece) => piece.color(),
            None => return Err(Error::NoPieceAtSquare),
        };
        if mover != self.turn {
            return Err(Error::NotYourTurn);
        }

        let kind = movegen::validate(&self.board, self.en_passant, start, end).map_err(|reason| {
            debug!("illegal move {}{} ({})", start, end, reason);
            Error::IllegalMove(reason)
        })?;

        if let Some(piece) = self.board.apply(start, end, kind) {
            self.captured.push(piece);
        }
        self.en_passant = match kind {
            MoveKind::DoubleStep => start.offset(mover.forward(), 0),
            _ => None,
        };
        if self.draw_offer == Some(!mover) {
            debug!("draw offer by {} lapses", !mover);
            self.draw_offer = None;
        }
        debug!("{} plays {}{} ({:?})", mover, start, end, kind);

        if kind == MoveKind::Promotion {
            self.assert_king_safe(mover);
            self.pending_promotion = Some(end);
            self.status = Status::PromotionPending(end);
            return Ok(MoveOutcome::PromotionPending(end));
        }

        Ok(self.finish_turn(mover))
    }

    /// Same as [`attempt_move`](#method.attempt_move), with the squares given in algebraic form.
    pub fn attempt_move_str(&mut self, start: &str, end: &str) -> Result<MoveOutcome> {
        let start = start.parse()?;
        let end = end.parse()?;
        self.attempt_move(start, end)
    }

    /// Promotes the pawn waiting on the far rank to a piece of kind `kind`, then passes the turn.
    ///
    /// Queen, rook, bishop and knight are honoured; any other kind is promoted to a queen.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is over or no promotion is pending.
    pub fn resolve_promotion(&mut self, kind: PieceKind) -> Result<MoveOutcome> {
        let sq = self.promotion_square()?;
        let choice = PieceKind::promotion_or_queen(Some(kind));
        if choice != kind {
            warn!("cannot promote to {}, promoting to queen", kind);
        }
        let kind = choice;

        self.board.promote(sq, kind);
        self.pending_promotion = None;
        debug!("{} promotes on {} to {}", self.turn, sq, kind);

        let mover = self.turn;
        Ok(self.finish_turn(mover))
    }

    /// Same as [`resolve_promotion`](#method.resolve_promotion), with the choice given as text
    /// (`q`, `rook`, ...). Unrecognized text is promoted to a queen.
    pub fn resolve_promotion_str(&mut self, choice: &str) -> Result<MoveOutcome> {
        self.promotion_square()?;
        let kind: Option<PieceKind> = choice.trim().parse().ok();
        if kind.is_none() {
            warn!("unrecognized promotion choice '{}', promoting to queen", choice);
        }
        self.resolve_promotion(PieceKind::promotion_or_queen(kind))
    }

    /// Records a draw offer by `by`. The offer stands until the other player answers it or makes
    /// a move instead.
    pub fn offer_draw(&mut self, by: Color) -> Result<()> {
        self.ensure_no_promotion()?;
        info!("{} offers a draw", by);
        self.draw_offer = Some(by);

        Ok(())
    }

    /// Accepts the other player's draw offer, ending the game.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoDrawOffer` if the other player hasn't offered a draw.
    pub fn accept_draw(&mut self, by: Color) -> Result<()> {
        self.ensure_no_promotion()?;
        if self.draw_offer != Some(!by) {
            return Err(Error::NoDrawOffer);
        }

        info!("{} accepts the draw", by);
        self.draw_offer = None;
        self.status = Status::Draw(DrawReason::Agreement);

        Ok(())
    }

    /// Declines the other player's draw offer.
    pub fn decline_draw(&mut self, by: Color) -> Result<()> {
        self.ensure_no_promotion()?;
        if self.draw_offer != Some(!by) {
            return Err(Error::NoDrawOffer);
        }

        info!("{} declines the draw", by);
        self.draw_offer = None;

        Ok(())
    }

    /// Resigns the game on behalf of `by`.
    pub fn resign(&mut self, by: Color) -> Result<()> {
        self.ensure_in_play()?;
        info!("{} resigns", by);
        self.draw_offer = None;
        self.status = Status::Resigned { winner: !by };

        Ok(())
    }

    fn ensure_in_play(&self) -> Result<()> {
        if self.is_over() {
            Err(Error::GameOver)
        } else {
            Ok(())
        }
    }

    fn ensure_no_promotion(&self) -> Result<()> {
        self.ensure_in_play()?;
        match self.pending_promotion {
            Some(_) => Err(Error::PromotionRequired),
            None => Ok(()),
        }
    }

    fn promotion_square(&self) -> Result<Square> {
        self.ensure_in_play()?;
        self.pending_promotion.ok_or(Error::NoPromotionPending)
    }

    /// Evaluates the opponent's position once `mover`'s move is complete, updates the status and
    /// passes the turn.
    fn finish_turn(&mut self, mover: Color) -> MoveOutcome {
        self.assert_king_safe(mover);

        let opponent = !mover;
        self.status = classify(&self.board, self.en_passant, opponent);

        let outcome = match self.status {
            Status::Checkmate { .. } => {
                info!("checkmate, {} wins", mover);
                return MoveOutcome::AppliedWithCheckmate(opponent);
            },
            Status::Check(_) => {
                debug!("{} is in check", opponent);
                MoveOutcome::AppliedWithCheck(opponent)
            },
            Status::Draw(_) => {
                info!("stalemate");
                MoveOutcome::AppliedWithStalemate
            },
            _ => MoveOutcome::Applied,
        };

        self.turn = opponent;
        outcome
    }

    fn assert_king_safe(&self, mover: Color) {
        if attacks::is_in_check(&self.board, mover) {
            error!("{} king left in check by a committed move:\n{}", mover, self.board);
            panic!("internal error: {} king left in check", mover);
        }
    }
}

/// Classifies the position for `to_move` as check, checkmate, stalemate or in progress.
fn classify(board: &Board, en_passant: Option<Square>, to_move: Color) -> Status {
    let in_check = attacks::is_in_check(board, to_move);
    let can_move = movegen::has_legal_move(board, en_passant, to_move);

    match (in_check, can_move) {
        (true, false) => Status::Checkmate { winner: !to_move },
        (true, true) => Status::Check(to_move),
        (false, false) => Status::Draw(DrawReason::Stalemate),
        (false, true) => Status::InProgress,
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
