//! The board: an 8×8 grid of optional pieces
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::str::FromStr;
use super::*;

use Color::*;
use PieceKind::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A piece standing on the board.
///
/// A piece keeps its identity while it moves: relocating it carries its kind, color and move
/// history to the new square. Only promotion replaces a piece with a new one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    square: Square,
    has_moved: bool,
}

impl Piece {
    /// Creates a piece that has not moved yet.
    pub fn new(kind: PieceKind, color: Color, square: Square) -> Piece {
        Piece { kind, color, square, has_moved: false }
    }

    /// Returns the same piece, flagged as having moved.
    pub fn moved(self) -> Piece {
        Piece { has_moved: true, ..self }
    }

    /// Returns the kind of piece
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the color of the piece
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the square the piece stands on
    pub fn square(&self) -> Square {
        self.square
    }

    /// Returns `true` if the piece has been moved during the game.
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Returns the letter used to display this piece.
    pub fn symbol(&self) -> char {
        self.kind.symbol(self.color)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// An 8×8 board where each cell is either empty or holds exactly one piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; Square::SIZE]; Square::SIZE],
}

const BACK_RANK: [PieceKind; Square::SIZE] = [
    Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook,
];

impl Board {
    /// Returns the standard starting position.
    pub fn new() -> Board {
        let mut board = Board::empty();

        for color in &[ White, Black ] {
            for (col, kind) in BACK_RANK.iter().enumerate() {
                board.put(Piece::new(*kind, *color, cell(color.back_row(), col)));
                board.put(Piece::new(Pawn, *color, cell(color.pawn_row(), col)));
            }
        }

        board
    }

    /// Returns a board with no pieces on it.
    pub fn empty() -> Board {
        Board {
            cells: [[None; Square::SIZE]; Square::SIZE],
        }
    }

    /// Returns the piece, if any, at the given square
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.cells[sq.row()][sq.col()].as_ref()
    }

    /// Returns `true` if no piece stands on `sq`.
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Returns `true` if a piece of color `c` stands on `sq`.
    pub fn is_occupied_by(&self, sq: Square, c: Color) -> bool {
        self.piece_at(sq).map_or(false, |p| p.color == c)
    }

    /// Returns an iterator over every piece on the board, in row-major order from `a8`.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells.iter().flat_map(|row| row.iter()).filter_map(Option::as_ref)
    }

    /// Returns an iterator over the pieces of color `c`.
    pub fn pieces_of(&self, c: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |p| p.color == c)
    }

    /// Returns the square where the king of the given color is located, or `None` if that king
    /// isn't on the board.
    pub fn king_square(&self, c: Color) -> Option<Square> {
        self.pieces_of(c).find(|p| p.kind == King).map(|p| p.square)
    }

    /// Puts `piece` on the square it names, returning whatever stood there before. Used to set up
    /// positions; moves go through [`Game`](../game/struct.Game.html).
    pub fn place(&mut self, piece: Piece) -> Option<Piece> {
        self.put(piece)
    }

    /// Takes the piece off `sq`, if there is one.
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.row()][sq.col()].take()
    }

    fn put(&mut self, piece: Piece) -> Option<Piece> {
        let sq = piece.square;
        self.cells[sq.row()][sq.col()].replace(piece)
    }

    /// Moves the piece on `from` to `to`, flagging it as moved. Returns the piece previously on
    /// `to`, if any. Does nothing if `from` is empty.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        match self.remove(from) {
            Some(piece) => self.put(Piece { square: to, has_moved: true, ..piece }),
            None => None,
        }
    }

    /// Carries out a move that has already been validated, returning the captured piece, if any.
    pub(crate) fn apply(&mut self, start: Square, end: Square, kind: MoveKind) -> Option<Piece> {
        match kind {
            MoveKind::Standard | MoveKind::DoubleStep | MoveKind::Promotion => {
                self.relocate(start, end)
            },
            MoveKind::EnPassant { captured } => {
                let taken = self.remove(captured);
                self.relocate(start, end);
                taken
            },
            MoveKind::Castle { rook_from, rook_to } => {
                self.relocate(start, end);
                self.relocate(rook_from, rook_to);
                None
            },
        }
    }

    /// Replaces the piece on `sq` with a new piece of kind `kind` and the same color. Returns the
    /// replaced piece.
    pub(crate) fn promote(&mut self, sq: Square, kind: PieceKind) -> Option<Piece> {
        match self.remove(sq) {
            Some(old) => {
                self.put(Piece::new(kind, old.color, sq).moved());
                Some(old)
            },
            None => None,
        }
    }

    /// Writes an 8×8 grid of piece letters, rank 8 first. With `labels`, rank numbers are written
    /// on the left and file letters underneath.
    pub(crate) fn write_grid<F>(f: &mut fmt::Formatter<'_>, labels: bool, symbol: F) -> fmt::Result
        where F: Fn(Square) -> Option<char> {
        for row in 0..Square::SIZE {
            if labels {
                write!(f, "{} ", Square::SIZE - row)?;
            }
            for col in 0..Square::SIZE {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", symbol(cell(row, col)).unwrap_or('.'))?;
            }
            writeln!(f)?;
        }
        if labels {
            writeln!(f, "  a b c d e f g h")?;
        }

        Ok(())
    }
}

/// Builds a square from indices that are known to be in range.
fn cell(row: usize, col: usize) -> Square {
    Square::new(row, col).expect("INFALLIBLE")
}

impl Default for Board {
    /// Returns the standard starting position
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    /// The board is formatted as follows:
    ///
    /// "{}" -- With rank and file labels
    ///
    /// "{:#}" -- The bare grid, as accepted by `FromStr`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = !f.alternate();
        Board::write_grid(f, labels, |sq| self.piece_at(sq).map(Piece::symbol))
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses a board diagram: eight rows of eight symbols, rank 8 first, separated by
    /// whitespace. White pieces are upper case, black lower case, and `.` is an empty square.
    /// Rank labels at the start of a row and a trailing row of file labels are ignored.
    ///
    /// Kings and rooks off their starting squares, and pawns off their starting rank, are
    /// treated as having moved.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut board = Board::empty();
        let mut row = 0;

        for line in s.lines() {
            let mut tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() || tokens.concat() == "abcdefgh" {
                continue;
            }
            if tokens.len() == Square::SIZE + 1 && tokens[0].parse::<usize>().is_ok() {
                tokens.remove(0);
            }
            if row >= Square::SIZE {
                return Err(ParseBoardError::RowCount);
            }
            if tokens.len() != Square::SIZE {
                return Err(ParseBoardError::RowLength(row));
            }

            for (col, token) in tokens.iter().enumerate() {
                let mut chars = token.chars();
                let c = match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => return Err(ParseBoardError::Symbol(token.to_string())),
                };
                if c == '.' {
                    continue;
                }

                let (kind, color) = PieceKind::from_symbol(c)
                    .ok_or_else(|| ParseBoardError::Symbol(token.to_string()))?;
                let home = match kind {
                    King => row == color.back_row() && col == 4,
                    Rook => row == color.back_row() && (col == 0 || col == 7),
                    Pawn => row == color.pawn_row(),
                    _ => true,
                };
                let piece = Piece::new(kind, color, cell(row, col));
                board.put(if home { piece } else { piece.moved() });
            }

            row += 1;
        }

        if row == Square::SIZE {
            Ok(board)
        } else {
            Err(ParseBoardError::RowCount)
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error returned when parsing a board diagram fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    /// The diagram doesn't have exactly eight rows
    RowCount,
    /// The row at the given index doesn't have exactly eight squares
    RowLength(usize),
    /// A square holds something other than a piece letter or `.`
    Symbol(String),
}

impl fmt::Display for ParseBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseBoardError::*;

        match self {
            RowCount => "board must have 8 rows".fmt(f),
            RowLength(row) => format!("row {} must have 8 squares", row + 1).fmt(f),
            Symbol(s) => format!("unknown piece symbol '{}'", s).fmt(f),
        }
    }
}

impl std::error::Error for ParseBoardError { }

////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().expect("valid square")
    }

    const START: &str = "\
        r n b q k b n r\n\
        p p p p p p p p\n\
        . . . . . . . .\n\
        . . . . . . . .\n\
        . . . . . . . .\n\
        . . . . . . . .\n\
        P P P P P P P P\n\
        R N B Q K B N R\n";

    #[test]
    fn new_returns_the_standard_starting_position() {
        assert_eq!(format!("{:#}", Board::new()), START);
    }

    #[test]
    fn starting_position_has_thirty_two_unmoved_pieces() {
        let board = Board::new();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.pieces_of(White).count(), 16);
        assert!(board.pieces().all(|p| !p.has_moved()));
        assert_eq!(board.king_square(White), Some(sq("e1")));
        assert_eq!(board.king_square(Black), Some(sq("e8")));
    }

    #[test]
    fn pieces_know_their_squares() {
        let board = Board::new();
        for p in board.pieces() {
            assert_eq!(board.piece_at(p.square()), Some(p));
        }
    }

    #[test]
    fn labelled_display() {
        let text = Board::new().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "8 r n b q k b n r");
        assert_eq!(lines[7], "1 R N B Q K B N R");
        assert_eq!(lines[8], "  a b c d e f g h");
    }

    #[test]
    fn parse_round_trips_display() {
        assert_eq!(START.parse::<Board>().expect("valid board"), Board::new());
        assert_eq!(Board::new().to_string().parse::<Board>().expect("valid board"), Board::new());
    }

    #[test]
    fn parse_marks_displaced_pieces_as_moved() {
        let board: Board = "\
            . . . . . . . k\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . . . . . .\n\
            . . . . P . . .\n\
            . . . . . . . .\n\
            P . . . . . . .\n\
            R . . . K . R .\n".parse().expect("valid board");

        assert!(board.piece_at(sq("h8")).unwrap().has_moved());
        assert!(!board.piece_at(sq("e1")).unwrap().has_moved());
        assert!(!board.piece_at(sq("a1")).unwrap().has_moved());
        assert!(board.piece_at(sq("g1")).unwrap().has_moved());
        assert!(!board.piece_at(sq("a2")).unwrap().has_moved());
        assert!(board.piece_at(sq("e4")).unwrap().has_moved());
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Board>(), Err(ParseBoardError::RowCount));
        assert_eq!(". . .".parse::<Board>(), Err(ParseBoardError::RowLength(0)));
        let bad = START.replace("q", "x");
        assert_eq!(bad.parse::<Board>(), Err(ParseBoardError::Symbol("x".to_string())));
        let long = format!("{}{}", START, ". . . . . . . .\n");
        assert_eq!(long.parse::<Board>(), Err(ParseBoardError::RowCount));
    }

    #[test]
    fn relocate_carries_the_piece_and_returns_capture() {
        let mut board = Board::new();
        let captured = board.relocate(sq("d1"), sq("d7"));

        assert_eq!(captured.map(|p| (p.kind(), p.color())), Some((Pawn, Black)));
        assert!(board.is_empty(sq("d1")));
        let queen = board.piece_at(sq("d7")).unwrap();
        assert_eq!((queen.kind(), queen.color(), queen.square()), (Queen, White, sq("d7")));
        assert!(queen.has_moved());
    }

    #[test]
    fn relocate_from_empty_square_does_nothing() {
        let mut board = Board::new();
        assert_eq!(board.relocate(sq("e4"), sq("e5")), None);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn apply_castle_moves_both_pieces() {
        let mut board = Board::empty();
        board.place(Piece::new(King, White, sq("e1")));
        board.place(Piece::new(Rook, White, sq("h1")));
        let castle = MoveKind::Castle { rook_from: sq("h1"), rook_to: sq("f1") };
        board.apply(sq("e1"), sq("g1"), castle);

        assert_eq!(board.piece_at(sq("g1")).map(Piece::kind), Some(King));
        assert_eq!(board.piece_at(sq("f1")).map(Piece::kind), Some(Rook));
        assert!(board.is_empty(sq("e1")));
        assert!(board.is_empty(sq("h1")));
    }

    #[test]
    fn apply_en_passant_removes_the_passed_pawn() {
        let mut board = Board::empty();
        board.place(Piece::new(Pawn, White, sq("e5")));
        board.place(Piece::new(Pawn, Black, sq("d5")));
        let taken = board.apply(sq("e5"), sq("d6"), MoveKind::EnPassant { captured: sq("d5") });

        assert_eq!(taken.map(|p| p.square()), Some(sq("d5")));
        assert!(board.is_empty(sq("d5")));
        assert_eq!(board.piece_at(sq("d6")).map(Piece::color), Some(White));
    }

    #[test]
    fn promote_replaces_the_pawn() {
        let mut board = Board::empty();
        board.place(Piece::new(Pawn, Black, sq("c1")));
        let old = board.promote(sq("c1"), Knight);

        assert_eq!(old.map(|p| p.kind()), Some(Pawn));
        let new = board.piece_at(sq("c1")).unwrap();
        assert_eq!((new.kind(), new.color()), (Knight, Black));
        assert_eq!(board.pieces().count(), 1);
    }
}
