//! 8x8 board geometry and occupancy

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::pieces::{Piece, PieceId, Side};

/// Board width and height
pub const BOARD_SIZE: u8 = 8;

/// Upper bound on pieces in play
pub const MAX_PIECES: usize = 24;

/// Board coordinate. Row 0 is Black's back rank, row 7 is Red's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Square at (row, col), or `None` if off the board
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    /// Bounds-checked constructor for signed coordinates
    pub fn try_new(row: i16, col: i16) -> Result<Self> {
        if (0..BOARD_SIZE as i16).contains(&row) && (0..BOARD_SIZE as i16).contains(&col) {
            Ok(Self { row: row as u8, col: col as u8 })
        } else {
            Err(EngineError::OutOfBounds { row, col })
        }
    }

    /// Dark squares are the only ones pieces ever occupy
    pub fn is_playable(&self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// Square displaced by (drow, dcol), if still on the board
    pub fn offset(&self, drow: i8, dcol: i8) -> Option<Self> {
        let row = self.row as i8 + drow;
        let col = self.col as i8 + dcol;
        if row < 0 || col < 0 {
            return None;
        }
        Self::new(row as u8, col as u8)
    }

    /// Chebyshev distance
    pub fn distance_to(&self, other: Square) -> u8 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    /// Square halfway between two squares two diagonal steps apart
    pub fn midpoint(&self, other: Square) -> Option<Square> {
        if self.row.abs_diff(other.row) != 2 || self.col.abs_diff(other.col) != 2 {
            return None;
        }
        Square::new((self.row + other.row) / 2, (self.col + other.col) / 2)
    }

    /// Iterate every square, row by row
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square { row, col }))
    }

    /// Iterate the 32 dark squares
    pub fn playable() -> impl Iterator<Item = Square> {
        Self::all().filter(Square::is_playable)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Parses `"row,col"` (whitespace around the parts is ignored)
impl FromStr for Square {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || EngineError::InvalidSquare(s.to_string());
        let (row, col) = s.split_once(',').ok_or_else(invalid)?;
        let row: i16 = row.trim().parse().map_err(|_| invalid())?;
        let col: i16 = col.trim().parse().map_err(|_| invalid())?;
        Square::try_new(row, col)
    }
}

/// Board occupancy. The single source of truth for piece positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
    next_id: u8,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
            next_id: 0,
        }
    }

    /// Opening position: 12 Black men on rows 0-2, 12 Red men on rows 5-7
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for side in [Side::Black, Side::Red] {
            for row in side.home_rows() {
                for col in 0..BOARD_SIZE {
                    let sq = Square { row, col };
                    if sq.is_playable() {
                        board.place(sq, side);
                    }
                }
            }
        }
        board
    }

    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.row as usize][sq.col as usize]
    }

    pub fn set(&mut self, sq: Square, occupant: Option<Piece>) {
        self.cells[sq.row as usize][sq.col as usize] = occupant;
    }

    /// Remove and return the occupant of a square
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.row as usize][sq.col as usize].take()
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Place a fresh man with a newly allocated id
    pub fn place(&mut self, sq: Square, side: Side) -> PieceId {
        let id = self.allocate_id();
        self.set(sq, Some(Piece::new(id, side)));
        id
    }

    /// Place a fresh king with a newly allocated id
    pub fn place_king(&mut self, sq: Square, side: Side) -> PieceId {
        let id = self.allocate_id();
        self.set(sq, Some(Piece::crowned(id, side)));
        id
    }

    fn allocate_id(&mut self) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Every square with its occupant, row by row
    pub fn all_squares(&self) -> impl Iterator<Item = (Square, Option<Piece>)> + '_ {
        Square::all().map(move |sq| (sq, self.get(sq)))
    }

    /// Occupied squares only
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.all_squares().filter_map(|(sq, p)| p.map(|p| (sq, p)))
    }

    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.side == side)
    }

    pub fn count(&self, side: Side) -> usize {
        self.pieces_of(side).count()
    }

    pub fn total(&self) -> usize {
        self.pieces().count()
    }

    /// Locate a piece by identity
    pub fn find(&self, id: PieceId) -> Option<Square> {
        self.pieces().find(|(_, p)| p.id == id).map(|(sq, _)| sq)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            let line: Vec<String> = (0..BOARD_SIZE)
                .map(|col| {
                    let sq = Square { row, col };
                    self.get(sq).map_or('.', |p| p.symbol()).to_string()
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Parses the diagram produced by `Display`: eight rows of eight cells,
/// `r`/`R` for Red, `b`/`B` for Black, `.` for empty. Whitespace and blank
/// lines are ignored. Ids are assigned in reading order.
impl FromStr for Board {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<Vec<char>> = s
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|cells| !cells.is_empty())
            .collect();

        if rows.len() != BOARD_SIZE as usize {
            return Err(EngineError::InvalidDiagram(format!(
                "expected {} rows, found {}",
                BOARD_SIZE,
                rows.len()
            )));
        }

        let mut board = Board::empty();
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != BOARD_SIZE as usize {
                return Err(EngineError::InvalidDiagram(format!(
                    "row {} has {} cells",
                    row,
                    cells.len()
                )));
            }
            for (col, &c) in cells.iter().enumerate() {
                let sq = Square { row: row as u8, col: col as u8 };
                let (side, king) = match c {
                    '.' => continue,
                    'r' => (Side::Red, false),
                    'R' => (Side::Red, true),
                    'b' => (Side::Black, false),
                    'B' => (Side::Black, true),
                    other => {
                        return Err(EngineError::InvalidDiagram(format!(
                            "unknown cell {:?} at {}",
                            other, sq
                        )))
                    }
                };
                if !sq.is_playable() {
                    return Err(EngineError::InvalidDiagram(format!(
                        "piece on light square {}",
                        sq
                    )));
                }
                if king {
                    board.place_king(sq, side);
                } else {
                    board.place(sq, side);
                }
            }
        }

        if board.total() > MAX_PIECES {
            return Err(EngineError::InvalidDiagram(format!(
                "{} pieces exceeds {}",
                board.total(),
                MAX_PIECES
            )));
        }

        Ok(board)
    }
}
