use std::fmt;
use std::ops::{Deref, DerefMut, Index};
use std::str::FromStr;

use super::errors::IllegalMove;
use super::types::{BOARD_SIZE, Mark, Outcome, Player, Position, WinningLine};
use super::win_detector::{check_win, check_win_with_line};

/// 3×3 grid stored row-major.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Mark; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(cells: [[Mark; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    pub fn rows(&self) -> &[[Mark; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn get(&self, position: Position) -> Option<Mark> {
        self.cells.get(position.row)?.get(position.col).copied()
    }

    /// Marks an empty cell. Turn order is the session's concern, not the board's.
    pub fn place(&mut self, position: Position, player: Player) -> Result<(), IllegalMove> {
        match self.get(position) {
            None => Err(IllegalMove::OutOfBounds { position }),
            Some(Mark::Empty) => {
                self.cells[position.row][position.col] = player.mark();
                Ok(())
            }
            Some(mark) => Err(IllegalMove::Occupied { position, mark }),
        }
    }

    pub fn outcome(&self) -> Outcome {
        match check_win(self) {
            Some(Player::X) => Outcome::XWon,
            Some(Player::O) => Outcome::OWon,
            None if self.empty_cell_count() == 0 => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        check_win_with_line(self)
    }

    pub fn empty_cell_count(&self) -> usize {
        self.empty_cells().count()
    }

    /// Empty cells in row-major order. Search enumerates moves in this order,
    /// which decides ties between equally good moves.
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(move |&position| self[position] == Mark::Empty)
    }

    pub fn available_moves(&self) -> Vec<Position> {
        self.empty_cells().collect()
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().flatten().filter(|&&cell| cell == mark).count()
    }

    /// Marks a cell until the returned guard is dropped.
    pub(crate) fn speculate(&mut self, position: Position, player: Player) -> Speculation<'_> {
        debug_assert_eq!(self[position], Mark::Empty);
        self.cells[position.row][position.col] = player.mark();
        Speculation { board: self, position }
    }
}

impl Index<Position> for Board {
    type Output = Mark;

    fn index(&self, position: Position) -> &Mark {
        &self.cells[position.row][position.col]
    }
}

/// Scoped placement used by search: the cell is emptied again on drop, even
/// if the search unwinds.
pub(crate) struct Speculation<'a> {
    board: &'a mut Board,
    position: Position,
}

impl Deref for Speculation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Speculation<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Speculation<'_> {
    fn drop(&mut self) {
        self.board.cells[self.position.row][self.position.col] = Mark::Empty;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.cells.iter().enumerate() {
            if row_index > 0 {
                writeln!(f, "---+---+---")?;
            }
            writeln!(f, " {} | {} | {}", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    InvalidCell(char),
    WrongCellCount(usize),
}

impl fmt::Display for ParseBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseBoardError::InvalidCell(c) => write!(f, "Invalid cell character '{}'", c),
            ParseBoardError::WrongCellCount(n) => write!(f, "Expected 9 cells, got {}", n),
        }
    }
}

impl std::error::Error for ParseBoardError {}

/// Parses `X`, `O` and `.` cells in row-major order. `/` and whitespace
/// between rows are ignored, so `"XO./.X./..O"` and a three-line grid both work.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let marks = s
            .chars()
            .filter(|c| *c != '/' && !c.is_whitespace())
            .map(|c| match c {
                'X' | 'x' => Ok(Mark::X),
                'O' | 'o' => Ok(Mark::O),
                '.' => Ok(Mark::Empty),
                other => Err(ParseBoardError::InvalidCell(other)),
            })
            .collect::<Result<Vec<Mark>, _>>()?;

        if marks.len() != BOARD_SIZE * BOARD_SIZE {
            return Err(ParseBoardError::WrongCellCount(marks.len()));
        }

        let mut board = Board::new();
        for (position, mark) in Position::all().zip(marks) {
            board.cells[position.row][position.col] = mark;
        }
        Ok(board)
    }
}
