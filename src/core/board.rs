use super::types::{Mark, BOARD_SIZE, CELL_COUNT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;
use thiserror::Error;

/// 盤面 (一度履歴に入ったら変更しない値型)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    #[error("expected 9 cells, got {0}")]
    WrongCellCount(usize),
    #[error("invalid cell character {0:?}")]
    InvalidChar(char),
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Mark; CELL_COUNT]) -> Self {
        Board { cells }
    }

    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    /// `index` に `mark` を置いた新しい盤面を返す。元の盤面はそのまま。
    pub fn with_mark(&self, index: usize, mark: Mark) -> Option<Board> {
        if index >= CELL_COUNT {
            return None;
        }
        let mut next = *self;
        next.cells[index] = mark;
        Some(next)
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|m| !m.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        self.filled_count() == CELL_COUNT
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Mark]> {
        self.cells.chunks(BOARD_SIZE)
    }
}

impl Index<usize> for Board {
    type Output = Mark;

    fn index(&self, index: usize) -> &Mark {
        &self.cells[index]
    }
}

/// "XOX/XOO/OXX" 形式。空きマスは '.', '-', '_' のいずれか。
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(CELL_COUNT);
        for c in s.chars() {
            let mark = match c {
                'X' | 'x' => Mark::X,
                'O' | 'o' => Mark::O,
                '.' | '-' | '_' => Mark::Empty,
                '/' => continue,
                c if c.is_whitespace() => continue,
                other => return Err(ParseBoardError::InvalidChar(other)),
            };
            cells.push(mark);
        }
        let cells: [Mark; CELL_COUNT] = cells
            .try_into()
            .map_err(|v: Vec<Mark>| ParseBoardError::WrongCellCount(v.len()))?;
        Ok(Board { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            for mark in row {
                write!(f, "{}", mark.display_char())?;
            }
        }
        Ok(())
    }
}
