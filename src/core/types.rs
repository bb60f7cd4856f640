use serde::{Deserialize, Serialize};
use std::fmt;

/// 盤の一辺のマス数
pub const BOARD_SIZE: usize = 3;
/// 全マス数
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// マスの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mark {
    X, // 先手
    O, // 後手
    #[default]
    Empty,
}

impl Mark {
    pub fn is_empty(self) -> bool {
        self == Mark::Empty
    }

    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
            Mark::Empty => Mark::Empty,
        }
    }

    pub fn display_char(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
            Mark::Empty => '.',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
            Mark::Empty => write!(f, " "),
        }
    }
}

/// 盤面座標 (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    /// 行優先のマス番号から座標へ
    pub fn from_index(index: usize) -> Option<Self> {
        if index < CELL_COUNT {
            Some(Position::new(index % BOARD_SIZE, index / BOARD_SIZE))
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.y * BOARD_SIZE + self.x
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_alternates() {
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent(), Mark::X);
        assert_eq!(Mark::Empty.opponent(), Mark::Empty);
    }

    #[test]
    fn test_position_index_is_row_major() {
        assert_eq!(Position::new(0, 0).index(), 0);
        assert_eq!(Position::new(2, 0).index(), 2);
        assert_eq!(Position::new(0, 1).index(), 3);
        assert_eq!(Position::new(2, 2).index(), 8);
        for i in 0..CELL_COUNT {
            assert_eq!(Position::from_index(i).map(Position::index), Some(i));
        }
        assert_eq!(Position::from_index(9), None);
    }
}
