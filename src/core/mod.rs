pub mod board;
pub mod types;

pub use board::{Board, ParseBoardError};
pub use types::{Mark, Position, BOARD_SIZE, CELL_COUNT};
