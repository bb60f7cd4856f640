pub mod config;
pub mod core;
pub mod display;
pub mod game;
pub mod logging;
pub mod logic;
pub mod ui;

pub use crate::core::{Board, Mark, Position};
pub use crate::game::{Game, MoveEntry, MoveOutcome, Status};
pub use crate::logic::evaluate;
