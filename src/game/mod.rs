use crate::core::{Board, Mark, CELL_COUNT};
use crate::logic::{evaluate, winning_line};
use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument};

/// 着手要求の結果。却下は状態を一切変更しない (エラーではない)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Accepted,
    /// 既に勝者が決まっている
    GameOver,
    /// 既に埋まっているマス
    Occupied,
    /// 0..=8 の範囲外
    OutOfBounds,
}

impl MoveOutcome {
    pub fn is_accepted(self) -> bool {
        self == MoveOutcome::Accepted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Winner(Mark),
    Tie,
    NextPlayer(Mark),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Status::Winner(mark) => write!(f, "Winner: {}", mark),
            Status::Tie => write!(f, "Tie!"),
            Status::NextPlayer(mark) => write!(f, "Next player: {}", mark),
        }
    }
}

/// 履歴リストの1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveEntry {
    pub step: usize,
    pub label: String,
}

impl MoveEntry {
    fn new(step: usize) -> Self {
        let label = if step == 0 {
            "Go to game start".to_string()
        } else {
            format!("Go to move #{}", step)
        };
        MoveEntry { step, label }
    }
}

/// ゲーム本体。
///
/// 手番は `step_number` の偶奇から導出する (偶数なら X)。
/// `step_number` は常に `history` の有効なインデックス。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Game {
    history: Vec<Board>,
    step_number: usize,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Game {
            history: vec![Board::new()],
            step_number: 0,
        }
    }

    pub fn history(&self) -> &[Board] {
        &self.history
    }

    pub fn step_number(&self) -> usize {
        self.step_number
    }

    pub fn latest_step(&self) -> usize {
        self.history.len() - 1
    }

    pub fn is_viewing_past(&self) -> bool {
        self.step_number < self.latest_step()
    }

    pub fn current_snapshot(&self) -> &Board {
        &self.history[self.step_number]
    }

    pub fn x_is_next(&self) -> bool {
        self.step_number % 2 == 0
    }

    pub fn next_mark(&self) -> Mark {
        if self.x_is_next() {
            Mark::X
        } else {
            Mark::O
        }
    }

    pub fn winner(&self) -> Option<Mark> {
        evaluate(self.current_snapshot())
    }

    pub fn winning_line(&self) -> Option<[usize; 3]> {
        winning_line(self.current_snapshot())
    }

    /// 表示中の局面に至った直前の一手のマス
    pub fn last_move_index(&self) -> Option<usize> {
        if self.step_number == 0 {
            return None;
        }
        let prev = &self.history[self.step_number - 1];
        let cur = self.current_snapshot();
        (0..CELL_COUNT).find(|&i| prev[i] != cur[i])
    }

    /// 着手。表示中の局面より先の履歴は破棄される (分岐の切り捨て)
    #[instrument(skip(self), fields(step = self.step_number, mark = ?self.next_mark()))]
    pub fn apply_move(&mut self, index: usize) -> MoveOutcome {
        let current = *self.current_snapshot();

        if evaluate(&current).is_some() {
            debug!("rejected: game is over");
            return MoveOutcome::GameOver;
        }
        match current.get(index) {
            Some(Mark::Empty) => {}
            Some(mark) => {
                debug!(occupant = ?mark, "rejected: cell occupied");
                return MoveOutcome::Occupied;
            }
            None => {
                debug!("rejected: out of bounds");
                return MoveOutcome::OutOfBounds;
            }
        }
        let Some(next) = current.with_mark(index, self.next_mark()) else {
            return MoveOutcome::OutOfBounds;
        };

        let discarded = self.latest_step() - self.step_number;
        self.history.truncate(self.step_number + 1);
        self.history.push(next);
        self.step_number = self.history.len() - 1;
        debug!(discarded, new_step = self.step_number, "move accepted");
        MoveOutcome::Accepted
    }

    /// 過去の局面へ移動する。範囲外は何もせず false
    pub fn jump_to(&mut self, step: usize) -> bool {
        if step >= self.history.len() {
            debug!(step, len = self.history.len(), "jump rejected: no such step");
            return false;
        }
        self.step_number = step;
        debug!(step, "jumped");
        true
    }

    pub fn status(&self) -> Status {
        if let Some(winner) = self.winner() {
            Status::Winner(winner)
        } else if self.step_number == CELL_COUNT {
            // 盤のサイズは固定なので 9 手目 = 全マス埋まり
            Status::Tie
        } else {
            Status::NextPlayer(self.next_mark())
        }
    }

    pub fn move_list(&self) -> Vec<MoveEntry> {
        (0..self.history.len()).map(MoveEntry::new).collect()
    }
}
