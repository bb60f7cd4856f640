use crate::config::Config;
use crate::core::{Position, BOARD_SIZE};
use crate::display::{render_game, DisplayState, Focus};
use crate::game::{Game, MoveOutcome};
use serde::Serialize;
use std::io::Write;
use tracing::{info, warn};

pub mod input;

pub use input::{map_key, Action, Direction, EventSource, TerminalEvents};

/// 1セッション分の棋譜 (終了時にログへ出す)
#[derive(Serialize)]
struct SessionRecord<'a> {
    started_at: &'a str,
    finished_at: String,
    status: String,
    game: &'a Game,
}

pub struct App {
    game: Game,
    state: DisplayState,
    started_at: String,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let state = DisplayState {
            colors: config.display.colors,
            show_indices: config.display.show_indices,
            ..DisplayState::default()
        };
        Self {
            game: Game::new(),
            state,
            started_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// 操作を反映する。Quit なら false
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::Place(index) => {
                let outcome = self.game.apply_move(index);
                self.state.status_msg = match outcome {
                    MoveOutcome::Accepted => {
                        if let Some(pos) = Position::from_index(index) {
                            self.state.cursor = pos;
                        }
                        self.state.history_cursor = self.game.step_number();
                        None
                    }
                    MoveOutcome::Occupied => Some(format!("Cell {} is already taken", index + 1)),
                    MoveOutcome::GameOver => Some("The game is over".to_string()),
                    MoveOutcome::OutOfBounds => Some("No such cell".to_string()),
                };
            }
            Action::Jump(step) => {
                if self.game.jump_to(step) {
                    self.state.status_msg = Some(if step == 0 {
                        "Returned to game start".to_string()
                    } else {
                        format!("Returned to move #{}", step)
                    });
                }
            }
            Action::MoveCursor(dir) => {
                let cursor = &mut self.state.cursor;
                match dir {
                    Direction::Up => cursor.y = cursor.y.saturating_sub(1),
                    Direction::Down => {
                        if cursor.y < BOARD_SIZE - 1 {
                            cursor.y += 1;
                        }
                    }
                    Direction::Left => cursor.x = cursor.x.saturating_sub(1),
                    Direction::Right => {
                        if cursor.x < BOARD_SIZE - 1 {
                            cursor.x += 1;
                        }
                    }
                }
            }
            Action::ToggleFocus => {
                self.state.focus = match self.state.focus {
                    Focus::Board => {
                        self.state.history_cursor = self.game.step_number();
                        Focus::History
                    }
                    Focus::History => Focus::Board,
                };
            }
            Action::HistoryUp => {
                self.state.history_cursor = self.state.history_cursor.saturating_sub(1);
            }
            Action::HistoryDown => {
                if self.state.history_cursor < self.game.latest_step() {
                    self.state.history_cursor += 1;
                }
            }
        }
        true
    }

    pub fn run<S: EventSource, W: Write>(&mut self, events: &mut S, out: &mut W) -> anyhow::Result<()> {
        info!(started_at = %self.started_at, "session started");
        let mut dirty = true;

        loop {
            if dirty {
                render_game(out, &self.game, &self.state)?;
                dirty = false;
            }

            let Some(key) = events.next_key()? else {
                continue;
            };
            let Some(action) = map_key(key, &self.state) else {
                continue;
            };
            if !self.dispatch(action) {
                break;
            }
            dirty = true;
        }

        self.log_record();
        Ok(())
    }

    fn log_record(&self) {
        let record = SessionRecord {
            started_at: &self.started_at,
            finished_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            status: self.game.status().to_string(),
            game: &self.game,
        };
        match serde_json::to_string(&record) {
            Ok(json) => info!(record = %json, "session finished"),
            Err(e) => warn!("failed to serialize session record: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Mark;
    use crate::game::Status;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::collections::VecDeque;

    /// 決められたキー列を返す。尽きたら q
    struct Scripted(VecDeque<KeyEvent>);

    impl Scripted {
        fn new(codes: &[KeyCode]) -> Self {
            Scripted(
                codes
                    .iter()
                    .map(|&c| KeyEvent::new(c, KeyModifiers::NONE))
                    .collect(),
            )
        }
    }

    impl EventSource for Scripted {
        fn next_key(&mut self) -> anyhow::Result<Option<KeyEvent>> {
            Ok(Some(self.0.pop_front().unwrap_or(KeyEvent::new(
                KeyCode::Char('q'),
                KeyModifiers::NONE,
            ))))
        }
    }

    fn app() -> App {
        let mut config = Config::default();
        config.display.colors = false;
        App::new(&config)
    }

    #[test]
    fn test_rejected_move_sets_message() {
        let mut app = app();
        assert!(app.dispatch(Action::Place(4)));
        assert_eq!(app.state().status_msg, None);
        assert!(app.dispatch(Action::Place(4)));
        assert_eq!(
            app.state().status_msg.as_deref(),
            Some("Cell 5 is already taken")
        );
        app.dispatch(Action::Place(42));
        assert_eq!(app.state().status_msg.as_deref(), Some("No such cell"));
        assert_eq!(app.game().history().len(), 2);
    }

    #[test]
    fn test_cursor_clamps_at_edges() {
        let mut app = app();
        for _ in 0..5 {
            app.dispatch(Action::MoveCursor(Direction::Up));
            app.dispatch(Action::MoveCursor(Direction::Right));
        }
        assert_eq!(app.state().cursor, Position::new(2, 0));
        for _ in 0..5 {
            app.dispatch(Action::MoveCursor(Direction::Down));
            app.dispatch(Action::MoveCursor(Direction::Left));
        }
        assert_eq!(app.state().cursor, Position::new(0, 2));
    }

    #[test]
    fn test_history_selection_clamps() {
        let mut app = app();
        app.dispatch(Action::Place(0));
        app.dispatch(Action::Place(1));
        app.dispatch(Action::ToggleFocus);
        assert_eq!(app.state().focus, Focus::History);
        assert_eq!(app.state().history_cursor, 2);
        app.dispatch(Action::HistoryDown);
        assert_eq!(app.state().history_cursor, 2);
        for _ in 0..4 {
            app.dispatch(Action::HistoryUp);
        }
        assert_eq!(app.state().history_cursor, 0);
    }

    #[test]
    fn test_run_plays_a_winning_game() {
        let mut app = app();
        let mut events = Scripted::new(&[
            KeyCode::Char('1'),
            KeyCode::Char('4'),
            KeyCode::Char('2'),
            KeyCode::Char('5'),
            KeyCode::Char('3'),
        ]);
        let mut out = Vec::new();
        app.run(&mut events, &mut out).unwrap();

        assert_eq!(app.game().status(), Status::Winner(Mark::X));
        let screen = String::from_utf8(out).unwrap();
        assert!(screen.contains("Winner: X"));
    }

    #[test]
    fn test_run_browses_history_and_branches() {
        let mut app = app();
        let mut events = Scripted::new(&[
            KeyCode::Char('1'),
            KeyCode::Char('2'),
            KeyCode::Char('3'),
            KeyCode::Tab,
            KeyCode::Up,
            KeyCode::Up,
            KeyCode::Enter,
            KeyCode::Tab,
            // カーソルは最後に置いた 3 (右上) から左下へ
            KeyCode::Down,
            KeyCode::Down,
            KeyCode::Left,
            KeyCode::Left,
            KeyCode::Enter,
        ]);
        let mut out = Vec::new();
        app.run(&mut events, &mut out).unwrap();

        let game = app.game();
        assert_eq!(game.history().len(), 3);
        assert_eq!(game.step_number(), 2);
        assert_eq!(game.current_snapshot().to_string(), "X../.../O..");
        let screen = String::from_utf8(out).unwrap();
        assert!(screen.contains("Returned to move #1"));
    }
}
