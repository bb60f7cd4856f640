use crate::display::{DisplayState, Focus};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// 画面から Game への操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Place(usize),
    Jump(usize),
    MoveCursor(Direction),
    ToggleFocus,
    HistoryUp,
    HistoryDown,
    Quit,
}

pub fn map_key(key: KeyEvent, state: &DisplayState) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Tab | KeyCode::BackTab => return Some(Action::ToggleFocus),
        KeyCode::Char(c @ '1'..='9') => {
            return Some(Action::Place(c as usize - '1' as usize));
        }
        _ => {}
    }

    match state.focus {
        Focus::Board => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveCursor(Direction::Up)),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveCursor(Direction::Down)),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveCursor(Direction::Left)),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveCursor(Direction::Right)),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Place(state.cursor.index())),
            _ => None,
        },
        Focus::History => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::HistoryUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::HistoryDown),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Jump(state.history_cursor)),
            _ => None,
        },
    }
}

/// キー入力の供給元
pub trait EventSource {
    /// 今回の poll で入力が無ければ Ok(None)
    fn next_key(&mut self) -> anyhow::Result<Option<KeyEvent>>;
}

pub struct TerminalEvents {
    poll_interval: Duration,
}

impl TerminalEvents {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }
}

impl EventSource for TerminalEvents {
    fn next_key(&mut self) -> anyhow::Result<Option<KeyEvent>> {
        if event::poll(self.poll_interval)? {
            if let Event::Key(key) = event::read()? {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }
}
