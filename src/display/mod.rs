use crate::core::{Mark, Position, BOARD_SIZE};
use crate::game::Game;
use crossterm::style::{Color, Stylize};
use crossterm::{cursor, queue, terminal};
use std::io::{self, Write};

/// 入力フォーカス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Board,
    History,
}

pub struct DisplayState {
    pub cursor: Position,
    pub focus: Focus,
    /// 履歴リスト上の選択行
    pub history_cursor: usize,
    pub status_msg: Option<String>,
    pub show_cursor: bool,
    pub colors: bool,
    pub show_indices: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            cursor: Position::new(1, 1),
            focus: Focus::Board,
            history_cursor: 0,
            status_msg: None,
            show_cursor: true,
            colors: true,
            show_indices: false,
        }
    }
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }
}

fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        text.to_string().with(color).to_string()
    } else {
        text.to_string()
    }
}

pub fn render_game<W: Write>(out: &mut W, game: &Game, state: &DisplayState) -> io::Result<()> {
    // 画面クリア（スクロール防止）
    queue!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    write!(out, "=== Tic-Tac-Toe ===\r\n")?;
    let status = game.status().to_string();
    if state.colors {
        write!(out, "{}\r\n", status.bold().yellow())?;
    } else {
        write!(out, "{}\r\n", status)?;
    }
    match &state.status_msg {
        Some(msg) => write!(out, "{}\r\n", msg)?,
        None => write!(out, "\r\n")?,
    }
    write!(out, "\r\n")?;

    render_grid(out, game, state)?;
    write!(out, "\r\n")?;
    render_history(out, game, state)?;
    write!(out, "\r\n")?;

    let help = match state.focus {
        Focus::Board => "[Arrows]: Move | [Enter]: Place | [1-9]: Place at cell | [Tab]: History | [q]: Quit",
        Focus::History => "[Up/Down]: Select | [Enter]: Jump | [Tab]: Board | [q]: Quit",
    };
    write!(out, "{}\r\n", help)?;
    out.flush()
}

fn render_grid<W: Write>(out: &mut W, game: &Game, state: &DisplayState) -> io::Result<()> {
    let board = game.current_snapshot();
    let win = game.winning_line();
    let last = game.last_move_index();

    // X軸ラベル
    write!(out, "    ")?;
    for x in 0..BOARD_SIZE {
        write!(out, " {}  ", x + 1)?;
    }
    write!(out, "\r\n")?;
    write!(out, "   +{}+\r\n", "----".repeat(BOARD_SIZE))?;

    for y in 0..BOARD_SIZE {
        write!(out, "{:2} |", y + 1)?;
        for x in 0..BOARD_SIZE {
            let pos = Position::new(x, y);
            let index = pos.index();
            let mark = board[index];

            let is_cursor =
                state.show_cursor && state.focus == Focus::Board && state.cursor == pos;
            let is_win = win.map(|line| line.contains(&index)).unwrap_or(false);
            let is_last_move = last == Some(index);

            let char_str = if mark.is_empty() && state.show_indices {
                (index + 1).to_string()
            } else {
                mark.display_char().to_string()
            };

            let (prefix, suffix) = if is_cursor {
                ("[", "]")
            } else if is_win {
                ("(", ")")
            } else if is_last_move {
                ("{", "}")
            } else {
                (" ", " ")
            };
            let cell_text = format!("{}{}{} ", prefix, char_str, suffix);

            let color = if is_cursor {
                Some(Color::Yellow)
            } else if is_win {
                Some(Color::Green)
            } else if is_last_move {
                Some(Color::Red)
            } else {
                match mark {
                    Mark::X => Some(Color::Cyan),
                    Mark::O => Some(Color::Magenta),
                    Mark::Empty => None,
                }
            };
            match color {
                Some(c) => write!(out, "{}", paint(&cell_text, c, state.colors))?,
                None => write!(out, "{}", cell_text)?,
            }
        }
        write!(out, "|\r\n")?;
    }
    write!(out, "   +{}+\r\n", "----".repeat(BOARD_SIZE))
}

fn render_history<W: Write>(out: &mut W, game: &Game, state: &DisplayState) -> io::Result<()> {
    if game.is_viewing_past() {
        write!(
            out,
            "History (viewing {}/{}):\r\n",
            game.step_number(),
            game.latest_step()
        )?;
    } else {
        write!(out, "History:\r\n")?;
    }

    for entry in game.move_list() {
        let selected = state.focus == Focus::History && state.history_cursor == entry.step;
        let current = entry.step == game.step_number();
        let line = format!(
            "{} {}{:2}. {}",
            if selected { ">" } else { " " },
            if current { "*" } else { " " },
            entry.step,
            entry.label
        );
        if selected {
            write!(out, "{}\r\n", paint(&line, Color::Yellow, state.colors))?;
        } else {
            write!(out, "{}\r\n", line)?;
        }
    }
    Ok(())
}
