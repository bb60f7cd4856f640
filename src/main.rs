use crossterm::{cursor, execute, terminal};
use std::io;
use std::time::Duration;
use tic_tac_toe::config::Config;
use tic_tac_toe::logging;
use tic_tac_toe::ui::{App, TerminalEvents};
use tracing::warn;

fn main() -> anyhow::Result<()> {
    let (config, load_error) = Config::load_or_default();
    if let Err(e) = logging::init(&config.log) {
        eprintln!("Logging disabled: {}", e);
    }
    if let Some(e) = load_error {
        warn!("using default config: {}", e);
    }

    // ターミナル初期化
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let res = run(&config, &mut stdout);

    // ターミナル復帰 (run が失敗しても必ず戻す)
    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    res
}

fn run(config: &Config, stdout: &mut io::Stdout) -> anyhow::Result<()> {
    let mut events = TerminalEvents::new(Duration::from_millis(config.display.poll_interval_ms));
    let mut app = App::new(config);
    app.run(&mut events, stdout)
}
