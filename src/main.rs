use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use keytrainer::{
    app::App,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner, TrainerEvent},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

/// keyboard trainer tui: type three sentences, count your fails, watch your speed
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A keyboard trainer for the terminal. Type the practice sentences one after another; every wrong keystroke counts as a fail and your speed is shown in characters per minute."
)]
pub struct Cli {
    /// start with caps lock toggled on
    #[clap(long)]
    caps_lock: bool,

    /// hide the clickable on-screen keypad
    #[clap(long)]
    no_keypad: bool,

    /// milliseconds to wait for input between redraws
    #[clap(short = 't', long, value_parser = clap::value_parser!(u64).range(1..))]
    tick_rate: Option<u64>,

    /// start a session right away instead of waiting for Enter
    #[clap(short = 'a', long)]
    auto_start: bool,

    /// settings file to use instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write the effective settings back to the settings file
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Flags win over whatever the settings file says
    fn apply(&self, mut config: Config) -> Config {
        if self.caps_lock {
            config.caps_lock = true;
        }
        if self.no_keypad {
            config.show_keypad = false;
        }
        if let Some(tick_rate) = self.tick_rate {
            config.tick_rate_ms = tick_rate;
        }
        if self.auto_start {
            config.auto_start = true;
        }
        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Err(err) = logging::init(&AppDirs::log_path()) {
        eprintln!("logging disabled: {err}");
    }

    let store = cli.config_store();
    let config = cli.apply(store.load());
    if cli.save_config {
        store.save(&config)?;
        log::info!("saved settings to {}", store.path().display());
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(app.config.tick_rate_ms)),
    );

    terminal.draw(|f| ui(app, f))?;

    while !app.should_quit {
        let redraw = match runner.step() {
            TrainerEvent::Key(key) => app.on_key(&key),
            TrainerEvent::Mouse(mouse) => {
                let size = terminal.size()?;
                app.on_mouse(Rect::new(0, 0, size.width, size.height), &mouse)
            }
            TrainerEvent::Resize => true,
            // speed is only recomputed on keystrokes, nothing to do between events
            TrainerEvent::Tick => false,
        };

        if redraw && !app.should_quit {
            terminal.draw(|f| ui(app, f))?;
        }
    }

    log::info!("quitting");
    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use keytrainer::{config::DEFAULT_TICK_RATE_MS, session::Phase};
    use tempfile::tempdir;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["keytrainer"]);

        assert!(!cli.caps_lock);
        assert!(!cli.no_keypad);
        assert_eq!(cli.tick_rate, None);
        assert!(!cli.auto_start);
        assert_eq!(cli.config, None);
        assert!(!cli.save_config);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "keytrainer",
            "--caps-lock",
            "--no-keypad",
            "-t",
            "250",
            "--auto-start",
            "--config",
            "/tmp/kt.json",
            "--save-config",
        ]);

        assert!(cli.caps_lock);
        assert!(cli.no_keypad);
        assert_eq!(cli.tick_rate, Some(250));
        assert!(cli.auto_start);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/kt.json")));
        assert!(cli.save_config);
    }

    #[test]
    fn test_cli_rejects_zero_tick_rate() {
        assert!(Cli::try_parse_from(["keytrainer", "--tick-rate", "0"]).is_err());
    }

    #[test]
    fn test_apply_keeps_file_values_without_flags() {
        let cli = Cli::parse_from(["keytrainer"]);
        let from_file = Config {
            caps_lock: true,
            show_keypad: false,
            tick_rate_ms: 42,
            auto_start: true,
        };

        assert_eq!(cli.apply(from_file.clone()), from_file);
    }

    #[test]
    fn test_apply_flags_override() {
        let cli = Cli::parse_from(["keytrainer", "--caps-lock", "--no-keypad", "-t", "7", "-a"]);
        let config = cli.apply(Config::default());

        assert!(config.caps_lock);
        assert!(!config.show_keypad);
        assert_eq!(config.tick_rate_ms, 7);
        assert!(config.auto_start);
    }

    #[test]
    fn test_config_store_uses_given_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let cli = Cli::parse_from(["keytrainer", "--config", path.to_str().unwrap()]);

        let store = cli.config_store();
        assert_eq!(store.path(), path.as_path());
        assert_eq!(store.load().tick_rate_ms, DEFAULT_TICK_RATE_MS);
    }

    #[test]
    fn test_ui_function_renders() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut app = App::new(Config::default());
        app.session.start();

        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal.draw(|f| ui(&app, f)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(content.contains("Max Joykner"));
        assert_eq!(app.session.phase(), Phase::Running);
    }
}
