use std::io::{self, stdin};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;

use typingo::{
    analytics::PageViews,
    app::App,
    app_dirs::AppDirs,
    clock::SystemClock,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    mode::Mode,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    ui,
};

/// typing practice in the terminal: quick, easy, hard, code and timed tests
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Typing practice in the terminal. Pick a test, type the text shown, and get your speed (WPM), accuracy and errors when you finish."
)]
pub struct Cli {
    /// open this test directly instead of the menu
    #[clap(short = 'm', long, value_enum)]
    mode: Option<Mode>,

    /// length of the time based test in seconds
    #[clap(short = 's', long, value_parser = clap::value_parser!(u64).range(1..))]
    secs: Option<u64>,

    /// number of words in the hard test
    #[clap(short = 'w', long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    words: Option<usize>,

    /// shuffle the letters in the alphabet test
    #[clap(long)]
    shuffle: bool,

    /// never contact the word and code services; use bundled text
    #[clap(long)]
    offline: bool,

    /// config file to read (and write with --write-config)
    #[clap(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// save the effective settings to the config file and exit
    #[clap(long)]
    write_config: bool,
}

impl Cli {
    /// Command line flags win over the config file
    fn apply(&self, config: &mut Config) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(secs) = self.secs {
            config.timed_secs = secs;
        }
        if let Some(words) = self.words {
            config.hard_words = words;
        }
        if self.shuffle {
            config.shuffle_alphabet = true;
        }
        if self.offline {
            config.offline = true;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let store = match &cli.config {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    let mut config = store.load();
    cli.apply(&mut config);

    if cli.write_config {
        store
            .save(&config)
            .with_context(|| format!("writing {}", store.path().display()))?;
        println!("wrote {}", store.path().display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    logging::init(AppDirs::log_path().as_deref());
    info!(mode = %config.mode, offline = config.offline, "typingo starting");

    let mut app = App::new(config, Arc::new(SystemClock), Box::new(PageViews::new()));
    if let Some(mode) = cli.mode {
        app.open_mode(mode);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    // restore the terminal even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("typingo exiting");
    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    while !app.should_quit() {
        terminal.draw(|f| ui::draw(app, f))?;
        app.handle_event(runner.step());
    }
    Ok(())
}
