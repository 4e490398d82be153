use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use connect_n::arena;
use connect_n::config::{AppConfig, PlayerConfig};
use connect_n::ui::App;

/// Play connect-N in the terminal against people or the computer.
#[derive(Parser)]
#[command(name = "connect_n", about = "Gravity connect-N with a heuristic computer player")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_n.toml")]
    config: PathBuf,

    /// Override board width
    #[arg(long)]
    width: Option<usize>,

    /// Override board height
    #[arg(long)]
    height: Option<usize>,

    /// Override how many in a row wins
    #[arg(long)]
    win_size: Option<usize>,

    /// Seat a player, once per token in turn order: a name for a human, or
    /// "ai" (or an empty string) for the computer
    #[arg(long = "player", value_name = "NAME|ai")]
    players: Vec<String>,

    /// Seed for computer players
    #[arg(long)]
    seed: Option<u64>,

    /// Play computer-vs-computer games without the TUI and print a tally
    #[arg(long)]
    headless: bool,

    /// Number of games to play in headless mode
    #[arg(long, default_value_t = 100)]
    games: usize,

    /// Where the TUI writes its log (headless mode logs to stderr)
    #[arg(long, default_value = "connect_n.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.headless, &cli.log_file)?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(width) = cli.width {
        config.board.width = width;
    }
    if let Some(height) = cli.height {
        config.board.height = height;
    }
    if let Some(win_size) = cli.win_size {
        config.board.win_size = win_size;
    }
    if !cli.players.is_empty() {
        config.players = cli.players.iter().map(|s| PlayerConfig::parse_arg(s)).collect();
    }
    if cli.seed.is_some() {
        config.game.ai_seed = cli.seed;
    }
    config.validate().context("invalid configuration")?;

    if cli.headless {
        run_headless(&config, cli.games)
    } else {
        run_tui(config)
    }
}

fn init_logging(headless: bool, log_file: &Path) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    } else {
        // The terminal belongs to the UI, so logs go to a file
        let file = File::create(log_file)
            .with_context(|| format!("creating log file {}", log_file.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
    Ok(())
}

fn run_headless(config: &AppConfig, games: usize) -> Result<()> {
    info!(games, "starting unattended match");
    let tally = arena::run_match(config, games).context("running unattended match")?;

    println!("-------------------------------------------");
    println!("Games played: {}", tally.total_games());
    for (token, player) in config.game.tokens.iter().zip(&config.players) {
        println!(
            "  {} {:<16} {:>5} wins ({:.1}%)",
            token,
            player.display_name(),
            tally.wins(*token),
            tally.win_rate(*token) * 100.0
        );
    }
    println!("  Draws: {}", tally.draws());
    println!("  Average game length: {:.1} moves", tally.average_length());
    println!("-------------------------------------------");
    Ok(())
}

fn run_tui(config: AppConfig) -> Result<()> {
    let mut app = App::new(config).context("setting up the game")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("running the game")
}
