use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;

use clap::Parser;
use console_snake::config::{load_file_config, ConfigError, GameConfig, Overrides};
use console_snake::game::{GameState, Outcome};
use console_snake::input::{GameInput, TerminalInput};
use console_snake::renderer::{install_panic_hook, render_text, TerminalRenderer};
use console_snake::runtime::{run_session, wait_for_restart, SessionEnd, ThreadClock};
use console_snake::ui::menu::outcome_text;
use tracing::Level;

#[derive(Debug, Parser)]
#[command(name = "console-snake", version, about = "Snake on a walled grid in your terminal")]
struct Cli {
    /// Play-area width in cells, walls excluded.
    #[arg(long)]
    width: Option<u16>,

    /// Play-area height in cells, walls excluded.
    #[arg(long)]
    height: Option<u16>,

    /// Initial delay between ticks in milliseconds.
    #[arg(long = "speed")]
    speed_ms: Option<u64>,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Color theme: classic, ocean or neon.
    #[arg(long)]
    theme: Option<String>,

    /// JSON config file; defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file. Nothing is logged without it.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Most verbose level written to the log file.
    #[arg(long = "log-level", default_value = "info")]
    log_level: Level,
}

/// What is printed after the terminal is restored.
struct Summary {
    board: Vec<String>,
    score: u32,
    outcome: Option<Outcome>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("console-snake: {error}");
            process::exit(2);
        }
    };

    if let Some(path) = &cli.log_file {
        init_logging(path, cli.log_level)?;
    }

    install_panic_hook();

    if let Some(summary) = run(&config)? {
        for line in &summary.board {
            println!("{line}");
        }
        println!("Final score: {}", summary.score);
        let cause = outcome_text(summary.outcome);
        if !cause.is_empty() {
            println!("{cause}");
        }
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<GameConfig, ConfigError> {
    let file = load_file_config(cli.config.as_deref())?;
    let overrides = Overrides {
        width: cli.width,
        height: cli.height,
        speed_ms: cli.speed_ms,
        seed: cli.seed,
        theme: cli.theme.clone(),
    };

    GameConfig::resolve(file, overrides)
}

fn init_logging(path: &Path, level: Level) -> io::Result<()> {
    let file = File::create(path)?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();

    Ok(())
}

/// Plays sessions until the player quits. Returns `None` if they quit on the start screen.
fn run(config: &GameConfig) -> io::Result<Option<Summary>> {
    let mut state = GameState::new(config);
    let mut input = TerminalInput::new();
    let mut clock = ThreadClock;
    let mut renderer = TerminalRenderer::enter(config.theme)?;

    renderer.render_start_screen(&state.view())?;
    if input.wait_for_start()? == GameInput::Quit {
        return Ok(None);
    }

    loop {
        match run_session(&mut state, &mut input, &mut renderer, &mut clock)? {
            SessionEnd::Quit => break,
            SessionEnd::Over => {
                if !wait_for_restart(&mut state, &mut input, &mut clock)? {
                    break;
                }
            }
        }
    }

    Ok(Some(Summary {
        board: render_text(&state.view()),
        score: state.score,
        outcome: state.outcome(),
    }))
}
