//! Throw Arena entry point
//!
//! Headless host: loads settings, drives the arena from a simulated frame
//! clock and logs every announcement. A graphical front end would do the
//! same, drawing `Arena::frame()` after each update.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use glam::IVec2;

use throw_arena::consts::{DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH};
use throw_arena::sim::{GameEvent, GamePhase, RuleTable, all_explanations};
use throw_arena::{Arena, Settings, SettingsError};

/// Host frame length (~60 Hz)
const FRAME_MS: u32 = 16;

#[derive(Debug, Parser)]
#[command(name = "throw-arena", about = "Rock, Paper, Scissors, Spock, Lizard and Blackhole on the loose")]
struct Cli {
    /// JSON settings file
    settings: Option<PathBuf>,

    /// Generate a random layout from this seed instead
    #[arg(long, conflicts_with = "settings")]
    seed: Option<u64>,

    /// Throws in a random layout
    #[arg(long, default_value_t = 12, requires = "seed")]
    count: usize,

    /// Applet-style parameter (key=value), e.g. throws=Rock,Paper
    #[arg(long = "param", value_name = "KEY=VALUE", conflicts_with_all = ["settings", "seed"])]
    params: Vec<String>,

    /// Print the rule table and every defeat sentence, then exit
    #[arg(long)]
    rules: bool,

    /// Print the effective settings as JSON, then exit
    #[arg(long)]
    dump_settings: bool,

    /// Stop after this much simulated time even if the game is still going
    #[arg(long, default_value_t = 300)]
    max_seconds: u32,

    /// Sleep between frames so the run takes wall-clock time
    #[arg(long)]
    realtime: bool,
}

fn load_settings(cli: &Cli) -> Result<Settings, SettingsError> {
    if let Some(path) = &cli.settings {
        return Settings::load(path);
    }
    if let Some(seed) = cli.seed {
        let screen = IVec2::new(DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT);
        return Ok(Settings::random_layout(seed, cli.count, screen));
    }
    if !cli.params.is_empty() {
        let pairs = cli
            .params
            .iter()
            .map(|param| param.split_once('=').unwrap_or((param.as_str(), "")));
        return Settings::from_params(pairs);
    }
    Ok(Settings::default())
}

fn print_rules() {
    println!("{}", RuleTable::standard());
    for sentence in all_explanations() {
        println!("{sentence}");
    }
}

fn run(cli: &Cli) -> Result<(), SettingsError> {
    let settings = load_settings(cli)?;
    if cli.dump_settings {
        println!("{}", settings.to_json()?);
        return Ok(());
    }

    let mut arena = Arena::new(&settings)?;
    arena.start();

    let budget_ms = u64::from(cli.max_seconds) * 1_000;
    let mut elapsed_ms: u64 = 0;
    while arena.phase() != GamePhase::Ended && elapsed_ms < budget_ms {
        arena.advance(FRAME_MS);
        elapsed_ms += u64::from(FRAME_MS);

        for event in arena.drain_events() {
            match event {
                GameEvent::Collision { explanation, .. } => {
                    println!("[{:>6.2}s] {}", elapsed_ms as f64 / 1000.0, explanation);
                }
                GameEvent::GameOver { survivors } => {
                    println!(
                        "[{:>6.2}s] END OF GAME ({} left)",
                        elapsed_ms as f64 / 1000.0,
                        survivors
                    );
                }
            }
        }

        if cli.realtime {
            std::thread::sleep(Duration::from_millis(u64::from(FRAME_MS)));
        }
    }

    if arena.phase() != GamePhase::Ended {
        log::warn!("Stopped after {} simulated seconds", cli.max_seconds);
        arena.pause();
    }

    for throw in arena.throws() {
        println!(
            "{:<9} #{:<3} at ({}, {}) size {}x{}",
            throw.kind.name(),
            throw.id,
            throw.pos.x,
            throw.pos.y,
            throw.size().x,
            throw.size().y
        );
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Throw Arena starting...");

    if cli.rules {
        print_rules();
        return;
    }

    if let Err(err) = run(&cli) {
        log::error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
