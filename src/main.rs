//! Autotris runner (default binary).
//!
//! `autotris` plays forever on an emulated LED panel in the terminal until
//! q, Esc or Ctrl-C. `autotris headless [--locks N] [--seed S]` simulates
//! without output or pacing and prints the final stats as JSON.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;

use autotris::config::{parse_args, Config, Mode};
use autotris::core::UniformPieces;
use autotris::engine::{Autoplay, NullSink, Unpaced};
use autotris::event_log::EventLog;
use autotris::term::{KeyPacer, TerminalPanel};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mode = parse_args(&args)?;
    let config = Config::from_env();

    match mode {
        Mode::Terminal => run_terminal(&config),
        Mode::Headless { locks, seed } => run_headless(&config, locks, seed.or(config.seed)),
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

fn run_terminal(config: &Config) -> Result<()> {
    let seed = config.seed.unwrap_or_else(clock_seed);
    let mut log = EventLog::open(config.log_path.as_deref())?;
    let mut game = Autoplay::new(UniformPieces::new(seed), config.autoplay);

    let mut panel = TerminalPanel::new(config.autoplay.mapping);
    panel.enter()?;

    let result = play(&mut game, &mut panel, &mut log);

    // Always try to restore terminal state.
    let _ = panel.exit();
    log.finish(result)?;

    let stats = serde_json::to_string(&game.stats())?;
    println!("[Autotris] seed={} stats={}", seed, stats);
    Ok(())
}

fn play(game: &mut Autoplay, panel: &mut TerminalPanel, log: &mut EventLog) -> Result<()> {
    let mut pacer = KeyPacer::new();
    while !pacer.quit_requested() {
        game.step(panel, &mut pacer)?;
        log.record(&game.take_events())?;
        if let Some(err) = pacer.take_error() {
            return Err(err.into());
        }
    }
    Ok(())
}

fn run_headless(config: &Config, locks: u64, seed: Option<u64>) -> Result<()> {
    let seed = seed.unwrap_or_else(clock_seed);
    let mut log = EventLog::open(config.log_path.as_deref())?;
    let mut game = Autoplay::new(UniformPieces::new(seed), config.autoplay);

    eprintln!("[Autotris] headless run: seed={} locks={}", seed, locks);
    while game.stats().pieces < locks {
        game.step(&mut NullSink, &mut Unpaced)?;
        log.record(&game.take_events())?;
    }
    log.flush()?;

    println!("{}", serde_json::to_string_pretty(&game.stats())?);
    Ok(())
}
