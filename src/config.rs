//! Runtime configuration: environment variables and command-line mode.
//!
//! Environment (all optional; malformed values fall back to defaults):
//!
//! - `AUTOTRIS_FRAME_MS`: frame hold in milliseconds (default 20)
//! - `AUTOTRIS_GRAVITY_INTERVAL`: frames per gravity tick (default 1)
//! - `AUTOTRIS_FLASHES`: line-clear flash repetitions (default 2)
//! - `AUTOTRIS_SEED`: piece RNG seed (default: derived from the clock)
//! - `AUTOTRIS_LOG_PATH`: append lifecycle events as JSON lines to this file
//! - `AUTOTRIS_FLIP_ROWS`: `0`/`false` to address the panel top-down

use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::engine::{AutoplayConfig, PanelMapping};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub autoplay: AutoplayConfig,
    pub seed: Option<u64>,
    pub log_path: Option<String>,
}

impl Config {
    /// Read from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through `lookup`, which returns the raw value of a variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());

        let mut config = Self::default();
        let autoplay = &mut config.autoplay;

        if let Some(ms) = parsed("AUTOTRIS_FRAME_MS") {
            autoplay.frame = Duration::from_millis(ms);
        }
        if let Some(n) = parsed("AUTOTRIS_GRAVITY_INTERVAL") {
            autoplay.gravity_interval = u32::try_from(n).unwrap_or(u32::MAX).max(1);
        }
        if let Some(n) = parsed("AUTOTRIS_FLASHES") {
            autoplay.flash_count = u32::try_from(n).unwrap_or(u32::MAX);
        }
        if let Some(flip) = lookup("AUTOTRIS_FLIP_ROWS") {
            let flip = flip.trim().to_lowercase();
            if flip == "0" || flip == "false" {
                autoplay.mapping = PanelMapping::Direct;
            }
        }

        config.seed = parsed("AUTOTRIS_SEED");
        config.log_path = lookup("AUTOTRIS_LOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        config
    }
}

/// What the binary should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Play on the emulated panel until a quit key is pressed.
    Terminal,
    /// Simulate without output or pacing for `locks` pieces, then print stats.
    Headless { locks: u64, seed: Option<u64> },
}

pub const DEFAULT_HEADLESS_LOCKS: u64 = 1000;

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<Mode> {
    let Some(first) = args.first() else {
        return Ok(Mode::Terminal);
    };
    if first != "headless" {
        return Err(anyhow!("unknown command: {}", first));
    }

    let mut locks = DEFAULT_HEADLESS_LOCKS;
    let mut seed = None;
    let mut i = 1usize;
    while i < args.len() {
        match args[i].as_str() {
            "--locks" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("headless: missing value for --locks"))?;
                locks = v
                    .parse::<u64>()
                    .map_err(|_| anyhow!("headless: invalid --locks value: {}", v))?;
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("headless: missing value for --seed"))?;
                seed = Some(
                    v.parse::<u64>()
                        .map_err(|_| anyhow!("headless: invalid --seed value: {}", v))?,
                );
            }
            other => {
                return Err(anyhow!("headless: unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(Mode::Headless { locks, seed })
}
