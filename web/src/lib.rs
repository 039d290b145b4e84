use chromarow_core::{ClearTiming, EngineConfig};
use clap::Parser;
use core::time::Duration;
use wasm_bindgen::prelude::*;

mod input;
mod puzzle;
mod utils;

pub use puzzle::BlockPuzzle;

/// Options read from the page's location hash, e.g. `#-vv&--seed=42`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub(crate) struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Delay before completed rows are looked for, in milliseconds
    #[arg(long)]
    check_delay_ms: Option<u64>,

    /// Delay before flashing rows are removed, in milliseconds
    #[arg(long)]
    compact_delay_ms: Option<u64>,
}

impl Args {
    pub(crate) fn from_hash(hash: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(hash.split(['#', '&']))
    }

    pub(crate) fn engine_config(&self, fallback_seed: impl FnOnce() -> u64) -> EngineConfig {
        let defaults = ClearTiming::default();
        let timing = ClearTiming {
            check_delay: self
                .check_delay_ms
                .map_or(defaults.check_delay, Duration::from_millis),
            compact_delay: self
                .compact_delay_ms
                .map_or(defaults.compact_delay, Duration::from_millis),
        };
        EngineConfig {
            seed: self.seed.unwrap_or_else(fallback_seed),
            timing,
            ..EngineConfig::default()
        }
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let args = Args::from_hash(&utils::location_hash()).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("seed: {:?}", args.seed);
    log::debug!("App started");
}
