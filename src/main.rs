//! Headless expedition runner
//!
//! Launches one sector from a seed, steps it until it resolves or the tick
//! limit is reached, and prints a summary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use sector_sim::behavior::{default_process_rules, load_rules};
use sector_sim::core::{EngineConfig, Result};
use sector_sim::sector::{Difficulty, SectorSize, SectorStatus};
use sector_sim::simulation::{launch, step, LaunchOptions};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SizeArg {
    Small,
    Medium,
    Large,
}

impl From<SizeArg> for SectorSize {
    fn from(arg: SizeArg) -> Self {
        match arg {
            SizeArg::Small => SectorSize::Small,
            SizeArg::Medium => SectorSize::Medium,
            SizeArg::Large => SectorSize::Large,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Normal,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// Run one expedition headlessly
#[derive(Parser, Debug)]
#[command(name = "sector-sim")]
#[command(about = "Run a process-versus-malware expedition and print the outcome")]
struct Args {
    #[arg(long, value_enum, default_value = "medium")]
    size: SizeArg,

    #[arg(long, value_enum, default_value = "normal")]
    difficulty: DifficultyArg,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum ticks before giving up
    #[arg(long, default_value_t = 500)]
    max_ticks: u64,

    /// Process behavior rules (TOML with [[rules]] tables)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Engine configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Log every tick
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Serialize)]
struct ExpeditionSummary {
    seed: u64,
    outcome: SectorStatus,
    ticks: u64,
    explored_percent: f32,
    caches_collected: u32,
    malware_destroyed: u32,
    processes_remaining: usize,
    malware_remaining: usize,
    events: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "sector_sim=debug"
    } else {
        "sector_sim=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    let config = match &args.config {
        Some(path) => EngineConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };
    let rules = match &args.rules {
        Some(path) => load_rules(path)?,
        None => default_process_rules(),
    };

    let options = LaunchOptions::new(args.size.into(), args.difficulty.into(), seed);
    let mut state = launch(&options, config, rules);
    let mut events = 0;

    while !state.is_resolved() && state.tick < args.max_ticks {
        let (next, report) = step(state);
        state = next;
        events += report.events.len();
        if args.verbose {
            for event in &report.events {
                eprintln!("  [{}] {}", event.tick, event.description);
            }
        }
    }

    let summary = ExpeditionSummary {
        seed,
        outcome: state.status(),
        ticks: state.tick,
        explored_percent: state.sector.explored_percent,
        caches_collected: state.caches_collected,
        malware_destroyed: state.malware_destroyed,
        processes_remaining: state.living_processes().count(),
        malware_remaining: state.living_malware().count(),
        events,
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => {
            println!("Expedition Result");
            println!("=================");
            println!("Outcome: {:?}", summary.outcome);
            println!("Ticks: {}", summary.ticks);
            println!("Explored: {:.1}%", summary.explored_percent);
            println!("Caches collected: {}", summary.caches_collected);
            println!("Malware destroyed: {}", summary.malware_destroyed);
            println!(
                "Survivors: {} processes, {} malware",
                summary.processes_remaining, summary.malware_remaining
            );
            println!("Seed: {}", summary.seed);
        }
    }

    Ok(())
}
