use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sandbox_host::{SandboxSnapshot, SandboxUniverse};
use serde::Serialize;
use tracing::info;
use turn_events_core::{tally_session, FieldSpawner, RngCore, SpawnConfig, SpawnTally};

/// Upper bound on `--turns`.
const MAX_TURNS: u32 = 1_000_000;

#[derive(Parser, Debug)]
#[command(
    name = "turn-events",
    version,
    about = "Play turn events against an in-memory universe"
)]
struct Cli {
    /// Number of turns to run.
    #[arg(
        long,
        default_value_t = 25,
        value_parser = clap::value_parser!(u32).range(1..=MAX_TURNS as i64)
    )]
    turns: u32,

    /// Universe width in game distance units.
    #[arg(long, default_value_t = 1000.0)]
    width: f64,

    /// Seed for reproducible runs; omit to draw from the thread RNG.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON spawn config; missing keys fall back to defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum number of fields the sandbox will hold.
    #[arg(long)]
    capacity: Option<usize>,

    /// Print the final sandbox state and tally as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    tally: &'a SpawnTally,
    universe: SandboxSnapshot,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if !(cli.width.is_finite() && cli.width >= 0.0) {
        bail!("universe width must be finite and non-negative, got {}", cli.width);
    }

    let config = match &cli.config {
        Some(path) => SpawnConfig::load(path)
            .with_context(|| format!("loading spawn config from {}", path.display()))?,
        None => SpawnConfig::default(),
    };
    let spawner = FieldSpawner::new(config).context("building field spawner")?;

    let mut sandbox = SandboxUniverse::new(cli.width);
    if let Some(capacity) = cli.capacity {
        sandbox = sandbox.with_capacity(capacity);
    }

    let mut rng: Box<dyn RngCore> = match cli.seed {
        Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };

    info!(
        turns = cli.turns,
        width = cli.width,
        seed = ?cli.seed,
        config = ?spawner.config(),
        "starting turn events session"
    );
    let tally = tally_session(&mut sandbox, &spawner, cli.turns, rng.as_mut());

    if cli.json {
        let out = JsonReport {
            tally: &tally,
            universe: sandbox.snapshot(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Turns played: {}", tally.turns());
    println!("{}", tally.describe());
    for field in sandbox.fields() {
        println!(
            "  {} {} (size {}) at {:.1} / {:.1}, turn {}",
            field.id, field.name, field.size, field.position.x, field.position.y, field.created_turn
        );
    }
    if sandbox.rejected_requests() > 0 {
        println!("Rejected requests: {}", sandbox.rejected_requests());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_default_to_twenty_five() {
        let cli = Cli::try_parse_from(["turn-events"]).unwrap();
        assert_eq!(cli.turns, 25);
        assert_eq!(cli.width, 1000.0);
        assert!(cli.seed.is_none());
    }

    #[test]
    fn accepts_turns_up_to_the_cap() {
        let cli = Cli::try_parse_from(["turn-events", "--turns", "1000000"]).unwrap();
        assert_eq!(cli.turns, MAX_TURNS);
    }

    #[test]
    fn rejects_turn_counts_beyond_the_cap() {
        assert!(Cli::try_parse_from(["turn-events", "--turns", "4000000000"]).is_err());
        assert!(Cli::try_parse_from(["turn-events", "--turns", "1000001"]).is_err());
        assert!(Cli::try_parse_from(["turn-events", "--turns", "0"]).is_err());
    }
}
