use std::path::PathBuf;

use clap::Parser;

use euchre_bench::config::{BenchmarkConfig, ResolvedOutputs};
use euchre_bench::logging::init_logging;
use euchre_bench::runner::GameRunner;

/// Batch harness that plays full Euchre games between heuristic seats.
#[derive(Debug, Parser)]
#[command(
    name = "euchre-bench",
    author,
    version,
    about = "Deterministic Euchre heuristic benchmark"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed that derives per-game seeds.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the second-round trump scan ("per-card" or "suit-totals").
    #[arg(long, value_name = "SCAN")]
    trump_scan: Option<String>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,

    /// Log every bot decision to the telemetry file (requires structured logging).
    #[arg(long)]
    log_decisions: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.games.count = games;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    if let Some(scan) = cli.trump_scan {
        config.bot.trump_scan = scan;
    }

    if cli.log_decisions {
        config.logging.enable_structured = true;
        config.logging.decision_logs = true;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let games = config.games.count;

    println!(
        "Loaded configuration '{run_id}' ({games} game{}, trump scan {})",
        if games == 1 { "" } else { "s" },
        config.bot.trump_scan
    );

    let logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = GameRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: no games played.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Run complete for '{run_id}': {} games, {} hands, {} redeals -> {} rows at {}",
        summary.games_played,
        summary.hands_played,
        summary.redeals,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!(
        "Wins: North/South {} | East/West {}",
        summary.wins[0], summary.wins[1]
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
