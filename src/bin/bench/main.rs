// Courier Benchmark Runner: Monte Carlo sweep over network scenarios
// Seedable ChaCha8Rng throughout, per-run audit of the autonomy invariant
//
// Usage:
//   cargo run --release --bin bench                     # Run all scenarios (30 runs each)
//   cargo run --release --bin bench -- --runs 5         # Quick mode (5 runs each)
//   cargo run --release --bin bench -- SHORT_RANGE      # Filter by name, label or category
//   cargo run --release --bin bench -- --seed 42        # Custom base seed
//   cargo run --release --bin bench -- --orders 1000    # Override orders per run
//   cargo run --release --bin bench -- --json           # Save a JSON report

mod monte_carlo;
mod report;
mod scenarios;

use clap::Parser;
use report::*;
use scenarios::*;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ─── CLI Parsing ────────────────────────────────────────────────────────────

/// Courier benchmark runner
///
/// Runs every scenario `--runs` times with consecutive seeds and prints
/// aggregate planner statistics.
#[derive(Parser, Debug)]
#[command(name = "bench")]
#[command(version, about, long_about = None)]
struct Args {
    /// Runs per scenario
    #[arg(short = 'r', long, default_value = "30")]
    runs: usize,

    /// Base seed; run i uses seed + i
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Orders per run; overrides each scenario's own count
    #[arg(short = 'o', long)]
    orders: Option<usize>,

    /// Write a JSON report to benchmark-results/
    #[arg(long)]
    json: bool,

    /// Only run scenarios whose name, label or category contains this
    filter: Option<String>,
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,courier_engine=info")),
        )
        .init();

    let args = Args::parse();
    let all_scenarios = scenarios();

    let to_run: Vec<&Scenario> = match &args.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_scenarios.iter()
                .filter(|s| s.name.to_lowercase().contains(&f_lower)
                          || s.label.to_lowercase().contains(&f_lower)
                          || s.category.to_lowercase().contains(&f_lower))
                .collect()
        }
        None => all_scenarios.iter().collect(),
    };

    if to_run.is_empty() {
        eprintln!("No scenarios match filter: {:?}", args.filter);
        std::process::exit(1);
    }

    info!(runs = args.runs, seed = args.seed, scenarios = to_run.len(), "Starting benchmark");

    println!("\n  Courier Benchmark Runner v{}", env!("CARGO_PKG_VERSION"));
    println!("  PRNG: ChaCha8Rng | Runs/scenario: {} | Base seed: {}", args.runs, args.seed);
    println!("  Running {} scenario(s)...\n", to_run.len());
    println!("  {:<28} {:>5} {:>12} {:>9} {:>8} {:>7} {:>6} {:>7}",
        "Scenario", "Pass%", "Success%", "AvgCost", "Stops", "Routes", "Height", "Time");
    println!("  {}", "-".repeat(92));

    let suite_start = Instant::now();
    let mut mc_reports = Vec::new();

    for scenario in &to_run {
        let report = monte_carlo::run_monte_carlo(scenario, args.runs, args.seed, args.orders);

        let pass_pct = report.pass_rate * 100.0;
        let status = if report.pass_rate >= 1.0 { "PASS" } else { "FAIL" };

        println!("  {:<28} {:>4}% {:>6.1}±{:<4.1} {:>9.1} {:>8.2} {:>7.0} {:>6.0} {:>5.0}ms  {}",
            report.label,
            pass_pct as u32,
            report.success_rate.mean * 100.0,
            report.success_rate.half_width() * 100.0,
            report.avg_order_cost.mean,
            report.avg_recharge_stops.mean,
            report.distinct_routes.mean,
            report.ledger_height.mean,
            report.elapsed_ms.mean,
            status,
        );

        mc_reports.push(report);
    }

    let suite_elapsed = suite_start.elapsed();

    // ─── Summary ────────────────────────────────────────────────────────

    let total = mc_reports.len();
    let passed = mc_reports.iter().filter(|r| r.pass_rate >= 1.0).count();
    let failed = total - passed;

    println!("  {}", "-".repeat(92));
    println!("  Total: {}  Passed: {}  Failed: {}  Suite time: {:.1}s\n",
        total, passed, failed, suite_elapsed.as_secs_f64());

    // ─── Write JSON Report ──────────────────────────────────────────────

    if args.json {
        let timestamp = chrono::Utc::now().format("%Y%m%dT%H%M%S").to_string();
        let report = BenchReport {
            timestamp: timestamp.clone(),
            version: env!("CARGO_PKG_VERSION"),
            prng: "ChaCha8Rng",
            n_runs_per_scenario: args.runs,
            summary: Summary {
                total,
                passed,
                failed,
                pass_rate: passed as f64 / total as f64,
            },
            scenarios: mc_reports,
        };

        let dir = std::path::Path::new("benchmark-results");
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("bench-{}.json", timestamp));
        std::fs::write(&path, serde_json::to_string_pretty(&report)?)?;
        println!("  Results saved to: {}\n", path.display());
    }

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
