//! mlfqsim — run MLFQ scheduling simulations from JSON workloads.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use mlfq_sim::workload::{parse_seed, ProcessesSpec, WorkloadSpec, DEFAULT_SEED};
use mlfq_sim::{LevelSpec, ProcessFactory, Scheduler};

/// Run multi-level feedback queue scheduling simulations.
#[derive(Parser)]
#[command(name = "mlfqsim")]
struct Cli {
    /// Path to a JSON workload file. Without one, a default three-level
    /// configuration is used.
    workload: Option<PathBuf>,

    /// Number of processes to admit (overrides a workload process count;
    /// ignored when the workload lists explicit bursts).
    #[arg(short, long)]
    processes: Option<u32>,

    /// PRNG seed (u32 integer or "entropy" for OS randomness).
    ///
    /// Overrides the workload file's seed. Falls back to the
    /// MLFQ_SIM_SEED env var, then the default (42).
    #[arg(long, env = "MLFQ_SIM_SEED")]
    seed: Option<String>,

    /// Print each process's full history after the run.
    #[arg(long)]
    dump_history: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let spec = match &cli.workload {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            WorkloadSpec::from_json(&json)
                .with_context(|| format!("failed to parse workload {}", path.display()))?
        }
        None => default_workload(),
    };

    let seed = match &cli.seed {
        Some(s) => parse_seed(Some(s)).context("--seed")?,
        None => spec.seed.unwrap_or(DEFAULT_SEED),
    };

    let mut scheduler = Scheduler::new(seed);
    for level in &spec.levels {
        scheduler.add_queue(level.capacity, level.quantum, level.serve_budget);
    }

    let mut factory = ProcessFactory::new(seed);
    match &spec.processes {
        ProcessesSpec::Count(n) => {
            let n = cli.processes.unwrap_or(*n);
            for process in factory.create_batch(n as usize) {
                scheduler.add_process(process);
            }
        }
        ProcessesSpec::Bursts(bursts) => {
            for &burst in bursts {
                scheduler.add_process(factory.create_with_burst(burst));
            }
        }
    }

    scheduler.run();

    if cli.dump_history {
        for process in scheduler.processes() {
            for line in process.history_lines() {
                println!("{line}");
            }
        }
    }

    println!(
        "{} processes completed in {} ticks of service (seed {seed})",
        scheduler.processes().len(),
        scheduler.total_executed()
    );

    Ok(())
}

/// Three-level configuration used when no workload file is given: two
/// Round-Robin tiers over an FCFS tail.
fn default_workload() -> WorkloadSpec {
    WorkloadSpec {
        seed: None,
        levels: vec![
            LevelSpec {
                capacity: 4,
                quantum: 8,
                serve_budget: 32,
            },
            LevelSpec {
                capacity: 4,
                quantum: 16,
                serve_budget: 64,
            },
            LevelSpec {
                capacity: 8,
                quantum: 0,
                serve_budget: 128,
            },
        ],
        processes: ProcessesSpec::Count(20),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
