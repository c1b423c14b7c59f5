//! Command-line front end for the rectfence solver.
//!
//! Reads an instance (`N K` header, then `N` lines `x y w`) from a file or
//! stdin, runs the sweep solver, and prints the chosen polygon to stdout.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use rectfence::{parse_instance, write_solution, Instance, SaConfig, Solver, SolverConfig};

#[derive(Parser)]
#[command(name = "rectfence")]
#[command(about = "Encloses at least K weighted points with a minimal-cost rectilinear fence")]
#[command(version)]
struct Cli {
    /// Input file; reads stdin when omitted
    input: Option<PathBuf>,

    /// Base RNG seed for reproducible runs
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Largest grid split in the sweep
    #[arg(long, default_value = "110")]
    max_split: u32,

    /// Annealing time budget per trial in milliseconds
    #[arg(long, default_value = "300")]
    sa_budget_ms: u64,

    /// Run trials on the rayon thread pool
    #[arg(short, long)]
    parallel: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let instance = read_instance(cli.input.as_deref())?;
    log::info!(
        "instance: {} points, coverage target {}",
        instance.points.len(),
        instance.coverage_target
    );

    let config = SolverConfig::new()
        .with_seed(cli.seed)
        .with_max_split(cli.max_split)
        .with_parallel(cli.parallel)
        .with_sa(SaConfig::new().with_time_limit(Duration::from_millis(cli.sa_budget_ms)));

    let solution = Solver::new(config)
        .solve(&instance.points, instance.coverage_target)
        .context("solving failed")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_solution(&mut out, &solution).context("writing output failed")?;
    Ok(())
}

fn read_instance(path: Option<&std::path::Path>) -> anyhow::Result<Instance> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open input file {}", path.display()))?;
            Ok(parse_instance(BufReader::new(file))?)
        }
        None => Ok(parse_instance(io::stdin().lock())?),
    }
}
