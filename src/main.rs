use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use blocktree::bench::{self, BenchConfig};
use blocktree::menu::Menu;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "blocktree", about = "Order-statistics tree over fixed-capacity leaf blocks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive menu around a single tree.
    Menu {
        /// Leaf capacity of the tree.
        #[arg(long, default_value_t = 16)]
        capacity: usize,
    },
    /// Run the timing harness and write a report.
    Bench {
        /// Report destination.
        #[arg(long, default_value = "benchmark.txt")]
        output: PathBuf,
        /// Input sizes to sweep.
        #[arg(long, value_delimiter = ',', default_values_t = vec![5usize, 50, 500])]
        sizes: Vec<usize>,
        /// Leaf capacity of the benchmarked trees.
        #[arg(long, default_value_t = 16)]
        capacity: usize,
        /// Generator seed.
        #[arg(long, default_value_t = 0x5EED)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Menu { capacity } => run_menu(capacity)?,
        Commands::Bench {
            output,
            sizes,
            capacity,
            seed,
        } => run_bench(output, sizes, capacity, seed)?,
    }

    Ok(())
}

fn run_menu(capacity: usize) -> Result<()> {
    let mut menu: Menu<i64> = Menu::new(capacity);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();
    menu.run(&mut input, &mut output)
        .context("menu session failed")
}

fn run_bench(output: PathBuf, sizes: Vec<usize>, capacity: usize, seed: u64) -> Result<()> {
    let config = BenchConfig {
        sizes,
        capacity,
        seed,
    };
    let report = bench::run(&config);
    bench::write_report(&report, &output)
        .with_context(|| format!("failed to write report to {}", output.display()))?;
    println!("Benchmark complete. Report written to {}.", output.display());
    Ok(())
}
