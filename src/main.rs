//! Robobattle CLI - run headless robot battles and inspect the equipment table.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{ArgAction, Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Robobattle - a deterministic turn-based robot combat engine
#[derive(Parser, Debug)]
#[command(name = "robobattle")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a single headless battle
    Run {
        #[command(flatten)]
        setup: cli::MatchSetup,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Only print the result, not the battle log
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run many seeded battles in parallel and aggregate statistics
    Tournament {
        #[command(flatten)]
        setup: cli::MatchSetup,

        /// Number of battles to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each battle)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::TournamentFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// List the equipment catalog
    Catalog {
        /// Equipment catalog JSON file (default: built-in table)
        #[arg(long)]
        catalog: Option<std::path::PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match args.command {
        Commands::Run {
            setup,
            seed,
            format,
            quiet,
        } => cli::run::execute(&setup, seed, format, quiet),

        Commands::Tournament {
            setup,
            games,
            seed,
            threads,
            format,
            progress,
        } => cli::tournament::execute(&setup, games, seed, threads, format, progress),

        Commands::Catalog { catalog, format } => cli::catalog::execute(catalog.as_deref(), format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
