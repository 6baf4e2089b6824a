//! Weft CLI - run and inspect dataflow graph files.

mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use weft_core::logging::{LogLevel, Logger};

/// Weft - parallel dataflow graph execution.
#[derive(Parser)]
#[command(name = "weft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a graph JSON file to completion
    Run {
        /// Path to the graph JSON file
        file: String,

        /// Worker thread count (default: hardware concurrency)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Print a per-node timing report after the run
        #[arg(short, long)]
        profile: bool,

        /// Seed the workspace before the run (repeatable)
        #[arg(short, long, value_name = "KEY=JSON")]
        input: Vec<String>,
    },

    /// Check that a graph file loads and plans cleanly
    Validate {
        /// Path to the graph JSON file
        file: String,
    },

    /// Print the dependency tree of a graph file
    Print {
        /// Path to the graph JSON file
        file: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LogLevel::Warn,
        1 => LogLevel::Info,
        _ => LogLevel::Debug,
    };
    Logger::global().set_level(level);

    weft_nodes::register_builtin_nodes();

    let result = match cli.command {
        Commands::Run {
            file,
            threads,
            profile,
            input,
        } => commands::run::run(&file, threads, profile, &input),
        Commands::Validate { file } => commands::validate::run(&file),
        Commands::Print { file } => commands::print::run(&file),
    };

    Logger::global().flush();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
