//! MemDB CLI
//!
//! Front end for the MemDB in-memory key-value engine.
//!
//! # Commands
//!
//! - `shell` - Interactive prompt (the default when no command is given)
//! - `run` - Execute a script file, one statement per line
//! - `version` - Show version information

mod commands;
mod config;
mod driver;
mod error;
mod report;

use clap::{Parser, Subcommand};
use config::{ShellConfig, StatsFormat, DEFAULT_PROMPT};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// MemDB: an in-memory key-value store with nested transactions.
#[derive(Parser)]
#[command(name = "memdb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging on stderr
    #[arg(global = true, short, long)]
    verbose: bool,

    /// Print session statistics when the session ends
    #[arg(global = true, long)]
    stats: bool,

    /// Statistics output format
    #[arg(global = true, long, value_enum, default_value = "text")]
    format: StatsFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell
    Shell {
        /// Prompt shown before each statement
        #[arg(short, long, default_value = DEFAULT_PROMPT)]
        prompt: String,

        /// Do not show a prompt
        #[arg(long, conflicts_with = "prompt")]
        no_prompt: bool,
    },

    /// Execute the statements of a script file
    Run {
        /// Path to the script
        path: PathBuf,

        /// Stop at the first failing statement
        #[arg(long)]
        fail_fast: bool,

        /// Write each statement before its result
        #[arg(short, long)]
        echo: bool,
    },

    /// Show version information
    Version,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for statement results.
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let command = cli.command.unwrap_or(Commands::Shell {
        prompt: DEFAULT_PROMPT.to_string(),
        no_prompt: false,
    });

    match command {
        Commands::Shell { prompt, no_prompt } => {
            let config = ShellConfig::new()
                .prompt(prompt)
                .show_stats(cli.stats)
                .stats_format(cli.format);
            let config = if no_prompt { config.no_prompt() } else { config };
            commands::shell::run(&config)?;
        }
        Commands::Run {
            path,
            fail_fast,
            echo,
        } => {
            let config = ShellConfig::script()
                .fail_fast(fail_fast)
                .echo(echo)
                .show_stats(cli.stats)
                .stats_format(cli.format);
            let mut stdout = io::stdout().lock();
            if let Err(err) = commands::run::run(&path, &config, &mut stdout) {
                eprintln!("{err}");
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Version => {
            println!("MemDB CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("MemDB Core v{}", memdb_core::VERSION);
        }
    }

    Ok(ExitCode::SUCCESS)
}
