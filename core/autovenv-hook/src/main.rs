//! autovenv-hook: per-prompt CLI for automatic virtual environment
//! lifecycle management.
//!
//! The shell integration invokes `scan` from a precmd hook on every
//! prompt and evals whatever the command prints. Stdout therefore carries
//! only shell code; diagnostics go to a log file.
//!
//! ## Subcommands
//!
//! - `scan`: run one lifecycle step for the current directory
//! - `find`: print the marker directory a scan would use

mod find;
mod logging;
mod scan;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "autovenv-hook")]
#[command(about = "Automatic virtual environment lifecycle for the shell")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one lifecycle step (called by shell precmd hooks; prints shell
    /// code for the caller to eval)
    Scan {
        /// Absolute path to current working directory
        #[arg(value_name = "PATH")]
        path: String,

        /// Shell process ID
        #[arg(value_name = "PID")]
        pid: u32,
    },

    /// Print the marker directory that would be activated from a path
    Find {
        /// Absolute path to start the search from
        #[arg(value_name = "PATH")]
        path: String,
    },
}

fn main() {
    let _logging_guard = logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { path, pid } => {
            // Scanning is non-critical - log errors but exit 0 to not disrupt shell
            if let Err(e) = scan::run(&path, pid) {
                tracing::warn!(error = %e, "autovenv-hook scan failed");
            }
        }
        Commands::Find { path } => match find::run(&path) {
            Some(marker) => println!("{}", marker.display()),
            None => std::process::exit(1),
        },
    }
}
