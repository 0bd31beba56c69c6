//! # boardbot - Monday.com board reports from the terminal
//!
//! A small CLI companion for teams that track work on Monday.com boards and
//! talk in Slack. It fetches a board's items and subitems, buckets them by
//! their free-text status, and renders status reports:
//!
//! - **Summary**: four hierarchical sections (Completed, Working on it,
//!   Stuck, Not Started) over the full item tree of one board, or a flat
//!   all-boards digest.
//! - **Unfinished**: everything that still needs attention, stuck tasks
//!   first.
//!
//! Reports print to the terminal, dump as a Slack Block Kit JSON payload, or
//! post straight to an incoming webhook. A `--input board.json` flag swaps
//! the API for a local file, which is also handy in CI.
//!
//! The binary also carries a tiny file-backed to-do list (`boardbot todo`),
//! kept from the repository this tool grew out of.
//!
//! ## Quick start
//!
//! ```bash
//! export MONDAY_API_TOKEN=...   # or put it in .env
//! boardbot boards
//! boardbot summary --board 4321098765
//! boardbot unfinished --post    # needs SLACK_WEBHOOK_URL
//! boardbot todo add "rotate the API token"
//! ```
//!
//! Configuration comes from the environment: `MONDAY_API_TOKEN`,
//! `SLACK_WEBHOOK_URL`, and `TIMEZONE` (IANA name, default
//! America/New_York).

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod config;
pub mod item;
pub mod message;
pub mod monday;
pub mod report;
pub mod status;
pub mod todo;

use cli::Cli;
use cmd::Commands;
use config::Config;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        // These two never touch the network or the environment.
        Commands::Completions { shell } => {
            cmd::cmd_completions(shell);
            Ok(())
        }
        Commands::Todo { file, action } => cmd::cmd_todo(&file, action),

        Commands::Summary {
            board,
            input,
            json,
            post,
        } => {
            let config = Config::from_env(cli.timezone.as_deref())?;
            cmd::cmd_summary(&config, board, input, json, post)
        }
        Commands::Unfinished {
            board,
            input,
            json,
            post,
        } => {
            let config = Config::from_env(cli.timezone.as_deref())?;
            cmd::cmd_unfinished(&config, board, input, json, post)
        }
        Commands::Boards => {
            let config = Config::from_env(cli.timezone.as_deref())?;
            cmd::cmd_boards(&config)
        }
    }
}
