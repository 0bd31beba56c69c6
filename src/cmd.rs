//! Command implementations for the CLI interface.
//!
//! Each subcommand resolves its board input (API or `--input` file), hands
//! the tree to the report builder, and sends the assembled blocks to the
//! terminal, stdout as JSON, or a Slack webhook.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;

use crate::cli::Cli;
use crate::config::Config;
use crate::item::{BoardDoc, Item};
use crate::message::{self, Block};
use crate::monday::MondayClient;
use crate::report::{flat_list, ReportBuilder};
use crate::todo::{TodoList, DEFAULT_FILE};

#[derive(Subcommand)]
pub enum Commands {
    /// Board status summary: four hierarchical sections for one board, or a
    /// flat all-boards digest when no board is selected.
    Summary {
        /// Board ID to report on.
        #[arg(long)]
        board: Option<String>,
        /// Read the board from a JSON document instead of the API.
        #[arg(long, conflicts_with = "board")]
        input: Option<PathBuf>,
        /// Print the Slack block payload as JSON instead of text.
        #[arg(long)]
        json: bool,
        /// Post to the Slack webhook from SLACK_WEBHOOK_URL.
        #[arg(long)]
        post: bool,
    },

    /// Unfinished tasks: stuck, in progress, working on it, not started.
    Unfinished {
        /// Board ID to report on; omit for all boards.
        #[arg(long)]
        board: Option<String>,
        /// Read the board from a JSON document instead of the API.
        #[arg(long, conflicts_with = "board")]
        input: Option<PathBuf>,
        /// Print the Slack block payload as JSON instead of text.
        #[arg(long)]
        json: bool,
        /// Post to the Slack webhook from SLACK_WEBHOOK_URL.
        #[arg(long)]
        post: bool,
    },

    /// List boards visible to the API token.
    Boards,

    /// Local to-do list kept in a JSON file.
    Todo {
        /// Path to the to-do file.
        #[arg(long, default_value = DEFAULT_FILE)]
        file: PathBuf,

        #[command(subcommand)]
        action: TodoAction,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum TodoAction {
    /// Add a task.
    Add {
        /// Task text; multiple words are joined.
        text: Vec<String>,
    },
    /// List tasks with their numbers.
    List,
    /// Mark task number N as done.
    Done { number: usize },
    /// Delete task number N.
    Delete { number: usize },
}

/// Resolved board input for a report command.
enum BoardInput {
    /// One board with its full item tree.
    Single(BoardDoc),
    /// Top-level items from every board, tagged with their board names.
    Workspace(Vec<Item>),
}

fn load_board(
    config: &Config,
    board: Option<String>,
    input: Option<PathBuf>,
) -> Result<BoardInput> {
    if let Some(path) = input {
        let buf = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let doc: BoardDoc =
            serde_json::from_str(&buf).with_context(|| format!("parsing {}", path.display()))?;
        return Ok(BoardInput::Single(doc));
    }
    let client = MondayClient::new(config.require_token()?.to_string());
    match board {
        Some(id) => Ok(BoardInput::Single(client.board(&id)?)),
        None => Ok(BoardInput::Workspace(client.all_items()?)),
    }
}

/// Send the assembled blocks wherever the flags point.
fn emit(config: &Config, blocks: Vec<Block>, fallback: &str, json: bool, post: bool) -> Result<()> {
    if post {
        message::post_webhook(config.require_webhook()?, fallback, &blocks)?;
        println!("Posted to webhook.");
    } else if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&message::payload(fallback, &blocks))?
        );
    } else {
        print!("{}", message::render_text(&blocks));
    }
    Ok(())
}

pub fn cmd_summary(
    config: &Config,
    board: Option<String>,
    input: Option<PathBuf>,
    json: bool,
    post: bool,
) -> Result<()> {
    let builder = ReportBuilder::new(config.today());
    let blocks = match load_board(config, board, input)? {
        BoardInput::Single(doc) => {
            let sections = builder.build_sections(&doc.items);
            message::summary_message(&doc.name, &sections, config.now())
        }
        BoardInput::Workspace(items) => {
            let partition = builder.partition(&items);
            message::workspace_summary_message(&partition, config.now())
        }
    };
    emit(config, blocks, "Project Summary", json, post)
}

pub fn cmd_unfinished(
    config: &Config,
    board: Option<String>,
    input: Option<PathBuf>,
    json: bool,
    post: bool,
) -> Result<()> {
    let builder = ReportBuilder::new(config.today());
    let (scope, items) = match load_board(config, board, input)? {
        BoardInput::Single(doc) => (doc.name, doc.items),
        BoardInput::Workspace(items) => ("All Boards".to_string(), items),
    };
    let partition = builder.partition(&items);
    let body = flat_list(&partition.unfinished());
    let blocks = message::unfinished_message(&scope, &body, config.now());
    emit(config, blocks, "Unfinished Tasks", json, post)
}

pub fn cmd_boards(config: &Config) -> Result<()> {
    let client = MondayClient::new(config.require_token()?.to_string());
    let boards = client.boards()?;
    if boards.is_empty() {
        println!("No boards visible to this token.");
        return Ok(());
    }
    for board in boards {
        println!("{:<14} {}", board.id, board.name);
    }
    Ok(())
}

pub fn cmd_todo(file: &Path, action: TodoAction) -> Result<()> {
    let mut list = TodoList::load(file)?;
    match action {
        TodoAction::Add { text } => {
            let task = text.join(" ");
            if task.trim().is_empty() {
                bail!("task text is empty");
            }
            list.add(task.clone());
            list.save(file)?;
            println!("{}", format!("Added: {task}").blue());
        }
        TodoAction::List => {
            if list.entries.is_empty() {
                println!("Nothing to do.");
                return Ok(());
            }
            for (i, entry) in list.entries.iter().enumerate() {
                let mark = if entry.done { "x" } else { " " };
                let line = format!(
                    "{:>3}. [{}] {} ({})",
                    i + 1,
                    mark,
                    entry.task,
                    entry.created_local()
                );
                if entry.done {
                    println!("{}", line.green());
                } else {
                    println!("{line}");
                }
            }
        }
        TodoAction::Done { number } => {
            let done = list.mark_done(number)?.task.clone();
            list.save(file)?;
            println!("{}", format!("Done: {done}").green());
        }
        TodoAction::Delete { number } => {
            let removed = list.remove(number)?;
            list.save(file)?;
            println!("{}", format!("Removed: {}", removed.task).yellow());
        }
    }
    Ok(())
}

pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "boardbot", &mut io::stdout());
}
