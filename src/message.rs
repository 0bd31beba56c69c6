//! Slack message assembly.
//!
//! Builds the Block Kit payload the reports post or print: header, divider,
//! one mrkdwn section per report section, and a "Last updated" context
//! footer stamped in the report time zone. Only the block shapes the reports
//! actually use are modelled here.

use anyhow::{Context, Result};
use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use serde_json::json;

use crate::report::{flat_list, Partition, Section};
use crate::status::StatusCategory;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header { text: Text },
    Divider,
    Section { text: Text },
    Context { elements: Vec<Text> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Text {
    PlainText { text: String },
    Mrkdwn { text: String },
}

impl Block {
    fn header(text: &str) -> Block {
        Block::Header {
            text: Text::PlainText {
                text: text.to_string(),
            },
        }
    }

    fn section(text: String) -> Block {
        Block::Section {
            text: Text::Mrkdwn { text },
        }
    }
}

impl Text {
    /// The raw text, whatever the flavour.
    pub fn raw(&self) -> &str {
        match self {
            Text::PlainText { text } | Text::Mrkdwn { text } => text,
        }
    }
}

fn section_heading(category: StatusCategory, body: String) -> Block {
    Block::section(format!(
        "*{} {}:*\n{}",
        category.glyph(),
        category.label(),
        body
    ))
}

fn last_updated(now: DateTime<Tz>) -> Block {
    Block::Context {
        elements: vec![Text::Mrkdwn {
            text: format!("Last updated: {}", now.format("%Y-%m-%d %H:%M %Z")),
        }],
    }
}

/// Hierarchical per-board summary message.
pub fn summary_message(board: &str, sections: &[Section], now: DateTime<Tz>) -> Vec<Block> {
    let mut blocks = vec![Block::header(&format!("📊 {board}")), Block::Divider];
    for section in sections {
        blocks.push(section_heading(section.category, section.body()));
    }
    blocks.push(last_updated(now));
    blocks
}

/// Flat whole-workspace summary message. Unlike the per-board summary this
/// reports In Progress on its own and groups by each item's own status only.
pub fn workspace_summary_message(partition: &Partition, now: DateTime<Tz>) -> Vec<Block> {
    let sections = [
        (StatusCategory::Completed, flat_list(&partition.completed)),
        (StatusCategory::InProgress, flat_list(&partition.in_progress)),
        (StatusCategory::WorkingOnIt, flat_list(&partition.working_on_it)),
        (StatusCategory::NotStarted, flat_list(&partition.not_started)),
    ];
    let mut blocks = vec![
        Block::header("📊 Project Summary (All Boards)"),
        Block::Divider,
    ];
    for (category, body) in sections {
        blocks.push(section_heading(category, body));
    }
    blocks.push(last_updated(now));
    blocks
}

/// Unfinished-tasks message for one board or the whole workspace.
pub fn unfinished_message(scope: &str, body: &str, now: DateTime<Tz>) -> Vec<Block> {
    vec![
        Block::header(&format!("🚩 Unfinished Tasks ({scope})")),
        Block::Divider,
        Block::section(body.to_string()),
        last_updated(now),
    ]
}

/// Webhook payload: plain-text fallback plus the block list.
pub fn payload(fallback: &str, blocks: &[Block]) -> serde_json::Value {
    json!({ "text": fallback, "blocks": blocks })
}

/// Post the payload to a Slack incoming webhook.
pub fn post_webhook(url: &str, fallback: &str, blocks: &[Block]) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    client
        .post(url)
        .json(&payload(fallback, blocks))
        .send()
        .context("posting to webhook")?
        .error_for_status()
        .context("webhook rejected the message")?;
    Ok(())
}

/// Plain-terminal rendering of a block payload, for runs without a webhook.
pub fn render_text(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            Block::Header { text } | Block::Section { text } => {
                out.push_str(text.raw());
                out.push('\n');
            }
            Block::Divider => out.push_str("――――――――――――――――――――\n"),
            Block::Context { elements } => {
                for element in elements {
                    out.push_str(element.raw());
                    out.push('\n');
                }
            }
        }
    }
    out
}
