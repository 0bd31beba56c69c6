//! Local to-do list.
//!
//! A flat JSON file of entries, unrelated to the board reports; it ships in
//! the same binary because the original tool did. Indices shown to the user
//! are 1-based.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{Local, LocalResult, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FILE: &str = "todo.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoEntry {
    pub task: String,
    #[serde(default)]
    pub done: bool,
    pub created_at_utc: i64,
}

impl TodoEntry {
    /// Creation time rendered in the local zone.
    pub fn created_local(&self) -> String {
        match Local.timestamp_opt(self.created_at_utc, 0) {
            LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
            _ => "-".to_string(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TodoList {
    pub entries: Vec<TodoEntry>,
}

impl TodoList {
    /// Load from JSON; a missing file is an empty list.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(TodoList::default());
        }
        let buf = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&buf).with_context(|| format!("parsing {}", path.display()))
    }

    /// Save via temp file + rename so a crash mid-write can't eat the list.
    pub fn save(&self, path: &Path) -> Result<()> {
        let tmp = path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(self)?;
        let mut f = File::create(&tmp)
            .with_context(|| format!("creating {}", tmp.display()))?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(&tmp, path)
            .with_context(|| format!("replacing {}", path.display()))?;
        Ok(())
    }

    pub fn add(&mut self, task: String) {
        self.entries.push(TodoEntry {
            task,
            done: false,
            created_at_utc: Utc::now().timestamp(),
        });
    }

    /// Mark entry `number` (1-based) done.
    pub fn mark_done(&mut self, number: usize) -> Result<&TodoEntry> {
        let len = self.entries.len();
        match number.checked_sub(1).and_then(|i| self.entries.get_mut(i)) {
            Some(entry) => {
                entry.done = true;
                Ok(entry)
            }
            None => bail!("no task #{number} (list has {len})"),
        }
    }

    /// Remove and return entry `number` (1-based).
    pub fn remove(&mut self, number: usize) -> Result<TodoEntry> {
        if number == 0 || number > self.entries.len() {
            bail!("no task #{number} (list has {})", self.entries.len());
        }
        Ok(self.entries.remove(number - 1))
    }
}
