//! Board and item data model.
//!
//! An `Item` is one task or subitem on a status board. Items own their
//! subitems directly, so a board is a forest of trees with no sharing and no
//! cycles. One report request works over one such forest and never mutates
//! it; the data is fetched fresh (or read from a file) per report.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One task or subitem node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    /// Free-text status label, e.g. "Done" or "Working on it". Empty means
    /// no status has been set yet.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub due: Option<NaiveDate>,
    #[serde(default)]
    pub assignee: Option<String>,
    /// Board the item came from. Set on whole-workspace reports so flat
    /// report lines can carry a board suffix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subitems: Vec<Item>,
}

impl Item {
    /// Leaf item with just a name and status label.
    pub fn new(name: &str, status: &str) -> Self {
        Item {
            name: name.to_string(),
            status: status.to_string(),
            due: None,
            assignee: None,
            board: None,
            subitems: Vec::new(),
        }
    }
}

/// Top-level board document, the shape `--input` JSON files use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardDoc {
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Board id/name pair from the boards listing.
#[derive(Debug, Clone)]
pub struct BoardRef {
    pub id: String,
    pub name: String,
}
