//! Monday.com API client.
//!
//! Two GraphQL queries against `api.monday.com/v2`: the board listing and one
//! board's items with one level of subitems. Column values come back as
//! loose (id, type, text) triples; the mapping into `Item` follows the report
//! core's tolerance rules, so a board with odd columns still reports, it just
//! loses the missing annotations. Network and API failures are real errors.

use chrono::NaiveDate;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::item::{BoardDoc, BoardRef, Item};

const API_URL: &str = "https://api.monday.com/v2";

/// Prefix of the auto-generated mirror boards monday.com keeps subitems in.
/// They duplicate every subitem as a top-level item, so reports skip them.
const SUBITEM_BOARD_PREFIX: &str = "Subitems of";

#[derive(Debug, Error)]
pub enum MondayError {
    #[error("monday.com request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("monday.com returned an error: {0}")]
    Api(String),
    #[error("unexpected monday.com response: {0}")]
    Shape(String),
    #[error("board id must be numeric, got '{0}'")]
    BadBoardId(String),
}

pub struct MondayClient {
    http: reqwest::blocking::Client,
    token: String,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct BoardsData {
    boards: Vec<RawBoard>,
}

#[derive(Debug, Deserialize)]
struct RawBoard {
    #[serde(default)]
    id: String,
    name: String,
    items_page: Option<ItemsPage>,
}

#[derive(Debug, Deserialize)]
struct ItemsPage {
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    name: String,
    #[serde(default)]
    column_values: Vec<RawColumn>,
    #[serde(default)]
    subitems: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawColumn {
    #[serde(default)]
    id: String,
    #[serde(rename = "type", default)]
    kind: String,
    text: Option<String>,
}

/// Text of the first column matching the wanted id or column type,
/// case-insensitive. Boards name columns freely, so both are tried.
fn column_text<'a>(columns: &'a [RawColumn], id: &str, kind: &str) -> Option<&'a str> {
    columns
        .iter()
        .find(|c| c.id.eq_ignore_ascii_case(id) || c.kind.eq_ignore_ascii_case(kind))
        .and_then(|c| c.text.as_deref())
        .filter(|t| !t.is_empty())
}

impl RawItem {
    fn into_item(self) -> Item {
        let status = column_text(&self.column_values, "status", "status").unwrap_or_default();
        let mut item = Item::new(&self.name, status);
        item.due = column_text(&self.column_values, "date", "date")
            .and_then(|t| NaiveDate::parse_from_str(t, "%Y-%m-%d").ok());
        item.assignee = column_text(&self.column_values, "person", "people").map(str::to_string);
        item.subitems = self.subitems.into_iter().map(RawItem::into_item).collect();
        item
    }
}

impl MondayClient {
    pub fn new(token: String) -> Self {
        MondayClient {
            http: reqwest::blocking::Client::new(),
            token,
        }
    }

    fn query<T: DeserializeOwned>(&self, query: &str) -> Result<T, MondayError> {
        let envelope: Envelope<T> = self
            .http
            .post(API_URL)
            .header(AUTHORIZATION, &self.token)
            .json(&json!({ "query": query }))
            .send()?
            .error_for_status()?
            .json()?;
        if let Some(err) = envelope.errors.first() {
            return Err(MondayError::Api(err.message.clone()));
        }
        envelope
            .data
            .ok_or_else(|| MondayError::Shape("response had no data".to_string()))
    }

    /// All boards visible to the token, minus the subitem mirror boards.
    pub fn boards(&self) -> Result<Vec<BoardRef>, MondayError> {
        let data: BoardsData = self.query("query { boards (limit: 100) { id name } }")?;
        Ok(data
            .boards
            .into_iter()
            .filter(|b| !b.name.starts_with(SUBITEM_BOARD_PREFIX))
            .map(|b| BoardRef {
                id: b.id,
                name: b.name,
            })
            .collect())
    }

    /// One board's items with one level of subitems.
    pub fn board(&self, board_id: &str) -> Result<BoardDoc, MondayError> {
        let id: u64 = board_id
            .parse()
            .map_err(|_| MondayError::BadBoardId(board_id.to_string()))?;
        let query = format!(
            "query {{ boards (ids: [{id}]) {{ id name items_page (limit: 50) {{ items {{ \
             name column_values {{ id text type }} \
             subitems {{ name column_values {{ id text type }} }} }} }} }} }}"
        );
        let data: BoardsData = self.query(&query)?;
        let board = data
            .boards
            .into_iter()
            .next()
            .ok_or_else(|| MondayError::Shape(format!("no board with id {id}")))?;
        let items = board
            .items_page
            .map(|page| page.items.into_iter().map(RawItem::into_item).collect())
            .unwrap_or_default();
        Ok(BoardDoc {
            name: board.name,
            items,
        })
    }

    /// Top-level items from every board, each tagged with its board name.
    pub fn all_items(&self) -> Result<Vec<Item>, MondayError> {
        let mut all = Vec::new();
        for board_ref in self.boards()? {
            let doc = self.board(&board_ref.id)?;
            for mut item in doc.items {
                item.board = Some(doc.name.clone());
                all.push(item);
            }
        }
        Ok(all)
    }
}
