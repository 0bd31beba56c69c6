//! Status classification.
//!
//! Boards carry status as free text typed by humans, so categorisation is
//! keyword matching over the label. The matcher sits behind the `Classifier`
//! trait so a structured status column could replace it later without
//! touching the report renderer.

use crate::item::Item;

/// The five status buckets a report understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    Completed,
    WorkingOnIt,
    InProgress,
    Stuck,
    NotStarted,
}

impl StatusCategory {
    /// Glyph used as the per-line status marker and in section headings.
    pub fn glyph(self) -> &'static str {
        match self {
            StatusCategory::Completed => "✅",
            StatusCategory::WorkingOnIt => "🟡",
            StatusCategory::InProgress => "🚧",
            StatusCategory::Stuck => "⛔",
            StatusCategory::NotStarted => "🕒",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusCategory::Completed => "Completed",
            StatusCategory::WorkingOnIt => "Working on it",
            StatusCategory::InProgress => "In Progress",
            StatusCategory::Stuck => "Stuck",
            StatusCategory::NotStarted => "Not Started",
        }
    }
}

/// Maps an item to its status bucket.
///
/// Total: every item lands in exactly one category, whatever the label says.
pub trait Classifier {
    fn classify(&self, item: &Item) -> StatusCategory;
}

/// Case-insensitive keyword matcher over the free-text label.
///
/// Precedence: done/complete, then stuck, then "working on it", then
/// progress. Anything else, including an empty label, is NotStarted.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordClassifier;

impl Classifier for KeywordClassifier {
    fn classify(&self, item: &Item) -> StatusCategory {
        let status = item.status.to_lowercase();
        if status.contains("done") || status.contains("complete") {
            StatusCategory::Completed
        } else if status.contains("stuck") {
            StatusCategory::Stuck
        } else if status.contains("working on it") {
            StatusCategory::WorkingOnIt
        } else if status.contains("progress") {
            StatusCategory::InProgress
        } else {
            StatusCategory::NotStarted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(status: &str) -> StatusCategory {
        KeywordClassifier.classify(&Item::new("t", status))
    }

    #[test]
    fn test_keyword_buckets() {
        assert_eq!(classify("Done"), StatusCategory::Completed);
        assert_eq!(classify("complete"), StatusCategory::Completed);
        assert_eq!(classify("Completed ✓"), StatusCategory::Completed);
        assert_eq!(classify("Stuck"), StatusCategory::Stuck);
        assert_eq!(classify("Working on it"), StatusCategory::WorkingOnIt);
        assert_eq!(classify("In Progress"), StatusCategory::InProgress);
        assert_eq!(classify("progress"), StatusCategory::InProgress);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("DONE"), StatusCategory::Completed);
        assert_eq!(classify("wOrKiNg On It"), StatusCategory::WorkingOnIt);
        assert_eq!(classify("STUCK!"), StatusCategory::Stuck);
    }

    #[test]
    fn test_unknown_and_empty_are_not_started() {
        assert_eq!(classify(""), StatusCategory::NotStarted);
        assert_eq!(classify("Waiting on review"), StatusCategory::NotStarted);
        assert_eq!(classify("???"), StatusCategory::NotStarted);
    }

    #[test]
    fn test_precedence() {
        // done/complete wins over everything else in the label.
        assert_eq!(classify("done but stuck on docs"), StatusCategory::Completed);
        // stuck wins over progress.
        assert_eq!(classify("stuck in progress"), StatusCategory::Stuck);
        // "working on it" wins over the bare "progress" match.
        assert_eq!(
            classify("working on it, slow progress"),
            StatusCategory::WorkingOnIt
        );
    }
}
