//! Report building over a board's item forest.
//!
//! Two flows. The hierarchical per-board summary renders four fixed sections,
//! each a filtered tree walk: Completed is strict (an item shows only when
//! its entire subtree is done), every other category is permissive (an item
//! shows when it or any descendant matches, and then its whole subtree is
//! emitted). Partially stuck or partially started work is actionable and has
//! to surface; partially done work is not a win yet, so it stays hidden.
//! The flat flow partitions top-level items by their own status only and
//! backs the whole-workspace summary and the unfinished-tasks report.
//!
//! Everything here is pure computation over an already-fetched tree: no I/O,
//! no clock reads, no failure modes. Odd input shapes degrade (empty status
//! means NotStarted, no due date means no annotation).

use chrono::NaiveDate;

use crate::item::Item;
use crate::status::{Classifier, KeywordClassifier, StatusCategory};

/// Section order of the hierarchical summary. Fixed.
pub const SUMMARY_SECTIONS: [StatusCategory; 4] = [
    StatusCategory::Completed,
    StatusCategory::WorkingOnIt,
    StatusCategory::Stuck,
    StatusCategory::NotStarted,
];

/// Placeholder body for a section with no matching items.
pub const EMPTY_SECTION: &str = "_None._";

/// One rendered report section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub category: StatusCategory,
    pub lines: Vec<String>,
}

impl Section {
    /// Section body: the joined lines, or the placeholder when empty.
    pub fn body(&self) -> String {
        if self.lines.is_empty() {
            EMPTY_SECTION.to_string()
        } else {
            self.lines.join("\n")
        }
    }
}

/// Builds reports for one point in time.
///
/// `today` anchors the overdue check; the caller takes it from the configured
/// report time zone. Swap the classifier to change how free-text statuses
/// map to buckets.
pub struct ReportBuilder<C = KeywordClassifier> {
    classifier: C,
    today: NaiveDate,
}

impl ReportBuilder<KeywordClassifier> {
    pub fn new(today: NaiveDate) -> Self {
        ReportBuilder {
            classifier: KeywordClassifier,
            today,
        }
    }
}

impl<C: Classifier> ReportBuilder<C> {
    pub fn with_classifier(classifier: C, today: NaiveDate) -> Self {
        ReportBuilder { classifier, today }
    }

    fn classify(&self, item: &Item) -> StatusCategory {
        self.classifier.classify(item)
    }

    /// True iff the item and every descendant sit in `category`.
    pub fn all_match(&self, item: &Item, category: StatusCategory) -> bool {
        self.classify(item) == category
            && item.subitems.iter().all(|sub| self.all_match(sub, category))
    }

    /// True iff the item or any descendant sits in `category`.
    pub fn any_match(&self, item: &Item, category: StatusCategory) -> bool {
        self.classify(item) == category
            || item.subitems.iter().any(|sub| self.any_match(sub, category))
    }

    /// Whether a top-level item belongs in the `category` section at all.
    fn qualifies(&self, item: &Item, category: StatusCategory) -> bool {
        if category == StatusCategory::Completed {
            self.all_match(item, StatusCategory::Completed)
        } else {
            self.any_match(item, category)
        }
    }

    /// Render the items that qualify for `category`, one line per emitted
    /// item, input order preserved.
    pub fn render(&self, items: &[Item], category: StatusCategory) -> Vec<String> {
        let mut lines = Vec::new();
        for item in items {
            if self.qualifies(item, category) {
                self.render_item(item, category, &[], &mut lines);
            }
        }
        lines
    }

    fn render_item(
        &self,
        item: &Item,
        category: StatusCategory,
        trail: &[bool],
        lines: &mut Vec<String>,
    ) {
        lines.push(format!(
            "{} {}{} – {}",
            prefix(trail),
            item.name,
            self.due_token(item),
            self.classify(item).glyph()
        ));
        // Under Completed only fully-done subtrees are emitted; under every
        // other category the whole subtree stays visible once the parent is
        // in.
        let kept: Vec<&Item> = item
            .subitems
            .iter()
            .filter(|sub| {
                category != StatusCategory::Completed
                    || self.all_match(sub, StatusCategory::Completed)
            })
            .collect();
        for (i, sub) in kept.iter().enumerate() {
            let mut sub_trail = trail.to_vec();
            sub_trail.push(i + 1 == kept.len());
            self.render_item(sub, category, &sub_trail, lines);
        }
    }

    /// The four hierarchical summary sections, fixed order.
    pub fn build_sections(&self, items: &[Item]) -> Vec<Section> {
        SUMMARY_SECTIONS
            .iter()
            .map(|&category| Section {
                category,
                lines: self.render(items, category),
            })
            .collect()
    }

    /// Due-date annotation: a Slack date token, marked overdue when the date
    /// is strictly before the start of today. Empty when the item has none.
    fn due_token(&self, item: &Item) -> String {
        match item.due {
            None => String::new(),
            Some(due) => {
                let marker = if due < self.today { "🔴" } else { "🟢" };
                format!(" ({} Due: *{}*)", marker, slack_date(due))
            }
        }
    }

    /// Partition top-level items by their own category only; subitems do not
    /// influence grouping here.
    pub fn partition<'a>(&self, items: &'a [Item]) -> Partition<'a> {
        let mut partition = Partition::default();
        for item in items {
            match self.classify(item) {
                StatusCategory::Completed => partition.completed.push(item),
                StatusCategory::WorkingOnIt => partition.working_on_it.push(item),
                StatusCategory::InProgress => partition.in_progress.push(item),
                StatusCategory::Stuck => partition.stuck.push(item),
                StatusCategory::NotStarted => partition.not_started.push(item),
            }
        }
        partition
    }
}

/// Slack mrkdwn date token; renders client-side in the reader's locale and
/// falls back to the ISO date.
fn slack_date(due: NaiveDate) -> String {
    let ts = due.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();
    format!("<!date^{ts}^{{date_short}}|{due}>")
}

/// Depth prefix: `•` for top-level items, then `├`/`└` connectors with `│`
/// continuation columns for still-open ancestor levels.
fn prefix(trail: &[bool]) -> String {
    match trail.split_last() {
        None => "•".to_string(),
        Some((last, ancestors)) => {
            let mut p = String::new();
            for &ancestor_last in ancestors {
                p.push_str(if ancestor_last { "   " } else { "│  " });
            }
            p.push(if *last { '└' } else { '├' });
            p
        }
    }
}

/// Flat five-way split of a board's top-level items.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    pub completed: Vec<&'a Item>,
    pub in_progress: Vec<&'a Item>,
    pub working_on_it: Vec<&'a Item>,
    pub not_started: Vec<&'a Item>,
    pub stuck: Vec<&'a Item>,
}

impl<'a> Partition<'a> {
    /// Everything not completed, stuck first. Relative order inside each
    /// bucket is the board order.
    pub fn unfinished(&self) -> Vec<&'a Item> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.stuck);
        out.extend_from_slice(&self.in_progress);
        out.extend_from_slice(&self.working_on_it);
        out.extend_from_slice(&self.not_started);
        out
    }
}

/// One flat report line: bold name plus whichever annotations the item has.
pub fn flat_line(item: &Item) -> String {
    let mut line = format!("*{}*", item.name);
    if let Some(ref assignee) = item.assignee {
        line.push_str(&format!(" (Assignee: {assignee})"));
    }
    if let Some(due) = item.due {
        line.push_str(&format!(" (Due: {due})"));
    }
    if let Some(ref board) = item.board {
        line.push_str(&format!(" _(Board: {board})_"));
    }
    line
}

/// Flat list body, or the placeholder when empty.
pub fn flat_list(items: &[&Item]) -> String {
    if items.is_empty() {
        EMPTY_SECTION.to_string()
    } else {
        items
            .iter()
            .map(|item| flat_line(item))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 27).unwrap()
    }

    fn builder() -> ReportBuilder {
        ReportBuilder::new(today())
    }

    fn parent(name: &str, status: &str, subitems: Vec<Item>) -> Item {
        Item {
            subitems,
            ..Item::new(name, status)
        }
    }

    #[test]
    fn test_all_match_requires_whole_subtree() {
        let b = builder();
        let done = parent("A", "Done", vec![Item::new("B", "Done")]);
        assert!(b.all_match(&done, StatusCategory::Completed));

        let mixed = parent("A", "Done", vec![Item::new("B", "Working on it")]);
        assert!(!b.all_match(&mixed, StatusCategory::Completed));
        // A child cannot make a non-matching parent all_match.
        let parent_open = parent("A", "", vec![Item::new("B", "Done")]);
        assert!(!b.all_match(&parent_open, StatusCategory::Completed));
    }

    #[test]
    fn test_any_match_sees_deep_descendants() {
        let b = builder();
        let item = parent(
            "A",
            "Done",
            vec![parent("B", "Done", vec![Item::new("C", "Stuck")])],
        );
        assert!(b.any_match(&item, StatusCategory::Stuck));
        assert!(b.any_match(&item, StatusCategory::Completed));
        assert!(!b.any_match(&item, StatusCategory::InProgress));
    }

    #[test]
    fn test_completed_section_is_strict() {
        let b = builder();
        // Fully done subtree: both lines appear.
        let items = vec![parent("A", "Done", vec![Item::new("B", "Done")])];
        let lines = b.render(&items, StatusCategory::Completed);
        assert_eq!(lines, vec!["• A – ✅", "└ B – ✅"]);

        // One unfinished child hides the whole tree from Completed.
        let items = vec![parent("A", "Done", vec![Item::new("B", "Working on it")])];
        assert!(b.render(&items, StatusCategory::Completed).is_empty());
    }

    #[test]
    fn test_permissive_sections_show_full_subtree() {
        let b = builder();
        // Parent qualifies through its child; the done sibling is still
        // emitted so the reader sees the whole tree.
        let items = vec![parent(
            "A",
            "Done",
            vec![Item::new("B", "Working on it"), Item::new("C", "Done")],
        )];
        let lines = b.render(&items, StatusCategory::WorkingOnIt);
        assert_eq!(lines, vec!["• A – ✅", "├ B – 🟡", "└ C – ✅"]);
    }

    #[test]
    fn test_non_matching_tree_is_skipped() {
        let b = builder();
        let items = vec![parent("A", "Done", vec![Item::new("B", "Done")])];
        assert!(b.render(&items, StatusCategory::Stuck).is_empty());
    }

    #[test]
    fn test_tree_prefixes_at_depth_two() {
        let b = builder();
        let items = vec![parent(
            "A",
            "Stuck",
            vec![
                parent("B", "Stuck", vec![Item::new("C", "Stuck")]),
                Item::new("D", "Stuck"),
            ],
        )];
        let lines = b.render(&items, StatusCategory::Stuck);
        // B is not the last sibling, so C's row keeps the continuation bar.
        assert_eq!(lines, vec!["• A – ⛔", "├ B – ⛔", "│  └ C – ⛔", "└ D – ⛔"]);
    }

    #[test]
    fn test_input_order_preserved() {
        let b = builder();
        let items = vec![
            Item::new("Zeta", "Stuck"),
            Item::new("Alpha", "Stuck"),
            Item::new("Mid", "Stuck"),
        ];
        let lines = b.render(&items, StatusCategory::Stuck);
        assert_eq!(lines, vec!["• Zeta – ⛔", "• Alpha – ⛔", "• Mid – ⛔"]);
    }

    #[test]
    fn test_sections_fixed_order_and_placeholder() {
        let b = builder();
        let items = vec![Item::new("A", "Stuck")];
        let sections = b.build_sections(&items);
        let order: Vec<StatusCategory> = sections.iter().map(|s| s.category).collect();
        assert_eq!(order, SUMMARY_SECTIONS.to_vec());
        assert_eq!(sections[0].body(), EMPTY_SECTION);
        assert_eq!(sections[2].body(), "• A – ⛔");
    }

    #[test]
    fn test_due_markers() {
        let b = builder();
        let mut overdue = Item::new("A", "Stuck");
        overdue.due = NaiveDate::from_ymd_opt(2026, 8, 20);
        let mut upcoming = Item::new("B", "Stuck");
        upcoming.due = NaiveDate::from_ymd_opt(2026, 9, 3);
        let mut today_item = Item::new("C", "Stuck");
        today_item.due = Some(today());

        let lines = b.render(&[overdue, upcoming, today_item], StatusCategory::Stuck);
        assert!(lines[0].contains("🔴"));
        assert!(lines[0].contains("|2026-08-20>"));
        assert!(lines[1].contains("🟢"));
        // Due today is not overdue.
        assert!(lines[2].contains("🟢"));
    }

    #[test]
    fn test_unfinished_order() {
        let b = builder();
        let items = vec![
            Item::new("ws1", "Working on it"),
            Item::new("done", "Done"),
            Item::new("np1", "In Progress"),
            Item::new("st1", "Stuck"),
            Item::new("ns1", ""),
            Item::new("st2", "Stuck"),
        ];
        let partition = b.partition(&items);
        let names: Vec<&str> = partition
            .unfinished()
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        // Category order Stuck, InProgress, WorkingOnIt, NotStarted; original
        // relative order kept inside each bucket.
        assert_eq!(names, vec!["st1", "st2", "np1", "ws1", "ns1"]);
        assert_eq!(partition.completed.len(), 1);
    }

    #[test]
    fn test_flat_line_annotations() {
        let mut item = Item::new("Ship", "Stuck");
        assert_eq!(flat_line(&item), "*Ship*");
        item.assignee = Some("Dana".into());
        item.due = NaiveDate::from_ymd_opt(2026, 9, 1);
        item.board = Some("Launch".into());
        assert_eq!(
            flat_line(&item),
            "*Ship* (Assignee: Dana) (Due: 2026-09-01) _(Board: Launch)_"
        );
    }

    #[test]
    fn test_flat_list_placeholder() {
        assert_eq!(flat_list(&[]), EMPTY_SECTION);
    }

    #[test]
    fn test_custom_classifier() {
        // A structured-status stand-in: exact label match instead of
        // keywords. The rendering logic is untouched by the swap.
        struct Exact;
        impl Classifier for Exact {
            fn classify(&self, item: &Item) -> StatusCategory {
                match item.status.as_str() {
                    "done" => StatusCategory::Completed,
                    "stuck" => StatusCategory::Stuck,
                    _ => StatusCategory::NotStarted,
                }
            }
        }

        let b = ReportBuilder::with_classifier(Exact, today());
        // "Done but stuck" matches no exact label, so it is NotStarted here.
        let items = vec![Item::new("A", "Done but stuck"), Item::new("B", "stuck")];
        assert!(b.render(&items, StatusCategory::Completed).is_empty());
        assert_eq!(b.render(&items, StatusCategory::Stuck), vec!["• B – ⛔"]);
        assert_eq!(
            b.render(&items, StatusCategory::NotStarted),
            vec!["• A – 🕒"]
        );
    }
}
