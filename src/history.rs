use crate::dates::display_for_key;
use crate::models::{Entry, EntryMap, History, HistoryItem, Status};

pub const PREVIEW_CHARS: usize = 140;
pub const TRUNCATION_MARKER: &str = "…";
pub const NO_TOPICS: &str = "No topics saved";
pub const EMPTY_HISTORY: &str = "No past entries yet. Your saved days will appear here.";
pub const UNSET: &str = "--";

/// Check-out dominates check-in. Empty strings count as unrecorded.
pub fn derive_status(entry: &Entry) -> Status {
    let recorded = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());
    if recorded(&entry.check_out) {
        Status::Completed
    } else if recorded(&entry.check_in) {
        Status::Active
    } else {
        Status::NotStarted
    }
}

pub fn preview(topics: Option<&str>) -> Option<String> {
    let topics = topics.filter(|t| !t.is_empty())?;
    match topics.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => Some(format!("{}{TRUNCATION_MARKER}", &topics[..cut])),
        None => Some(topics.to_string()),
    }
}

/// Newest day first.
pub fn render_list(entries: &EntryMap) -> History {
    if entries.is_empty() {
        return History::Empty {
            message: EMPTY_HISTORY.to_string(),
        };
    }

    let shown = |value: &Option<String>| {
        value
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(UNSET)
            .to_string()
    };
    let items = entries
        .iter()
        .rev()
        .map(|(key, entry)| HistoryItem {
            key: key.clone(),
            display_date: display_for_key(key),
            check_in: shown(&entry.check_in),
            check_out: shown(&entry.check_out),
            status: derive_status(entry),
            preview: preview(entry.topics.as_deref()),
        })
        .collect();

    History::Items { items }
}
