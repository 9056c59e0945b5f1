use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<String>,
    #[serde(default)]
    pub updated_at: i64,
}

/// Date key (`YYYY-MM-DD`) to the entry recorded for that day.
pub type EntryMap = BTreeMap<String, Entry>;

/// Fields to overwrite on upsert; `None` keeps whatever is stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryPatch {
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub topics: Option<String>,
}

impl EntryPatch {
    pub fn check_in(time: impl Into<String>) -> Self {
        Self {
            check_in: Some(time.into()),
            ..Self::default()
        }
    }

    pub fn check_out(time: impl Into<String>) -> Self {
        Self {
            check_out: Some(time.into()),
            ..Self::default()
        }
    }

    pub fn topics(topics: impl Into<String>) -> Self {
        Self {
            topics: Some(topics.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    NotStarted,
    Active,
    Completed,
}

impl Status {
    /// Badge text shown on a history card.
    pub fn label(self) -> &'static str {
        match self {
            Status::NotStarted => "Check-in",
            Status::Active => "Active",
            Status::Completed => "Checked-out",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Status::NotStarted => "badge--checkin",
            Status::Active => "badge--active",
            Status::Completed => "badge--checkout",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub key: String,
    pub display_date: String,
    pub check_in: String,
    pub check_out: String,
    pub status: Status,
    /// `None` when no topics were saved; the placeholder text is rendered instead.
    pub preview: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum History {
    Empty { message: String },
    Items { items: Vec<HistoryItem> },
}

/// Editable form state, already in display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFields {
    pub check_in: String,
    pub check_out: String,
    pub saved_topics: String,
    pub topics_input: String,
}

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub action: String,
    #[serde(default)]
    pub topics: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TopicsForm {
    #[serde(default)]
    pub topics: String,
}

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub key: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: String,
    pub key: String,
    pub form: FormFields,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActionResponse {
    pub key: String,
    pub entry: Entry,
    pub status: Status,
    pub history: History,
}
