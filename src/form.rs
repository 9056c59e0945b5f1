use crate::entries::load_all;
use crate::history::UNSET;
use crate::models::{Entry, EntryMap, FormFields};
use crate::storage::{Storage, LEGACY_CHECK_IN_SLOT, LEGACY_CHECK_OUT_SLOT, LEGACY_TOPICS_SLOT};

/// Values left behind by the single-slot format that predates per-day entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyFields {
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub topics: Option<String>,
}

pub fn read_legacy(storage: &impl Storage) -> LegacyFields {
    let read = |slot: &str| storage.get(slot).filter(|value| !value.is_empty());
    LegacyFields {
        check_in: read(LEGACY_CHECK_IN_SLOT),
        check_out: read(LEGACY_CHECK_OUT_SLOT),
        topics: read(LEGACY_TOPICS_SLOT),
    }
}

pub fn load_into_form(entries: &EntryMap, key: &str) -> FormFields {
    match entries.get(key) {
        Some(entry) => fields_for(entry),
        None => fields_for(&Entry::default()),
    }
}

/// Initial form state: today's entry if there is one, otherwise whatever the
/// legacy slots hold. Read only.
pub fn load_today_or_legacy(storage: &impl Storage, today_key: &str) -> FormFields {
    let entries = load_all(storage);
    if entries.contains_key(today_key) {
        return load_into_form(&entries, today_key);
    }

    let legacy = read_legacy(storage);
    fields_for(&Entry {
        check_in: legacy.check_in,
        check_out: legacy.check_out,
        topics: legacy.topics,
        updated_at: 0,
    })
}

fn fields_for(entry: &Entry) -> FormFields {
    let shown = |value: &Option<String>| {
        value
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(UNSET)
            .to_string()
    };
    FormFields {
        check_in: shown(&entry.check_in),
        check_out: shown(&entry.check_out),
        saved_topics: shown(&entry.topics),
        topics_input: entry.topics.clone().unwrap_or_default(),
    }
}
