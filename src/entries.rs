use crate::models::{Entry, EntryMap, EntryPatch};
use crate::storage::{Storage, ENTRIES_SLOT};
use chrono::Utc;
use tracing::warn;

/// Reads the whole entry map. Missing or unparseable data yields an empty map.
pub fn load_all(storage: &impl Storage) -> EntryMap {
    let Some(raw) = storage.get(ENTRIES_SLOT) else {
        return EntryMap::new();
    };
    match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("ignoring malformed entries: {err}");
            EntryMap::new()
        }
    }
}

pub fn save_all(storage: &mut impl Storage, entries: &EntryMap) -> Result<(), serde_json::Error> {
    let payload = serde_json::to_string(entries)?;
    storage.set(ENTRIES_SLOT, payload);
    Ok(())
}

/// Applies `patch` over `existing` and stamps the result. The stamp never moves
/// backwards.
pub fn merge_entry(existing: Entry, patch: EntryPatch, now_ms: i64) -> Entry {
    Entry {
        check_in: patch.check_in.or(existing.check_in),
        check_out: patch.check_out.or(existing.check_out),
        topics: patch.topics.or(existing.topics),
        updated_at: existing.updated_at.max(now_ms),
    }
}

pub fn upsert(
    storage: &mut impl Storage,
    key: &str,
    patch: EntryPatch,
) -> Result<Entry, serde_json::Error> {
    upsert_at(storage, key, patch, Utc::now().timestamp_millis())
}

pub fn upsert_at(
    storage: &mut impl Storage,
    key: &str,
    patch: EntryPatch,
    now_ms: i64,
) -> Result<Entry, serde_json::Error> {
    let mut entries = load_all(storage);
    let existing = entries.remove(key).unwrap_or_default();
    let merged = merge_entry(existing, patch, now_ms);
    entries.insert(key.to_string(), merged.clone());
    save_all(storage, &entries)?;
    Ok(merged)
}
