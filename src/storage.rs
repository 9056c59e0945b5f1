use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};
use tokio::fs;
use tracing::error;

pub const ENTRIES_SLOT: &str = "entries";
pub const LEGACY_CHECK_IN_SLOT: &str = "checkInTime";
pub const LEGACY_CHECK_OUT_SLOT: &str = "checkOutTime";
pub const LEGACY_TOPICS_SLOT: &str = "topicsCovered";

/// String-keyed slot storage the entry store reads and writes through.
pub trait Storage {
    fn get(&self, slot: &str) -> Option<String>;
    fn set(&mut self, slot: &str, value: String);
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryStorage {
    slots: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(mut self, slot: &str, value: impl Into<String>) -> Self {
        self.set(slot, value.into());
        self
    }
}

impl Storage for MemoryStorage {
    fn get(&self, slot: &str) -> Option<String> {
        self.slots.get(slot).cloned()
    }

    fn set(&mut self, slot: &str, value: String) {
        self.slots.insert(slot.to_string(), value);
    }
}

pub async fn load_slots(path: &Path) -> MemoryStorage {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(slots) => slots,
            Err(err) => {
                error!("failed to parse data file: {err}");
                MemoryStorage::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => MemoryStorage::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            MemoryStorage::default()
        }
    }
}

/// Writes the slots next to `path` and renames over it, so readers never see a
/// partial document.
pub async fn persist_slots(path: &Path, slots: &MemoryStorage) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(slots)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, payload).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}
