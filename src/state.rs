use crate::storage::MemoryStorage;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Shared slots plus where they are persisted. Handlers hold the lock for the
/// whole read-modify-write of an action.
#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub slots: Arc<Mutex<MemoryStorage>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, slots: MemoryStorage) -> Self {
        Self {
            data_path,
            slots: Arc::new(Mutex::new(slots)),
        }
    }
}
