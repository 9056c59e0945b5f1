pub mod app;
pub mod config;
pub mod dates;
pub mod entries;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod history;
pub mod models;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{load_slots, persist_slots, MemoryStorage, Storage};
