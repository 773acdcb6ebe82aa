//! History module - recent translations that survive restarts
//!
//! This module provides:
//! - A bounded, newest-first log of completed translations
//! - Persistence of that log to a single key-value slot
//! - File-backed and in-memory slot implementations

pub mod data;
pub mod storage;

// Re-export commonly used types
pub use data::{HistoryRecord, HistoryStore, NewRecord, MAX_HISTORY};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
