use chrono::{Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::storage::{KeyValueStore, StorageError};

/// Storage key for the persisted log
pub const HISTORY_KEY: &str = "qt-history";

/// Maximum number of records kept
pub const MAX_HISTORY: usize = 10;

/// One completed translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(rename = "source")]
    pub source_text: String,
    #[serde(rename = "translation")]
    pub translated_text: String,
    #[serde(rename = "from")]
    pub source_lang: String,
    #[serde(rename = "to")]
    pub target_lang: String,
    /// Epoch milliseconds
    #[serde(rename = "ts")]
    pub timestamp: i64,
}

impl HistoryRecord {
    /// Local wall-clock time of the record, e.g. `14:03:27`
    pub fn local_time_label(&self) -> String {
        Local
            .timestamp_millis_opt(self.timestamp)
            .single()
            .map(|time| time.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "--:--:--".to_string())
    }
}

/// A translation exchange about to be recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub source_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl NewRecord {
    fn stamped(self, timestamp: i64) -> HistoryRecord {
        HistoryRecord {
            source_text: self.source_text,
            translated_text: self.translated_text,
            source_lang: self.source_lang,
            target_lang: self.target_lang,
            timestamp,
        }
    }
}

/// Newest-first list of at most [`MAX_HISTORY`] records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<HistoryRecord>", into = "Vec<HistoryRecord>")]
pub struct HistoryLog {
    records: Vec<HistoryRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `record` at the front, dropping whatever falls past the limit
    pub fn prepend(&mut self, record: HistoryRecord) {
        self.records.insert(0, record);
        self.records.truncate(MAX_HISTORY);
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&HistoryRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<HistoryRecord>> for HistoryLog {
    fn from(mut records: Vec<HistoryRecord>) -> Self {
        // A hand-edited file may hold more than the limit
        records.truncate(MAX_HISTORY);
        Self { records }
    }
}

impl From<HistoryLog> for Vec<HistoryRecord> {
    fn from(log: HistoryLog) -> Self {
        log.records
    }
}

/// Recent translations, mirrored to a key-value slot
pub struct HistoryStore {
    storage: Box<dyn KeyValueStore>,
    log: HistoryLog,
}

impl HistoryStore {
    /// Wrap `storage` and restore whatever it holds
    pub fn open(storage: Box<dyn KeyValueStore>) -> Self {
        let mut store = Self {
            storage,
            log: HistoryLog::new(),
        };
        store.load();
        store
    }

    /// Re-read the persisted log. Missing, unreadable or corrupt data yields an empty log.
    pub fn load(&mut self) -> &HistoryLog {
        self.log = match self.storage.get(HISTORY_KEY) {
            Ok(Some(content)) => match serde_json::from_str::<HistoryLog>(&content) {
                Ok(log) => log,
                Err(e) => {
                    warn!("Discarding unreadable history: {e}");
                    HistoryLog::new()
                }
            },
            Ok(None) => HistoryLog::new(),
            Err(e) => {
                warn!("Could not read history: {e}");
                HistoryLog::new()
            }
        };
        debug!(records = self.log.len(), "history loaded");
        &self.log
    }

    pub fn log(&self) -> &HistoryLog {
        &self.log
    }

    /// Stamp `entry` with the current time, prepend it and persist the log.
    ///
    /// The in-memory log is updated even if persisting fails.
    pub fn record(&mut self, entry: NewRecord) -> Result<&HistoryLog, StorageError> {
        self.record_at(entry, Utc::now().timestamp_millis())
    }

    pub(crate) fn record_at(
        &mut self,
        entry: NewRecord,
        timestamp: i64,
    ) -> Result<&HistoryLog, StorageError> {
        self.log.prepend(entry.stamped(timestamp));
        self.persist()?;
        Ok(&self.log)
    }

    /// Empty the log and remove the persisted slot
    pub fn clear(&mut self) -> Result<&HistoryLog, StorageError> {
        self.log = HistoryLog::new();
        self.storage.remove(HISTORY_KEY)?;
        Ok(&self.log)
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let content = serde_json::to_string(&self.log)?;
        self.storage.set(HISTORY_KEY, &content)
    }
}
