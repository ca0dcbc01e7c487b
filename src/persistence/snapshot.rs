use crate::persistence::PersistenceError;
use crate::{DataType, SharedStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::{self, Instant};
use tracing::{debug, error, info};

/// How a single value is written into the snapshot file.
///
/// Plain strings are stored as JSON strings. Lists and sets are stored as
/// `{"type": "list" | "set", "values": [...]}` so their kind survives a reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotValue {
    String(String),
    Collection(Collection),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "lowercase")]
pub enum Collection {
    List(Vec<String>),
    Set(Vec<String>),
}

impl From<DataType> for SnapshotValue {
    fn from(value: DataType) -> SnapshotValue {
        match value {
            DataType::String(s) => SnapshotValue::String(s),
            DataType::List(list) => SnapshotValue::Collection(Collection::List(list.values())),
            DataType::Set(set) => SnapshotValue::Collection(Collection::Set(set.members())),
        }
    }
}

impl From<SnapshotValue> for DataType {
    fn from(value: SnapshotValue) -> DataType {
        match value {
            SnapshotValue::String(s) => DataType::String(s),
            SnapshotValue::Collection(Collection::List(values)) => DataType::List(values.into()),
            SnapshotValue::Collection(Collection::Set(values)) => DataType::Set(values.into()),
        }
    }
}

/// Manages snapshot persistence for the store.
pub struct SnapshotManager {
    store: SharedStore,
    path: PathBuf,
    interval: Duration,

    /// One save at a time: they share the temp file
    save_lock: Mutex<()>,
}

impl SnapshotManager {
    pub fn new(store: SharedStore, path: PathBuf, interval: Duration) -> SnapshotManager {
        SnapshotManager {
            store,
            path,
            interval,
            save_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot into the store.
    ///
    /// Returns the number of keys loaded. A missing or empty file loads
    /// nothing; a file that does not parse is an error.
    pub fn load(&self) -> Result<usize, PersistenceError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No snapshot found at {}, starting fresh", self.path.display());
                return Ok(0);
            }
            Err(e) => return Err(PersistenceError::io(&self.path, e)),
        };

        if json.trim().is_empty() {
            return Ok(0);
        }

        let snapshot: BTreeMap<String, SnapshotValue> =
            serde_json::from_str(&json).map_err(|e| PersistenceError::Corrupt {
                path: self.path.display().to_string(),
                source: e,
            })?;

        let count = snapshot.len();
        self.store.load(
            snapshot
                .into_iter()
                .map(|(key, value)| (key, DataType::from(value)))
                .collect(),
        );

        info!("Loaded {} keys from snapshot {}", count, self.path.display());
        Ok(count)
    }

    /// Write the whole store to disk.
    ///
    /// The data goes to a temp file next to the snapshot which is then
    /// renamed over it, so a reader sees either the old or the new file.
    /// Concurrent calls run one after the other.
    pub fn save(&self) -> Result<usize, PersistenceError> {
        let _saving = self.save_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let snapshot: BTreeMap<String, SnapshotValue> = self
            .store
            .entries()
            .into_iter()
            .map(|(key, value)| (key, SnapshotValue::from(value)))
            .collect();

        let data = serde_json::to_vec(&snapshot).map_err(PersistenceError::Serialize)?;
        let temp_path = self.temp_path();

        {
            let file = File::create(&temp_path).map_err(|e| PersistenceError::io(&temp_path, e))?;
            let mut writer = BufWriter::new(file);
            writer
                .write_all(&data)
                .map_err(|e| PersistenceError::io(&temp_path, e))?;
            writer
                .flush()
                .map_err(|e| PersistenceError::io(&temp_path, e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| PersistenceError::io(&self.path, e))?;

        debug!(
            "Saved snapshot: {} ({} keys)",
            self.path.display(),
            snapshot.len()
        );
        Ok(snapshot.len())
    }

    /// Run the background snapshot task.
    ///
    /// The first snapshot is taken one interval after start. Each save runs
    /// on the blocking pool. Failures are logged and the task keeps going.
    pub async fn run(self: Arc<Self>) {
        info!(
            "Starting snapshot task (interval: {}ms)",
            self.interval.as_millis()
        );

        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);

        loop {
            ticker.tick().await;

            let manager = Arc::clone(&self);
            match tokio::task::spawn_blocking(move || manager.save()).await {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => error!("Failed to save snapshot: {}", e),
                Err(e) => error!("Snapshot task panicked: {}", e),
            }
        }
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "snapshot".to_string());

        self.path.with_file_name(format!(".{}.tmp", file_name))
    }
}
