// liminal-persist/src/lib.rs
// ============================================================================
// Module: Liminal Persistence
// Description: Durable and in-memory implementations of the snapshot store.
// Purpose: Persist the full transaction record set across process restarts.
// Dependencies: liminal-core, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! [`JsonFileSnapshotStore`] writes to a temp file beside the target path,
//! flushes it to disk, then renames it into place, so a crash mid-write
//! never leaves a truncated snapshot where a reader expects a complete one.
//! The file holds a versioned envelope, `{schema_version, records}`, rather
//! than a bare array, so a future incompatible layout change has somewhere
//! to be declared and rejected up front instead of failing deep inside
//! per-record deserialization.
//! [`InMemorySnapshotStore`] exists for tests and hosts with no durable
//! filesystem, such as an in-browser wasm deployment.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;

use liminal_core::core::state::TransactionRecord;
use liminal_core::interfaces::SnapshotStore;
use liminal_core::interfaces::SnapshotStoreError;
use serde::Deserialize;
use serde::Serialize;

/// Environment variable naming the directory snapshots are written under.
pub const PERSIST_PATH_ENV: &str = "LIMINAL_PERSIST_PATH";
/// Fixed snapshot file name within the persistence directory.
pub const SNAPSHOT_FILE_NAME: &str = "tx-snapshot.json";
/// Schema version of the on-disk envelope itself, independent of the
/// per-record `schema_version` each [`TransactionRecord`] carries.
pub const ENVELOPE_SCHEMA_VERSION: u32 = 1;

/// On-disk shape of a snapshot file: a version tag alongside the records, so
/// a reader can reject an incompatible file before touching its contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotEnvelope {
    /// Version of this envelope's own layout.
    schema_version: u32,
    /// The full persisted record set.
    records: Vec<TransactionRecord>,
}

// ============================================================================
// SECTION: JSON File Snapshot Store
// ============================================================================

/// Snapshot store backed by a single JSON file, written atomically.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStore {
    /// Full path of the snapshot file.
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    /// Builds a store writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    /// Builds a store writing under the directory named by [`PERSIST_PATH_ENV`],
    /// falling back to the current directory when unset.
    #[must_use]
    pub fn from_env() -> Self {
        let dir = std::env::var(PERSIST_PATH_ENV).unwrap_or_else(|_| ".".to_string());
        Self::new(Path::new(&dir).join(SNAPSHOT_FILE_NAME))
    }
}

impl SnapshotStore for JsonFileSnapshotStore {
    fn load(&self) -> Result<Option<Vec<TransactionRecord>>, SnapshotStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path).map_err(|err| SnapshotStoreError::Io(err.to_string()))?;
        let envelope: SnapshotEnvelope =
            serde_json::from_str(&contents).map_err(|err| SnapshotStoreError::Invalid(err.to_string()))?;
        if envelope.schema_version != ENVELOPE_SCHEMA_VERSION {
            return Err(SnapshotStoreError::VersionMismatch {
                found: envelope.schema_version,
                expected: ENVELOPE_SCHEMA_VERSION,
            });
        }
        tracing::debug!(path = %self.path.display(), count = envelope.records.len(), "loaded transaction snapshot");
        Ok(Some(envelope.records))
    }

    fn save(&self, records: &[TransactionRecord]) -> Result<(), SnapshotStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| SnapshotStoreError::Io(err.to_string()))?;
            }
        }
        let envelope = SnapshotEnvelope {
            schema_version: ENVELOPE_SCHEMA_VERSION,
            records: records.to_vec(),
        };
        let contents = serde_json::to_string_pretty(&envelope).map_err(|err| SnapshotStoreError::Invalid(err.to_string()))?;
        let temp_path = self.path.with_extension("tmp");
        let file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|err| SnapshotStoreError::Io(err.to_string()))?;
        write_and_sync(&file, contents.as_bytes()).map_err(|err| SnapshotStoreError::Io(err.to_string()))?;
        fs::rename(&temp_path, &self.path).map_err(|err| SnapshotStoreError::Io(err.to_string()))?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "persisted transaction snapshot");
        Ok(())
    }
}

/// Writes `bytes` to `file` and flushes them to durable storage.
fn write_and_sync(mut file: &fs::File, bytes: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    file.write_all(bytes)?;
    file.sync_all()
}

// ============================================================================
// SECTION: In-Memory Snapshot Store
// ============================================================================

/// Snapshot store that keeps the last-saved record set in memory only.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    /// Last-saved record set, if any.
    records: Mutex<Option<Vec<TransactionRecord>>>,
}

impl InMemorySnapshotStore {
    /// Builds an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> Result<Option<Vec<TransactionRecord>>, SnapshotStoreError> {
        #[allow(clippy::unwrap_used, reason = "the mutex is never held across a panic in this store")]
        let guard = self.records.lock().unwrap();
        Ok(guard.clone())
    }

    fn save(&self, records: &[TransactionRecord]) -> Result<(), SnapshotStoreError> {
        #[allow(clippy::unwrap_used, reason = "the mutex is never held across a panic in this store")]
        let mut guard = self.records.lock().unwrap();
        *guard = Some(records.to_vec());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Test-only output and panic-based assertions are permitted.")]
mod tests {
    use liminal_core::core::identifiers::ContextId;
    use liminal_core::core::identifiers::TxId;
    use liminal_core::core::payload::Payload;
    use liminal_core::core::state::TransactionRecord;
    use liminal_core::core::time::Timestamp;
    use liminal_core::interfaces::SnapshotStore;
    use tempfile::tempdir;

    use super::InMemorySnapshotStore;
    use super::JsonFileSnapshotStore;

    fn sample_records() -> Vec<TransactionRecord> {
        let payload = Payload {
            program_id: "Tokenkeg".into(),
            instruction_data: "03ab".into(),
            instruction_count: 1,
            accounts: vec!["S".into(), "R".into()],
            estimated_amount: 0.1,
            origin: "https://x".into(),
        };
        vec![TransactionRecord::new(TxId::new("tx_1"), ContextId::new("ctx_1"), payload, Timestamp::now())]
    }

    #[test]
    fn json_file_store_round_trips() {
        let dir = tempdir().unwrap();
        let store = JsonFileSnapshotStore::new(dir.path().join("tx-snapshot.json"));
        assert_eq!(store.load().unwrap(), None);
        store.save(&sample_records()).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, sample_records());
    }

    #[test]
    fn json_file_store_rejects_newer_envelope_version() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("tx-snapshot.json");
        std::fs::write(&target, r#"{"schema_version":999,"records":[]}"#).unwrap();
        let store = JsonFileSnapshotStore::new(&target);
        let err = store.load().unwrap_err();
        match err {
            liminal_core::interfaces::SnapshotStoreError::VersionMismatch {
                found,
                expected,
            } => {
                assert_eq!(found, 999);
                assert_eq!(expected, super::ENVELOPE_SCHEMA_VERSION);
            }
            other => unreachable!("expected version mismatch, got {other}"),
        }
    }

    #[test]
    fn json_file_store_leaves_no_temp_file_after_save() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("tx-snapshot.json");
        let store = JsonFileSnapshotStore::new(&target);
        store.save(&sample_records()).unwrap();
        assert!(target.exists());
        assert!(!target.with_extension("tmp").exists());
    }

    #[test]
    fn in_memory_store_round_trips() {
        let store = InMemorySnapshotStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.save(&sample_records()).unwrap();
        assert_eq!(store.load().unwrap().unwrap(), sample_records());
    }
}
