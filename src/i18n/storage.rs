//! Persistence tiers for the language preference.
//!
//! Three backends of decreasing durability sit behind [`KeyValueStore`]:
//! a JSON file on disk (durable), a per-session JSON file (session), and an
//! owned in-memory map (memory). [`PersistenceChain`] reads them in priority
//! order and writes to all of them. Every backend failure is absorbed at the
//! tier that produced it: it is logged, counted, and treated as a miss.

use crate::i18n::{I18nMetrics, StorageError};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// A persistence tier, in priority order (durable wins ties).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Durable,
    Session,
    Memory,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Durable => "durable",
            Tier::Session => "session",
            Tier::Memory => "memory",
        };
        f.write_str(name)
    }
}

/// A fallible string key/value backend.
pub trait KeyValueStore: Send + Sync {
    /// Which tier this backend occupies.
    fn tier(&self) -> Tier;

    /// Read a value. `Ok(None)` means the key is absent.
    fn try_read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store a value, replacing any previous one.
    fn try_write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Removing an absent key succeeds.
    fn try_remove(&self, key: &str) -> Result<(), StorageError>;

    /// Drop whatever this tier keeps only for the current session.
    /// Tiers that outlive a session have nothing to do.
    fn end_session(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

// ==================== File-backed tiers ====================

/// A JSON object file holding every key of one tier.
///
/// Writes rewrite the whole file through a temporary sibling and a rename,
/// so a crash mid-write leaves either the old or the new file. Mutations
/// are serialized per store (and across its clones) so two writers never
/// interleave their load, modify and rename steps.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    tier: Tier,
    update_lock: Arc<Mutex<()>>,
}

impl FileStore {
    /// A durable store at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_tier(path.into(), Tier::Durable)
    }

    fn with_tier(path: PathBuf, tier: Tier) -> Self {
        Self {
            path,
            tier,
            update_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    tier: self.tier,
                    source,
                })
            }
        };

        if contents.trim().is_empty() {
            return Ok(HashMap::new());
        }

        serde_json::from_str(&contents).map_err(|source| StorageError::Corrupt {
            tier: self.tier,
            source,
        })
    }

    fn store(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            tier: self.tier,
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let json = serde_json::to_string_pretty(entries).map_err(|source| {
            StorageError::Corrupt {
                tier: self.tier,
                source,
            }
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(io_err)?;
        fs::rename(&tmp_path, &self.path).map_err(io_err)
    }

    /// Load for a mutation. A corrupt file is replaced rather than blocking
    /// every future write.
    fn load_for_update(&self) -> Result<HashMap<String, String>, StorageError> {
        match self.load() {
            Err(StorageError::Corrupt { source, .. }) => {
                warn!(
                    "{} storage at {} is corrupt ({}), overwriting",
                    self.tier,
                    self.path.display(),
                    source
                );
                Ok(HashMap::new())
            }
            other => other,
        }
    }
}

impl KeyValueStore for FileStore {
    fn tier(&self) -> Tier {
        self.tier
    }

    fn try_read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn try_write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.update_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.load_for_update()?;
        entries.insert(key.to_string(), value.to_string());
        self.store(&entries)
    }

    fn try_remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.update_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.load_for_update()?;
        if entries.remove(key).is_some() {
            self.store(&entries)?;
        }
        Ok(())
    }
}

/// Session-scoped storage: one file per session id, deleted when the
/// session ends.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: FileStore,
}

impl SessionStore {
    pub fn new(dir: impl AsRef<Path>, session_id: &str) -> Self {
        let path = dir
            .as_ref()
            .join(format!("site-i18n-session-{}.json", session_id));
        Self {
            inner: FileStore::with_tier(path, Tier::Session),
        }
    }

    /// Location of the session file.
    pub fn path(&self) -> &Path {
        self.inner.path()
    }
}

impl KeyValueStore for SessionStore {
    fn tier(&self) -> Tier {
        Tier::Session
    }

    fn try_read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.try_read(key)
    }

    fn try_write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.try_write(key, value)
    }

    fn try_remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.try_remove(key)
    }

    /// Delete the session file. Ending twice is fine.
    fn end_session(&self) -> Result<(), StorageError> {
        let _guard = self.inner.update_lock.lock().unwrap_or_else(|e| e.into_inner());
        match fs::remove_file(self.inner.path()) {
            Ok(()) => {
                debug!("Ended session, removed {}", self.inner.path().display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                tier: Tier::Session,
                source,
            }),
        }
    }
}

// ==================== Memory tier ====================

/// The last-resort tier. It cannot fail: a poisoned lock is recovered
/// because the map holds plain strings with no invariants to break.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn tier(&self) -> Tier {
        Tier::Memory
    }

    fn try_read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn try_write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn try_remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }
}

// ==================== Chain ====================

/// Result of writing one value through every tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WriteOutcome {
    /// Tiers that stored the value
    pub acknowledged: Vec<Tier>,

    /// Tiers that failed (already logged)
    pub failed: Vec<Tier>,
}

impl WriteOutcome {
    /// Every tier stored the value.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// At least one tier stored the value.
    pub fn any_acknowledged(&self) -> bool {
        !self.acknowledged.is_empty()
    }
}

/// Ordered list of tiers: reads return the first hit, writes go to all.
pub struct PersistenceChain {
    stores: Vec<Box<dyn KeyValueStore>>,
    metrics: Arc<I18nMetrics>,
}

impl PersistenceChain {
    /// Build a chain from explicit backends, tried in the given order.
    pub fn new(stores: Vec<Box<dyn KeyValueStore>>) -> Self {
        Self {
            stores,
            metrics: Arc::new(I18nMetrics::new()),
        }
    }

    /// Durable file → session file → memory.
    pub fn standard(
        durable_path: impl Into<PathBuf>,
        session_dir: &Path,
        session_id: &str,
    ) -> Self {
        Self::new(vec![
            Box::new(FileStore::new(durable_path)),
            Box::new(SessionStore::new(session_dir, session_id)),
            Box::new(MemoryStore::new()),
        ])
    }

    /// Memory only; useful where no filesystem is available.
    pub fn in_memory() -> Self {
        Self::new(vec![Box::new(MemoryStore::new())])
    }

    /// Count storage failures into `metrics`.
    pub fn with_metrics(mut self, metrics: Arc<I18nMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// The configured backends, in priority order.
    pub fn stores(&self) -> &[Box<dyn KeyValueStore>] {
        &self.stores
    }

    /// First value found, durable tier first.
    pub fn read(&self, key: &str) -> Option<String> {
        self.read_with_tier(key).map(|(value, _)| value)
    }

    /// First value found together with the tier that held it.
    pub fn read_with_tier(&self, key: &str) -> Option<(String, Tier)> {
        self.read_first(key, |value| Some(value.to_string()))
    }

    /// First value that `accept` maps to `Some`, in priority order.
    ///
    /// Tiers that fail or hold a rejected value are passed over, so a
    /// garbled durable entry does not mask a good session entry.
    pub fn read_first<T>(
        &self,
        key: &str,
        accept: impl Fn(&str) -> Option<T>,
    ) -> Option<(T, Tier)> {
        for store in &self.stores {
            match store.try_read(key) {
                Ok(Some(value)) => match accept(&value) {
                    Some(accepted) => {
                        debug!("Read '{}' from {} storage", key, store.tier());
                        return Some((accepted, store.tier()));
                    }
                    None => debug!("Rejected '{}' value from {} storage", key, store.tier()),
                },
                Ok(None) => {}
                Err(e) => {
                    warn!("Failed to read '{}': {}", key, e);
                    self.metrics.record_storage_failure();
                }
            }
        }
        None
    }

    /// Every value found, in priority order. Failing tiers are skipped.
    pub fn read_all(&self, key: &str) -> Vec<(String, Tier)> {
        self.stores
            .iter()
            .filter_map(|store| match store.try_read(key) {
                Ok(value) => value.map(|v| (v, store.tier())),
                Err(e) => {
                    warn!("Failed to read '{}': {}", key, e);
                    self.metrics.record_storage_failure();
                    None
                }
            })
            .collect()
    }

    /// Write to every tier; a failing tier does not stop the others.
    pub fn write(&self, key: &str, value: &str) -> WriteOutcome {
        let mut outcome = WriteOutcome::default();
        for store in &self.stores {
            match store.try_write(key, value) {
                Ok(()) => outcome.acknowledged.push(store.tier()),
                Err(e) => {
                    warn!("Failed to write '{}': {}", key, e);
                    self.metrics.record_storage_failure();
                    outcome.failed.push(store.tier());
                }
            }
        }
        outcome
    }

    /// Remove the key from every tier.
    pub fn clear(&self, key: &str) -> WriteOutcome {
        let mut outcome = WriteOutcome::default();
        for store in &self.stores {
            match store.try_remove(key) {
                Ok(()) => outcome.acknowledged.push(store.tier()),
                Err(e) => {
                    warn!("Failed to remove '{}': {}", key, e);
                    self.metrics.record_storage_failure();
                    outcome.failed.push(store.tier());
                }
            }
        }
        outcome
    }

    /// End the session on every tier. Durable and memory tiers are left as
    /// they are; session tiers drop their data.
    pub fn end_session(&self) -> WriteOutcome {
        let mut outcome = WriteOutcome::default();
        for store in &self.stores {
            match store.end_session() {
                Ok(()) => outcome.acknowledged.push(store.tier()),
                Err(e) => {
                    warn!("Failed to end session: {}", e);
                    self.metrics.record_storage_failure();
                    outcome.failed.push(store.tier());
                }
            }
        }
        outcome
    }
}

impl fmt::Debug for PersistenceChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tiers: Vec<Tier> = self.stores.iter().map(|s| s.tier()).collect();
        f.debug_struct("PersistenceChain").field("tiers", &tiers).finish()
    }
}
