use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::statistics::{LedgerStatistics, StatisticsReport};
use crate::core::ThresholdDecision;
use crate::errors::LedgerError;

/// Ledger file name inside the storage directory
pub const LEDGER_FILE_NAME: &str = "threshold_history.json";

/// Sidecar file that carries the advisory write lock
pub const LOCK_FILE_NAME: &str = "threshold_history.lock";

/// On-disk shape of the ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerFile {
    #[serde(default)]
    pub threshold_history: Vec<ThresholdDecision>,
    #[serde(default)]
    pub adjustments_applied: u64,
}

impl LedgerFile {
    // Pure functions

    fn append(mut self, decision: ThresholdDecision, max_entries: Option<usize>) -> Self {
        self.threshold_history.push(decision);
        self.adjustments_applied += 1;

        if let Some(max) = max_entries {
            let excess = self.threshold_history.len().saturating_sub(max);
            if excess > 0 {
                self.threshold_history.drain(..excess);
            }
        }
        self
    }
}

/// Append-only, JSON-backed history of threshold decisions.
///
/// Appends take an exclusive lock on a sidecar file for the whole
/// read-modify-write and publish the new contents with a rename, so
/// concurrent writers (threads or processes) never drop each other's entries
/// and readers never observe a half-written file.
#[derive(Debug, Clone)]
pub struct DecisionLedger {
    path: PathBuf,
    lock_path: PathBuf,
    max_entries: Option<usize>,
}

impl DecisionLedger {
    /// Open the ledger in `storage_dir`, creating the directory and seeding
    /// an empty ledger file when either is missing.
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let storage_dir = storage_dir.as_ref();
        fs::create_dir_all(storage_dir).map_err(|e| LedgerError::io(storage_dir, e))?;

        let ledger = Self {
            path: storage_dir.join(LEDGER_FILE_NAME),
            lock_path: storage_dir.join(LOCK_FILE_NAME),
            max_entries: None,
        };

        ledger.with_exclusive_lock(|| {
            if !ledger.path.exists() {
                tracing::debug!("Seeding empty ledger at {}", ledger.path.display());
                ledger.write_atomically(&LedgerFile::default())?;
            }
            Ok(())
        })?;

        Ok(ledger)
    }

    /// Read-only handle on the ledger in `storage_dir`. Nothing is created;
    /// a missing ledger reads as empty.
    pub fn at(storage_dir: impl AsRef<Path>) -> Self {
        let storage_dir = storage_dir.as_ref();
        Self {
            path: storage_dir.join(LEDGER_FILE_NAME),
            lock_path: storage_dir.join(LOCK_FILE_NAME),
            max_entries: None,
        }
    }

    /// Cap the number of retained decisions; `None` keeps everything.
    pub fn with_max_entries(mut self, max_entries: Option<usize>) -> Self {
        self.max_entries = max_entries;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    /// Best-effort append. Failures are logged and swallowed so a storage
    /// problem can never break threshold computation.
    pub fn record(&self, decision: ThresholdDecision) {
        if let Err(e) = self.try_record(decision) {
            tracing::warn!("Threshold decision not recorded: {}", e);
        }
    }

    /// Append a decision, reporting any persistence failure.
    ///
    /// A ledger that fails to parse is left untouched rather than replaced.
    pub fn try_record(&self, decision: ThresholdDecision) -> Result<(), LedgerError> {
        self.with_exclusive_lock(|| {
            let current = self.load()?;
            let updated = current.append(decision, self.max_entries);
            self.write_atomically(&updated)
        })
    }

    /// Read the whole ledger. A missing file reads as empty.
    pub fn load(&self) -> Result<LedgerFile, LedgerError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LedgerFile::default()),
            Err(e) => return Err(LedgerError::io(&self.path, e)),
        };

        serde_json::from_str(&content).map_err(|e| LedgerError::serialization(&self.path, e))
    }

    pub fn history(&self) -> Result<Vec<ThresholdDecision>, LedgerError> {
        Ok(self.load()?.threshold_history)
    }

    /// The last `limit` decisions, oldest first
    pub fn recent(&self, limit: usize) -> Result<Vec<ThresholdDecision>, LedgerError> {
        let mut history = self.history()?;
        let skip = history.len().saturating_sub(limit);
        Ok(history.split_off(skip))
    }

    pub fn statistics(&self) -> Result<LedgerStatistics, LedgerError> {
        Ok(LedgerStatistics::from_ledger(&self.load()?))
    }

    /// Statistics, or an error object when the ledger cannot be read.
    pub fn get_statistics(&self) -> StatisticsReport {
        match self.statistics() {
            Ok(stats) => StatisticsReport::Available(stats),
            Err(e) => {
                tracing::warn!("Failed to compute ledger statistics: {}", e);
                StatisticsReport::Unavailable {
                    error: e.to_string(),
                }
            }
        }
    }

    // I/O helpers

    fn with_exclusive_lock<T>(
        &self,
        f: impl FnOnce() -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&self.lock_path)
            .map_err(|e| LedgerError::lock(&self.lock_path, e))?;

        let mut lock = fd_lock::RwLock::new(file);
        let _guard = lock
            .write()
            .map_err(|e| LedgerError::lock(&self.lock_path, e))?;

        f()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".tmp.{}", std::process::id()));
        PathBuf::from(name)
    }

    /// Write to a temporary file and rename it over the ledger.
    /// Callers must hold the exclusive lock.
    fn write_atomically(&self, ledger: &LedgerFile) -> Result<(), LedgerError> {
        let content = serde_json::to_string_pretty(ledger)
            .map_err(|e| LedgerError::serialization(&self.path, e))?;
        let temp_path = self.temp_path();

        fs::write(&temp_path, content).map_err(|e| LedgerError::io(&temp_path, e))?;

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            LedgerError::io(&self.path, e)
        })
    }
}
