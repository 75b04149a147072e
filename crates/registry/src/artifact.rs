//! Artifact store: one serialized fit per record, plus a canonical
//! "active" alias the forecast service reads.
//!
//! Blobs are immutable once written. Promotion never mutates a blob in
//! place: the alias is rewritten to a temporary file and atomically
//! renamed over the old one, so a concurrent reader sees either the old
//! artifact or the new one, never a half-written file.

use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::Hasher;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use helios_arimax::{ArimaxFit, Order};
use helios_train::TrainingRun;

use crate::error::RegistryError;

const ACTIVE_ALIAS: &str = "active.json";

/// Everything the forecast service needs from a promoted model, bound
/// 1:1 to a [`ModelRecord`](crate::ModelRecord) by id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArtifactPayload {
    /// Id of the owning record.
    pub record_id: u64,
    /// The fitted order.
    pub order: Order,
    /// Training years, oldest first.
    pub years: Vec<i32>,
    /// Held-out years, actuals, and forecasts, kept for display.
    pub test_years: Vec<i32>,
    pub test_actual: Vec<f64>,
    pub test_predicted: Vec<f64>,
    /// The full-sample fit.
    pub fit: ArimaxFit,
}

impl ArtifactPayload {
    /// Builds the payload for a finished training run.
    pub fn from_run(record_id: u64, run: &TrainingRun) -> Self {
        Self {
            record_id,
            order: run.order,
            years: run.years.clone(),
            test_years: run.test_years.clone(),
            test_actual: run.test_actual.clone(),
            test_predicted: run.test_predicted.clone(),
            fit: run.fit.clone(),
        }
    }

    /// Serializes the payload for storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RegistryError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Restores a payload from stored bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RegistryError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// File-backed blob store keyed by record id.
#[derive(Debug)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Opens (and creates) the store directory.
    pub(crate) fn open(dir: PathBuf) -> Result<Self, RegistryError> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn blob_path(&self, id: u64) -> PathBuf {
        self.dir.join(format!("model_{id}.json"))
    }

    fn alias_path(&self) -> PathBuf {
        self.dir.join(ACTIVE_ALIAS)
    }

    /// Stores the blob for `id`, replacing any previous version.
    pub fn put(&self, id: u64, bytes: &[u8]) -> Result<(), RegistryError> {
        write_atomic(&self.blob_path(id), bytes)?;
        debug!(id, bytes = bytes.len(), "artifact stored");
        Ok(())
    }

    /// Loads the blob for `id`.
    pub fn get(&self, id: u64) -> Result<Vec<u8>, RegistryError> {
        let path = self.blob_path(id);
        if !path.exists() {
            return Err(RegistryError::ArtifactMissing { id });
        }
        Ok(fs::read(path)?)
    }

    /// Returns whether a blob exists for `id`.
    pub fn exists(&self, id: u64) -> bool {
        self.blob_path(id).exists()
    }

    /// Points the canonical alias at the blob for `id` via an atomic
    /// rename. Fails without touching the alias when the blob is absent.
    pub fn promote(&self, id: u64) -> Result<(), RegistryError> {
        let bytes = self.get(id)?;
        write_atomic(&self.alias_path(), &bytes)?;
        debug!(id, "artifact promoted to active alias");
        Ok(())
    }

    /// Loads the currently promoted artifact with its content
    /// fingerprint. `None` when nothing was ever promoted.
    pub fn load_active(&self) -> Result<Option<(Vec<u8>, String)>, RegistryError> {
        let path = self.alias_path();
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(path)?;
        let fingerprint = fingerprint(&bytes);
        Ok(Some((bytes, fingerprint)))
    }

    /// Removes the blob for `id`. Missing blobs are fine: the outcome is
    /// the same.
    pub fn remove(&self, id: u64) -> Result<(), RegistryError> {
        let path = self.blob_path(id);
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Content fingerprint of an artifact. Identical bytes always produce
/// the same fingerprint, unlike a modification time.
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    hasher.write(bytes);
    format!("{:016x}", hasher.finish())
}

/// Writes via a sibling temp file and an atomic rename.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), RegistryError> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
