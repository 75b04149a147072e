//! The candidate/active/archived staging state machine.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use tracing::{info, warn};

use helios_train::TrainingRun;

use crate::artifact::{ArtifactPayload, ArtifactStore};
use crate::error::RegistryError;
use crate::record::{ModelRecord, ModelStatus};

const RECORDS_FILE: &str = "records.json";

/// File-backed model registry.
///
/// Records live in one JSON file (rewritten atomically on every change),
/// artifacts in a sibling blob directory. All mutating operations take a
/// single writer lock, which is what keeps the at-most-one-active
/// invariant under concurrent activations: the archive-then-activate
/// sequence can never interleave.
#[derive(Debug)]
pub struct Registry {
    records_path: PathBuf,
    artifacts: ArtifactStore,
    records: Mutex<Vec<ModelRecord>>,
}

impl Registry {
    /// Opens a registry rooted at `root`, creating it when absent.
    pub fn open(root: &Path) -> Result<Self, RegistryError> {
        fs::create_dir_all(root)?;
        let records_path = root.join(RECORDS_FILE);
        let records: Vec<ModelRecord> = if records_path.exists() {
            serde_json::from_slice(&fs::read(&records_path)?)?
        } else {
            Vec::new()
        };
        let artifacts = ArtifactStore::open(root.join("artifacts"))?;
        Ok(Self {
            records_path,
            artifacts,
            records: Mutex::new(records),
        })
    }

    /// The artifact store, for readers that serve the promoted model.
    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    /// Registers a finished training run as a new candidate.
    ///
    /// Persists the artifact first, then the record row; a row that fails
    /// to persist takes its artifact with it.
    pub fn register(
        &self,
        run: &TrainingRun,
        forecast_horizon_years: u32,
    ) -> Result<ModelRecord, RegistryError> {
        let mut records = self.lock();
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;

        let payload = ArtifactPayload::from_run(id, run);
        self.artifacts.put(id, &payload.to_bytes()?)?;

        let record = ModelRecord {
            id,
            order: run.order,
            status: ModelStatus::Candidate,
            metrics: run.metrics,
            diagnostics: run.diagnostics,
            train_size: run.split.train_size,
            test_size: run.split.test_size,
            split_ratio: run.split.split_ratio,
            year_range: run.dataset.year_range,
            target_stats: run.dataset.target,
            exog_stats: run.dataset.exogenous,
            forecast_horizon_years,
            created_at: Utc::now(),
            activated_at: None,
            activated_by: None,
        };
        records.push(record.clone());

        if let Err(e) = self.persist(&records) {
            records.pop();
            if let Err(cleanup) = self.artifacts.remove(id) {
                warn!(id, error = %cleanup, "failed to clean up orphaned artifact");
            }
            return Err(e);
        }

        info!(id, order = %record.order, "registered candidate model");
        Ok(record)
    }

    /// Promotes a candidate to active, archiving the previous active
    /// record.
    ///
    /// The artifact alias is promoted before any status change is
    /// persisted, and a failed persist rolls the in-memory state back, so
    /// the registry never ends up with zero or two active records.
    pub fn activate(&self, id: u64, actor: &str) -> Result<ModelRecord, RegistryError> {
        let mut records = self.lock();
        self.activate_locked(&mut records, id, actor)
    }

    /// The explicit first activation.
    ///
    /// Valid only while no record is or ever was active; promotes the
    /// earliest registered candidate. Replaces any guesswork about "the
    /// first row" being implicitly live.
    pub fn bootstrap(&self, actor: &str) -> Result<ModelRecord, RegistryError> {
        let mut records = self.lock();
        if records.is_empty() {
            return Err(RegistryError::Bootstrap {
                reason: "no registered models".to_string(),
            });
        }
        if records
            .iter()
            .any(|r| matches!(r.status, ModelStatus::Active | ModelStatus::Archived))
        {
            return Err(RegistryError::Bootstrap {
                reason: "registry already has an activation history".to_string(),
            });
        }
        let first_id = records
            .iter()
            .map(|r| r.id)
            .min()
            .expect("records is non-empty");
        self.activate_locked(&mut records, first_id, actor)
    }

    fn activate_locked(
        &self,
        records: &mut Vec<ModelRecord>,
        id: u64,
        actor: &str,
    ) -> Result<ModelRecord, RegistryError> {
        let target = records
            .iter()
            .find(|r| r.id == id)
            .ok_or(RegistryError::NotFound { id })?;
        if target.status != ModelStatus::Candidate {
            return Err(RegistryError::Activation {
                id,
                status: target.status,
            });
        }

        // Swap the canonical alias first: if the blob is missing or the
        // swap fails, no status has changed yet.
        self.artifacts.promote(id)?;

        let snapshot = records.clone();
        let previous_active = records
            .iter_mut()
            .find(|r| r.status == ModelStatus::Active)
            .map(|r| {
                r.status = ModelStatus::Archived;
                r.id
            });
        let record = {
            let target = records
                .iter_mut()
                .find(|r| r.id == id)
                .expect("target located above");
            target.status = ModelStatus::Active;
            target.activated_at = Some(Utc::now());
            target.activated_by = Some(actor.to_string());
            target.clone()
        };

        if let Err(e) = self.persist(records) {
            *records = snapshot;
            return Err(e);
        }

        info!(id, actor, archived = ?previous_active, "model activated");
        Ok(record)
    }

    /// Deletes a candidate and its artifact.
    pub fn delete(&self, id: u64) -> Result<(), RegistryError> {
        let mut records = self.lock();
        let target = records
            .iter()
            .find(|r| r.id == id)
            .ok_or(RegistryError::NotFound { id })?;
        if target.status != ModelStatus::Candidate {
            return Err(RegistryError::Deletion {
                id,
                status: target.status,
            });
        }

        let snapshot = records.clone();
        records.retain(|r| r.id != id);
        if let Err(e) = self.persist(&records) {
            *records = snapshot;
            return Err(e);
        }
        self.artifacts.remove(id)?;

        info!(id, "candidate model deleted");
        Ok(())
    }

    /// Looks up one record.
    pub fn get(&self, id: u64) -> Option<ModelRecord> {
        self.lock().iter().find(|r| r.id == id).cloned()
    }

    /// The currently active record, if any.
    pub fn get_active(&self) -> Option<ModelRecord> {
        self.lock()
            .iter()
            .find(|r| r.status == ModelStatus::Active)
            .cloned()
    }

    /// Candidates, newest first.
    pub fn list_candidates(&self) -> Vec<ModelRecord> {
        let records = self.lock();
        let mut out: Vec<ModelRecord> = records
            .iter()
            .filter(|r| r.status == ModelStatus::Candidate)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.id.cmp(&a.id));
        out
    }

    /// Every record: the active one first, then candidates newest first,
    /// then archived newest first.
    pub fn list_all(&self) -> Vec<ModelRecord> {
        let records = self.lock();
        let mut out: Vec<ModelRecord> = records.clone();
        out.sort_by(|a, b| {
            let rank = |r: &ModelRecord| match r.status {
                ModelStatus::Active => 0,
                ModelStatus::Candidate => 1,
                ModelStatus::Archived => 2,
            };
            rank(a).cmp(&rank(b)).then(b.id.cmp(&a.id))
        });
        out
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ModelRecord>> {
        self.records.lock().expect("registry lock poisoned")
    }

    fn persist(&self, records: &[ModelRecord]) -> Result<(), RegistryError> {
        let bytes = serde_json::to_vec_pretty(records)?;
        let tmp = self.records_path.with_extension("json.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.records_path)?;
        Ok(())
    }
}
