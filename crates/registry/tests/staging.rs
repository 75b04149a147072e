//! Integration tests for the staging state machine.

use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use helios_arimax::Order;
use helios_registry::{ArtifactPayload, ModelStatus, Registry, RegistryError};
use helios_series::{align, AlignedDataset, ObservationSeries};
use helios_train::{fit, SplitSpec, TrainingRun};

fn dataset(seed: u64) -> AlignedDataset {
    let n = 40;
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1.0).unwrap();
    let years: Vec<i32> = (0..n).map(|i| 1985 + i).collect();
    let mut exog = vec![200.0];
    for _ in 1..n {
        let last = *exog.last().unwrap();
        exog.push(last + 5.0 + noise.sample(&mut rng));
    }
    let mut target = vec![100.0];
    for t in 1..n as usize {
        let dx = exog[t] - exog[t - 1];
        let last = *target.last().unwrap();
        target.push(last + 0.5 * dx + noise.sample(&mut rng));
    }
    let target = ObservationSeries::new("energy", years.clone(), target).unwrap();
    let exog = ObservationSeries::new("gdp", years, exog).unwrap();
    align(&target, &exog, 10).unwrap()
}

fn training_run(seed: u64) -> TrainingRun {
    fit(
        &dataset(seed),
        Order::new(0, 1, 0),
        &SplitSpec::default(),
        Duration::from_secs(60),
    )
    .unwrap()
}

fn registry() -> (tempfile::TempDir, Registry) {
    let dir = tempfile::tempdir().unwrap();
    let registry = Registry::open(&dir.path().join("registry")).unwrap();
    (dir, registry)
}

#[test]
fn register_creates_candidate_with_artifact() {
    let (_dir, registry) = registry();
    let record = registry.register(&training_run(1), 3).unwrap();

    assert_eq!(record.id, 1);
    assert_eq!(record.status, ModelStatus::Candidate);
    assert_eq!(record.forecast_horizon_years, 3);
    assert!(record.activated_at.is_none());
    assert!(registry.artifacts().exists(record.id));

    let stored = registry.get(record.id).unwrap();
    assert_eq!(stored.status, ModelStatus::Candidate);
}

#[test]
fn ids_are_monotonic() {
    let (_dir, registry) = registry();
    let a = registry.register(&training_run(1), 3).unwrap();
    let b = registry.register(&training_run(2), 3).unwrap();
    let c = registry.register(&training_run(3), 3).unwrap();
    assert_eq!((a.id, b.id, c.id), (1, 2, 3));
}

#[test]
fn activation_archives_previous_active() {
    let (_dir, registry) = registry();
    let a = registry.register(&training_run(1), 3).unwrap();
    let b = registry.register(&training_run(2), 3).unwrap();

    registry.activate(a.id, "admin").unwrap();
    assert_eq!(registry.get_active().unwrap().id, a.id);

    registry.activate(b.id, "admin").unwrap();
    assert_eq!(registry.get_active().unwrap().id, b.id);
    assert_eq!(registry.get(a.id).unwrap().status, ModelStatus::Archived);

    let active_count = registry
        .list_all()
        .iter()
        .filter(|r| r.status == ModelStatus::Active)
        .count();
    assert_eq!(active_count, 1);
}

#[test]
fn activation_stamps_actor_and_time() {
    let (_dir, registry) = registry();
    let a = registry.register(&training_run(1), 3).unwrap();
    let record = registry.activate(a.id, "ops").unwrap();
    assert_eq!(record.activated_by.as_deref(), Some("ops"));
    assert!(record.activated_at.is_some());
}

#[test]
fn reactivating_active_or_archived_fails() {
    let (_dir, registry) = registry();
    let a = registry.register(&training_run(1), 3).unwrap();
    let b = registry.register(&training_run(2), 3).unwrap();
    registry.activate(a.id, "admin").unwrap();

    let err = registry.activate(a.id, "admin").unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Activation {
            status: ModelStatus::Active,
            ..
        }
    ));

    registry.activate(b.id, "admin").unwrap();
    let err = registry.activate(a.id, "admin").unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Activation {
            status: ModelStatus::Archived,
            ..
        }
    ));
}

#[test]
fn activating_unknown_id_fails() {
    let (_dir, registry) = registry();
    assert!(matches!(
        registry.activate(99, "admin").unwrap_err(),
        RegistryError::NotFound { id: 99 }
    ));
}

#[test]
fn missing_artifact_aborts_activation_without_status_change() {
    let (_dir, registry) = registry();
    let a = registry.register(&training_run(1), 3).unwrap();
    let b = registry.register(&training_run(2), 3).unwrap();
    registry.activate(a.id, "admin").unwrap();

    // Sabotage candidate b's blob, then try to promote it.
    registry.artifacts().remove(b.id).unwrap();
    let err = registry.activate(b.id, "admin").unwrap_err();
    assert!(matches!(err, RegistryError::ArtifactMissing { .. }));

    // The old model stays active and b stays a candidate.
    assert_eq!(registry.get_active().unwrap().id, a.id);
    assert_eq!(registry.get(b.id).unwrap().status, ModelStatus::Candidate);
}

#[test]
fn delete_candidate_succeeds_and_disappears() {
    let (_dir, registry) = registry();
    let a = registry.register(&training_run(1), 3).unwrap();
    let b = registry.register(&training_run(2), 3).unwrap();

    registry.delete(b.id).unwrap();
    assert!(registry.get(b.id).is_none());
    assert!(!registry.artifacts().exists(b.id));
    assert!(registry
        .list_candidates()
        .iter()
        .all(|r| r.id != b.id));
    assert!(registry.get(a.id).is_some());
}

#[test]
fn delete_active_always_fails() {
    let (_dir, registry) = registry();
    let a = registry.register(&training_run(1), 3).unwrap();
    registry.activate(a.id, "admin").unwrap();
    let err = registry.delete(a.id).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Deletion {
            status: ModelStatus::Active,
            ..
        }
    ));
    assert_eq!(registry.get_active().unwrap().id, a.id);
}

#[test]
fn delete_archived_fails() {
    let (_dir, registry) = registry();
    let a = registry.register(&training_run(1), 3).unwrap();
    let b = registry.register(&training_run(2), 3).unwrap();
    registry.activate(a.id, "admin").unwrap();
    registry.activate(b.id, "admin").unwrap();
    assert!(matches!(
        registry.delete(a.id).unwrap_err(),
        RegistryError::Deletion {
            status: ModelStatus::Archived,
            ..
        }
    ));
}

#[test]
fn bootstrap_activates_earliest_candidate_once() {
    let (_dir, registry) = registry();
    let a = registry.register(&training_run(1), 3).unwrap();
    let _b = registry.register(&training_run(2), 3).unwrap();

    let record = registry.bootstrap("system").unwrap();
    assert_eq!(record.id, a.id);
    assert_eq!(registry.get_active().unwrap().id, a.id);

    // A second bootstrap is rejected even after more registrations.
    let err = registry.bootstrap("system").unwrap_err();
    assert!(matches!(err, RegistryError::Bootstrap { .. }));
}

#[test]
fn bootstrap_on_empty_registry_fails() {
    let (_dir, registry) = registry();
    assert!(matches!(
        registry.bootstrap("system").unwrap_err(),
        RegistryError::Bootstrap { .. }
    ));
}

#[test]
fn list_ordering_active_first_then_recent_candidates() {
    let (_dir, registry) = registry();
    let a = registry.register(&training_run(1), 3).unwrap();
    let b = registry.register(&training_run(2), 3).unwrap();
    let c = registry.register(&training_run(3), 3).unwrap();
    registry.activate(a.id, "admin").unwrap();

    let all = registry.list_all();
    assert_eq!(all[0].id, a.id);
    assert_eq!(all[1].id, c.id);
    assert_eq!(all[2].id, b.id);

    let candidates = registry.list_candidates();
    assert_eq!(
        candidates.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![c.id, b.id]
    );
}

#[test]
fn registry_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("registry");
    let id = {
        let registry = Registry::open(&root).unwrap();
        let a = registry.register(&training_run(1), 5).unwrap();
        registry.activate(a.id, "admin").unwrap();
        a.id
    };

    let reopened = Registry::open(&root).unwrap();
    let active = reopened.get_active().unwrap();
    assert_eq!(active.id, id);
    assert_eq!(active.forecast_horizon_years, 5);
    let (bytes, _) = reopened.artifacts().load_active().unwrap().unwrap();
    let payload = ArtifactPayload::from_bytes(&bytes).unwrap();
    assert_eq!(payload.record_id, id);
}

#[test]
fn promoted_artifact_matches_registered_run() {
    let (_dir, registry) = registry();
    let run = training_run(1);
    let record = registry.register(&run, 3).unwrap();
    registry.activate(record.id, "admin").unwrap();

    let (bytes, _) = registry.artifacts().load_active().unwrap().unwrap();
    let payload = ArtifactPayload::from_bytes(&bytes).unwrap();
    assert_eq!(payload.record_id, record.id);
    assert_eq!(payload.order, run.order);
    assert_eq!(payload.years.len(), 40);

    // The stored fit forecasts identically to the in-memory one.
    let future: Vec<f64> = (1..=3)
        .map(|k| run.fit.last_exog() + 5.0 * k as f64)
        .collect();
    assert_eq!(
        payload.fit.get_forecast(3, &future, 0.05).unwrap(),
        run.fit.get_forecast(3, &future, 0.05).unwrap()
    );
}

#[test]
fn concurrent_activations_keep_one_active() {
    let (_dir, registry) = registry();
    let ids: Vec<u64> = (0..4)
        .map(|i| registry.register(&training_run(i + 1), 3).unwrap().id)
        .collect();

    let registry = Arc::new(registry);
    let handles: Vec<_> = ids
        .iter()
        .map(|&id| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                let _ = registry.activate(id, "race");
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let active: Vec<u64> = registry
        .list_all()
        .iter()
        .filter(|r| r.status == ModelStatus::Active)
        .map(|r| r.id)
        .collect();
    assert_eq!(active.len(), 1, "exactly one active record, got {active:?}");
}
