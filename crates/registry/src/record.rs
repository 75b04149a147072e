//! Model records: one row per fitted configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use helios_arimax::Order;
use helios_evaluate::{Metrics, ResidualDiagnostics};
use helios_series::{SeriesStats, YearRange};

/// Lifecycle state of a fitted configuration.
///
/// Every successful training run starts as `Candidate`. At most one
/// record is `Active` at a time; activation archives the previous active
/// record. `Archived` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelStatus {
    Candidate,
    Active,
    Archived,
}

impl std::fmt::Display for ModelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ModelStatus::Candidate => "candidate",
            ModelStatus::Active => "active",
            ModelStatus::Archived => "archived",
        };
        f.write_str(s)
    }
}

/// One fitted configuration and everything a promotion decision needs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Unique id, assigned at registration.
    pub id: u64,
    /// The (p, d, q) order.
    pub order: Order,
    /// Lifecycle state.
    pub status: ModelStatus,
    /// Held-out accuracy metrics.
    pub metrics: Metrics,
    /// Advisory residual diagnostics.
    pub diagnostics: ResidualDiagnostics,
    /// Training-window rows.
    pub train_size: usize,
    /// Held-out rows.
    pub test_size: usize,
    /// Requested split ratio.
    pub split_ratio: f64,
    /// Matched year range of the training data.
    pub year_range: YearRange,
    /// Target min/max/mean over the matched years.
    pub target_stats: SeriesStats,
    /// Exogenous min/max/mean over the matched years.
    pub exog_stats: SeriesStats,
    /// Default forecast horizon attached to this model.
    pub forecast_horizon_years: u32,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Set when the record is (or was) activated.
    pub activated_at: Option<DateTime<Utc>>,
    /// Who activated it.
    pub activated_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display() {
        assert_eq!(ModelStatus::Candidate.to_string(), "candidate");
        assert_eq!(ModelStatus::Active.to_string(), "active");
        assert_eq!(ModelStatus::Archived.to_string(), "archived");
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ModelStatus::Active).unwrap(),
            "\"active\""
        );
        let back: ModelStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(back, ModelStatus::Archived);
    }

    #[test]
    fn record_serde_round_trip() {
        let record = ModelRecord {
            id: 42,
            order: Order::new(1, 1, 2),
            status: ModelStatus::Candidate,
            metrics: Metrics {
                mape: 3.2,
                rmse: 12.5,
                mae: 9.8,
                r2: 0.94,
            },
            diagnostics: ResidualDiagnostics {
                ljung_box_pvalue: Some(0.4),
                ljung_box_pass: Some(true),
                jarque_bera_pvalue: Some(0.02),
                jarque_bera_pass: Some(false),
                residual_mean: 0.01,
                residual_std: 1.5,
                residual_min: -3.0,
                residual_max: 4.0,
            },
            train_size: 48,
            test_size: 12,
            split_ratio: 0.8,
            year_range: YearRange {
                start: 1965,
                end: 2024,
            },
            target_stats: SeriesStats {
                min: 50.0,
                max: 900.0,
                mean: 400.0,
            },
            exog_stats: SeriesStats {
                min: 1e9,
                max: 1e12,
                mean: 4e11,
            },
            forecast_horizon_years: 3,
            created_at: Utc::now(),
            activated_at: None,
            activated_by: None,
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: ModelRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, 42);
        assert_eq!(back.status, ModelStatus::Candidate);
        assert_eq!(back.order, Order::new(1, 1, 2));
        assert_eq!(back.metrics, record.metrics);
        assert!(back.activated_at.is_none());
    }
}
