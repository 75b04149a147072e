//! The forecast service: loads the promoted artifact (with a
//! fingerprint-keyed cache) and produces scenario forecasts.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, info};

use helios_registry::{ArtifactPayload, Registry};

use crate::error::ForecastError;
use crate::scenario::{GrowthBaseline, Scenario};

/// Serving configuration.
#[derive(Clone, Copy, Debug)]
pub struct ForecastConfig {
    /// Source of the moderate growth rate.
    pub baseline: GrowthBaseline,
    /// Offset added (optimistic) or subtracted (pessimistic) from the
    /// baseline.
    pub scenario_delta: f64,
    /// Confidence level for the bounds, e.g. 0.95.
    pub confidence_level: f64,
    /// Largest horizon a caller may request.
    pub max_horizon: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            baseline: GrowthBaseline::HistoricalAverage,
            scenario_delta: 0.02,
            confidence_level: 0.95,
            max_horizon: 10,
        }
    }
}

/// One forecast row.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ForecastEntry {
    pub year: i32,
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
}

/// A complete scenario forecast from the active model.
#[derive(Clone, Debug, Serialize)]
pub struct Forecast {
    /// Id of the model that produced the forecast.
    pub model_id: u64,
    pub scenario: Scenario,
    /// The compounded yearly exogenous growth rate actually used.
    pub growth_rate: f64,
    pub entries: Vec<ForecastEntry>,
    pub last_actual_year: i32,
    pub last_actual_value: f64,
}

struct CachedArtifact {
    fingerprint: String,
    payload: Arc<ArtifactPayload>,
}

/// Serves forecasts from whatever model is currently promoted.
///
/// The deserialized artifact is cached per service instance, keyed by a
/// content fingerprint: a hit skips deserialization, any fingerprint
/// change forces a reload before serving. Nothing global — two services
/// keep two caches.
pub struct ForecastService {
    registry: Arc<Registry>,
    config: ForecastConfig,
    cache: Mutex<Option<CachedArtifact>>,
}

impl ForecastService {
    /// Creates a service over a registry handle.
    pub fn new(registry: Arc<Registry>, config: ForecastConfig) -> Self {
        Self {
            registry,
            config,
            cache: Mutex::new(None),
        }
    }

    /// Produces a scenario forecast for `horizon` years.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ForecastError::InvalidHorizon`] | horizon outside `1..=max` |
    /// | [`ForecastError::NoActiveModel`] | nothing is active |
    /// | [`ForecastError::ArtifactMissing`] | active record, missing blob |
    /// | [`ForecastError::ExogHistoryTooShort`] | cannot derive growth |
    /// | [`ForecastError::Engine`] | the artifact fails to forecast |
    pub fn predict(&self, scenario: Scenario, horizon: usize) -> Result<Forecast, ForecastError> {
        if horizon == 0 || horizon > self.config.max_horizon {
            return Err(ForecastError::InvalidHorizon {
                horizon,
                max: self.config.max_horizon,
            });
        }

        let active = self
            .registry
            .get_active()
            .ok_or(ForecastError::NoActiveModel)?;
        let payload = self.load_artifact(active.id)?;

        let baseline = match self.config.baseline {
            GrowthBaseline::Fixed(rate) => rate,
            GrowthBaseline::HistoricalAverage => {
                historical_growth(payload.fit.exog_history())?
            }
        };
        let growth_rate = match scenario {
            Scenario::Optimistic => baseline + self.config.scenario_delta,
            Scenario::Moderate => baseline,
            Scenario::Pessimistic => baseline - self.config.scenario_delta,
        };

        let future_exog = project_exog(payload.fit.last_exog(), growth_rate, horizon);
        let alpha = 1.0 - self.config.confidence_level;
        let bands = payload.fit.get_forecast(horizon, &future_exog, alpha)?;

        let last_actual_year = *payload
            .years
            .last()
            .ok_or(ForecastError::ExogHistoryTooShort { n: 0 })?;
        let entries: Vec<ForecastEntry> = (0..horizon)
            .map(|k| ForecastEntry {
                year: last_actual_year + 1 + k as i32,
                value: bands.mean[k],
                lower: bands.lower[k],
                upper: bands.upper[k],
            })
            .collect();

        info!(
            model_id = payload.record_id,
            %scenario,
            horizon,
            growth_rate,
            "forecast served"
        );
        Ok(Forecast {
            model_id: payload.record_id,
            scenario,
            growth_rate,
            entries,
            last_actual_year,
            last_actual_value: payload.fit.last_target(),
        })
    }

    /// Loads the promoted artifact through the fingerprint cache.
    fn load_artifact(&self, active_id: u64) -> Result<Arc<ArtifactPayload>, ForecastError> {
        let (bytes, fingerprint) = self
            .registry
            .artifacts()
            .load_active()?
            .ok_or(ForecastError::ArtifactMissing { id: active_id })?;

        let mut cache = self.cache.lock().expect("forecast cache lock poisoned");
        if let Some(cached) = cache.as_ref() {
            if cached.fingerprint == fingerprint {
                debug!(%fingerprint, "artifact cache hit");
                return Ok(Arc::clone(&cached.payload));
            }
        }

        let payload = Arc::new(ArtifactPayload::from_bytes(&bytes)?);
        debug!(
            %fingerprint,
            model_id = payload.record_id,
            "artifact (re)loaded"
        );
        *cache = Some(CachedArtifact {
            fingerprint,
            payload: Arc::clone(&payload),
        });
        Ok(payload)
    }
}

/// Mean year-over-year relative growth of the exogenous history.
fn historical_growth(history: &[f64]) -> Result<f64, ForecastError> {
    let rates: Vec<f64> = history
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect();
    if rates.is_empty() {
        return Err(ForecastError::ExogHistoryTooShort { n: history.len() });
    }
    Ok(rates.iter().sum::<f64>() / rates.len() as f64)
}

/// Compounds the exogenous driver forward from its last observed level.
fn project_exog(last: f64, rate: f64, horizon: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(horizon);
    let mut current = last;
    for _ in 0..horizon {
        current *= 1.0 + rate;
        out.push(current);
    }
    out
}
