//! Forecast scenarios and the growth baseline they offset.

use serde::{Deserialize, Serialize};

/// Exogenous-growth scenario for a forecast request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Optimistic,
    Moderate,
    Pessimistic,
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Scenario::Optimistic => "optimistic",
            Scenario::Moderate => "moderate",
            Scenario::Pessimistic => "pessimistic",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "optimistic" => Ok(Scenario::Optimistic),
            "moderate" => Ok(Scenario::Moderate),
            "pessimistic" => Ok(Scenario::Pessimistic),
            other => Err(format!(
                "unknown scenario '{other}' (expected optimistic, moderate, or pessimistic)"
            )),
        }
    }
}

/// Where the moderate growth rate comes from. Optimistic and pessimistic
/// are fixed offsets from this baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GrowthBaseline {
    /// A configured constant yearly growth rate (fraction, e.g. 0.05).
    Fixed(f64),
    /// Mean year-over-year growth of the exogenous history the active
    /// model was trained on.
    HistoricalAverage,
}
