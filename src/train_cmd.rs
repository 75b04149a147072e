//! Train command: align, select an order, fit, evaluate, register.

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use helios_arimax::Order;
use helios_evaluate::{Metrics, ResidualDiagnostics};
use helios_registry::Registry;
use helios_select::{select_auto, validate_manual};
use helios_series::align;
use helios_train::fit;

use crate::cli::{OrderMode, TrainArgs};
use crate::config::HeliosConfig;
use crate::convert;

/// Structured training outcome for the caller to map onto its own
/// transport (exit codes here, HTTP elsewhere). Failures are never
/// swallowed: they become `status = "error"` with the typed error's
/// message.
#[derive(Serialize)]
struct TrainOutcome {
    status: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<TrainDetails>,
}

#[derive(Serialize)]
struct TrainDetails {
    model_id: u64,
    order: Order,
    order_mode: &'static str,
    rows_used: usize,
    year_range: String,
    train_size: usize,
    test_size: usize,
    split_ratio: f64,
    metrics: Metrics,
    diagnostics: ResidualDiagnostics,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_aic: Option<f64>,
}

/// Run the full training pipeline and print the structured outcome.
pub fn run(args: TrainArgs) -> Result<()> {
    let _cmd = info_span!("train").entered();
    let config = HeliosConfig::load(&args.config)?;

    match train(&args, &config) {
        Ok(outcome) => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(())
        }
        Err(e) => {
            let outcome = TrainOutcome {
                status: "error",
                message: format!("{e:#}"),
                details: None,
            };
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Err(anyhow!("training failed"))
        }
    }
}

fn train(args: &TrainArgs, config: &HeliosConfig) -> Result<TrainOutcome> {
    // 1. Read both series with strict column names
    info!(path = %config.data.target.display(), "reading target series");
    let target = helios_io::read_series(
        &config.data.target,
        &config.data.target_value_column,
        &config.data.target_year_column,
        &config.data.target_value_column,
    )?;
    info!(path = %config.data.exogenous.display(), "reading exogenous series");
    let exogenous = helios_io::read_series(
        &config.data.exogenous,
        &config.data.exog_value_column,
        &config.data.exog_year_column,
        &config.data.exog_value_column,
    )?;

    // 2. Align by year intersection
    let aligned = align(&target, &exogenous, config.data.min_years)?;
    info!(
        rows = aligned.len(),
        range = %aligned.year_range(),
        "series aligned"
    );

    // 3. Choose the order
    let bounds = convert::build_order_bounds(&config.selection);
    let (order, order_mode, search_aic) = match args.order_mode {
        OrderMode::Manual => {
            let requested = args
                .order
                .ok_or_else(|| anyhow!("--order is required with --order-mode manual"))?;
            (validate_manual(requested, &bounds)?, "manual", None)
        }
        OrderMode::Auto => {
            if args.order.is_some() {
                bail!("--order only applies with --order-mode manual");
            }
            let selection = select_auto(
                aligned.target(),
                aligned.exogenous(),
                &bounds,
                config.selection.d,
            )?;
            info!(order = %selection.order, aic = selection.aic, "automatic order selected");
            (selection.order, "auto", Some(selection.aic))
        }
    };

    // 4. Fit and evaluate
    let split = convert::build_split_spec(&config.train, args.split_ratio);
    let deadline = Duration::from_secs(config.train.timeout_secs);
    let run = fit(&aligned, order, &split, deadline)?;

    // 5. Register as a candidate
    let registry = Registry::open(&config.registry.root).context("failed to open registry")?;
    let horizon = args.horizon.unwrap_or(config.train.forecast_horizon_years);
    let record = registry.register(&run, horizon)?;

    Ok(TrainOutcome {
        status: "success",
        message: format!(
            "model trained on {} data points and saved as candidate (id {}); \
             activate it to start serving forecasts",
            run.dataset.rows, record.id
        ),
        details: Some(TrainDetails {
            model_id: record.id,
            order,
            order_mode,
            rows_used: run.dataset.rows,
            year_range: run.dataset.year_range.to_string(),
            train_size: run.split.train_size,
            test_size: run.split.test_size,
            split_ratio: run.split.split_ratio,
            metrics: run.metrics,
            diagnostics: run.diagnostics,
            search_aic,
        }),
    })
}
