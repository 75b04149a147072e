use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use helios_arimax::Order;
use helios_forecast::Scenario;

/// Helios energy-consumption forecaster.
#[derive(Parser)]
#[command(
    name = "helios",
    version,
    about = "GDP-driven ARIMAX forecasting of yearly energy consumption"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Align the data, fit a configuration, and register it as a candidate.
    Train(TrainArgs),
    /// Produce a scenario forecast from the active model.
    Predict(PredictArgs),
    /// Inspect and manage the model registry.
    Models(ModelsArgs),
}

/// How the (p,d,q) order is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OrderMode {
    /// Bounded stepwise AIC search.
    Auto,
    /// Use the order given via --order.
    Manual,
}

/// Arguments for the `train` subcommand.
#[derive(clap::Args)]
pub struct TrainArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "helios.toml")]
    pub config: PathBuf,

    /// Override the train/test split ratio from config.
    #[arg(long)]
    pub split_ratio: Option<f64>,

    /// Order selection mode.
    #[arg(long, value_enum, default_value = "auto")]
    pub order_mode: OrderMode,

    /// Manual (p,d,q) order, e.g. "1,1,2". Required with --order-mode manual.
    #[arg(long)]
    pub order: Option<Order>,

    /// Override the default forecast horizon recorded with the model.
    #[arg(long)]
    pub horizon: Option<u32>,
}

/// Arguments for the `predict` subcommand.
#[derive(clap::Args)]
pub struct PredictArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "helios.toml")]
    pub config: PathBuf,

    /// Exogenous growth scenario.
    #[arg(short, long)]
    pub scenario: Scenario,

    /// Forecast horizon in years; defaults to the active model's setting.
    #[arg(short, long)]
    pub years: Option<usize>,
}

/// Arguments for the `models` subcommand.
#[derive(clap::Args)]
pub struct ModelsArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "helios.toml")]
    pub config: PathBuf,

    /// Registry operation.
    #[command(subcommand)]
    pub command: ModelsCommand,
}

/// Registry operations.
#[derive(Subcommand)]
pub enum ModelsCommand {
    /// List every model: active first, then candidates, then archived.
    List,
    /// Promote a candidate to active, archiving the previous active model.
    Activate {
        /// Id of the candidate to activate.
        id: u64,
        /// Who is activating it.
        #[arg(long, default_value = "admin")]
        by: String,
    },
    /// Delete a candidate and its artifact.
    Delete {
        /// Id of the candidate to delete.
        id: u64,
    },
    /// One-time first activation: promote the earliest candidate.
    Init {
        /// Who is initializing the registry.
        #[arg(long, default_value = "system")]
        by: String,
    },
}
