//! Models command: list, activate, delete, and bootstrap registry rows.

use anyhow::{Context, Result};
use tracing::info_span;

use helios_registry::{ModelRecord, Registry};

use crate::cli::{ModelsArgs, ModelsCommand};
use crate::config::HeliosConfig;

pub fn run(args: ModelsArgs) -> Result<()> {
    let _cmd = info_span!("models").entered();
    let config = HeliosConfig::load(&args.config)?;
    let registry = Registry::open(&config.registry.root).context("failed to open registry")?;

    match args.command {
        ModelsCommand::List => {
            let records = registry.list_all();
            if records.is_empty() {
                println!("no models registered yet");
                return Ok(());
            }
            println!(
                "{:>4}  {:<9}  {:<8}  {:>8}  {:>8}  {:>6}  {:<11}  {}",
                "id", "status", "order", "mape", "rmse", "r2", "years", "created"
            );
            for record in &records {
                print_row(record);
            }
        }
        ModelsCommand::Activate { id, by } => {
            let record = registry.activate(id, &by)?;
            println!(
                "model {} activated by {} (order {}, mape {:.2}%)",
                record.id, by, record.order, record.metrics.mape
            );
        }
        ModelsCommand::Delete { id } => {
            registry.delete(id)?;
            println!("candidate model {id} deleted");
        }
        ModelsCommand::Init { by } => {
            let record = registry.bootstrap(&by)?;
            println!(
                "registry initialized: model {} is now active (order {})",
                record.id, record.order
            );
        }
    }
    Ok(())
}

fn print_row(record: &ModelRecord) {
    println!(
        "{:>4}  {:<9}  {:<8}  {:>7.2}%  {:>8.2}  {:>6.3}  {:<11}  {}",
        record.id,
        record.status.to_string(),
        record.order.to_string(),
        record.metrics.mape,
        record.metrics.rmse,
        record.metrics.r2,
        record.year_range.to_string(),
        record.created_at.format("%Y-%m-%d %H:%M"),
    );
}
