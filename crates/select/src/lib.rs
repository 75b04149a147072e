//! # helios-select
//!
//! ARIMAX order selection, automatic or manual.
//!
//! ## Two Usage Paths
//!
//! **Manual** (caller knows the order):
//! ```ignore
//! let order = validate_manual(Order::new(1, 1, 1), &bounds)?;
//! ```
//!
//! **Automatic** (bounded stepwise AIC search):
//! ```ignore
//! let selection = select_auto(&target, &exog, &bounds, None)?;
//! ```
//!
//! The search ranks candidates by AIC; promotion decisions elsewhere rank
//! fitted models by held-out accuracy. The two criteria are independent on
//! purpose — neither is treated as authoritative for the other's job.

mod bounds;
mod error;
mod search;

pub use bounds::{validate_manual, OrderBounds};
pub use error::SelectError;
pub use search::{derive_d, select_auto, Selection};
