//! Dashboard views derived from the device set
//!
//! Aggregation, KPI derivation and the appliance breakdown are pure functions
//! over the device set; `Dashboard` holds the set and caches their results.

pub mod aggregation;
pub mod breakdown;
pub mod kpi;
pub mod report;
pub mod state;
pub mod types;

pub use aggregation::{aggregate, aggregate_on};
pub use breakdown::breakdown;
pub use kpi::derive_kpis;
pub use state::{toggle, Dashboard, ToggleOutcome};
pub use types::*;
