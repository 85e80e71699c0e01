//! Home Energy Dashboard
//!
//! Synthesizes per-device power readings, aggregates them into hourly totals
//! and derives the dashboard's headline metrics.

pub mod config;
pub mod dashboard;
pub mod device;
pub mod errors;

pub use config::Config;
pub use dashboard::Dashboard;
pub use device::{DeviceSource, JsonFileSource, MockDeviceSource};
