//! Device model and reading sources
//!
//! Produces the device set every dashboard view is derived from.

pub mod source;
pub mod types;

pub use source::{DeviceSource, JsonFileSource, MockDeviceSource};
pub use types::*;
