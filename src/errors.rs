//! Error types for the energy dashboard
//!
//! Uses thiserror for ergonomic error definitions.
//! These errors can be converted to anyhow::Error in the main application.

/// Device reading source errors
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read device data from {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("Failed to parse device data: {0}")]
    ParseError(String),

    #[error("Invalid reading for device '{device}': {reason}")]
    InvalidReading { device: String, reason: String },

    #[error("Invalid appliance profile '{name}': {reason}")]
    InvalidProfile { name: String, reason: String },
}

/// Report rendering errors
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to serialize data: {error:?}")]
    SerializationError { error: serde_json::Error },

    #[error("Failed to format report: {0}")]
    FormatError(#[from] std::fmt::Error),
}
