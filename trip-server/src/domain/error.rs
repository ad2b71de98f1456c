//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! raised when a candidate or a set of preferences is constructed, so the
//! scoring code that receives these types can trust their validity.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Candidate has no legs
    #[error("candidate must have at least one leg")]
    EmptyLegs,

    /// A numeric metric is negative, NaN or infinite
    #[error("invalid {field}: {value} (must be finite and non-negative)")]
    InvalidMetric { field: &'static str, value: f64 },

    /// A precomputed score lies outside [0, 1]
    #[error("invalid score: {0} (must be within 0..=1)")]
    InvalidScore(f64),

    /// Coordinates outside -90..=90 latitude or -180..=180 longitude
    #[error("invalid coordinates: ({lat}, {lon})")]
    InvalidCoordinates { lat: f64, lon: f64 },

    /// A preference weight is negative, NaN or infinite
    #[error("invalid weight {field}: {value} (must be finite and non-negative)")]
    InvalidWeight { field: &'static str, value: f64 },

    /// Unknown transport mode name
    #[error("unknown transport mode: {0}")]
    UnknownMode(String),
}
