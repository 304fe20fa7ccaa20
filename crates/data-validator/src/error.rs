//! Validation Error Types

use thiserror::Error;

/// A configuration parameter that cannot be used
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Value must be strictly positive
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: String, value: f64 },

    /// NaN or infinite value
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Two related values in the wrong order
    #[error("{lower_field} ({lower}) must not exceed {upper_field} ({upper})")]
    Ordering {
        lower_field: String,
        lower: f64,
        upper_field: String,
        upper: f64,
    },

    /// Value rejected for a domain-specific reason
    #[error("{field} is invalid: {reason}")]
    Invalid { field: String, reason: String },
}

impl ValidationError {
    /// Name of the offending parameter
    pub fn field(&self) -> &str {
        match self {
            Self::OutOfRange { field, .. }
            | Self::NotPositive { field, .. }
            | Self::NotFinite { field } => field,
            Self::Ordering { lower_field, .. } => lower_field,
            Self::Invalid { field, .. } => field,
        }
    }
}
