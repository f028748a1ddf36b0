use thiserror::Error;

// ---------------------------------------------------------------------------
// Library error type
// ---------------------------------------------------------------------------

/// Errors raised by the numeric core and the exporters.
#[derive(Debug, Error)]
pub enum ResonatorError {
    /// An input lies outside the physically meaningful domain.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The requested export format is not known.
    #[error("unsupported export extension: .{0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, ResonatorError>;

impl ResonatorError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        ResonatorError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

// ---------------------------------------------------------------------------
// Range checks shared by the model and the config layer
// ---------------------------------------------------------------------------

/// Require a finite, strictly positive value.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ResonatorError::invalid(name, value, "must be finite and > 0"))
    }
}

/// Require a value in the closed unit interval.
pub(crate) fn ensure_unit_interval(name: &'static str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ResonatorError::invalid(name, value, "must lie in [0, 1]"))
    }
}
