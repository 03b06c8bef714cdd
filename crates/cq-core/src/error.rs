//! Parameter validation error shared by every `cq-*` crate.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors raised before a simulation starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name:   &'static str,
        value:  String,
        reason: &'static str,
    },
}

/// Shorthand result type for parameter checks.
pub type CoreResult<T> = Result<T, CoreError>;

/// Reject probabilities outside `[0, 1]` (NaN included).
pub fn check_probability(name: &'static str, p: f64) -> CoreResult<f64> {
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(CoreError::InvalidParameter {
            name,
            value:  p.to_string(),
            reason: "must lie in [0, 1]",
        })
    }
}
