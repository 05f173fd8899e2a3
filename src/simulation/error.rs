//! Errors surfaced while loading or validating configuration.

use thiserror::Error;

/// Failure to obtain a usable [`Params`](super::params::Params).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The parameter file could not be read or written.
    #[error("parameter file error: {0}")]
    Io(#[from] std::io::Error),

    /// The parameter file is not valid JSON for `Params`.
    #[error("parameter JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is out of its allowed range.
    #[error("invalid parameter `{field}`: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}
