//! Crate error type.

use thiserror::Error;

/// Errors surfaced by the core GSW operations.
///
/// `decrypt` never returns this type: per the scheme's design, decryption
/// always produces a best-effort integer and never raises on noise.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GswError {
    /// A parameter to `setup_params` (or a value derived from it) is invalid.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A vector or matrix argument has the wrong dimension for the given `Params`.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A plaintext or scalar argument falls outside the documented range for the operation.
    #[error("domain violation: {0}")]
    DomainViolation(String),
}
