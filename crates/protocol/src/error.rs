//! Error types for the protocol crate.

use thiserror::Error;

/// Provider error type covering every failure a caller can observe.
///
/// Permission failures are always reported before existence failures, so the
/// variant a caller receives never reveals whether a denied target exists.
#[derive(Debug, Error)]
pub enum ProviderError {
    // Routing errors
    /// The request URI does not match any known route.
    #[error("unknown uri: {0}")]
    NotFound(String),

    /// The string could not be parsed as a URI at all.
    #[error("invalid uri: {0}")]
    InvalidUri(String),

    // Open errors
    /// The addressed file does not exist, or the address itself is invalid.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// The open mode string is not one of the canonical modes.
    #[error("invalid open mode: {0:?}")]
    InvalidMode(String),

    // Gate errors
    /// The relevant permission flag is not enabled.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Insert, update and delete are never supported.
    #[error("operation not supported: {0}")]
    OperationNotSupported(&'static str),

    /// Host filesystem failure not covered by a more specific variant.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProviderError {
    /// Whether this error came from the permission gate.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }

    /// Whether this error reports a missing route or file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::FileNotFound(_))
    }
}

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
