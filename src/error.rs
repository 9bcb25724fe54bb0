//! # Errors

/// Result type for connector operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by connectors and the verifier.
///
/// Malformed identifiers and broken claim chains are not errors: the codec
/// and [`crate::verify`] report those as `None`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The connector was configured incorrectly. Raised at construction.
    #[error("invalid connector configuration: {0}")]
    Configuration(String),

    /// The connector does not implement the requested operation.
    #[error("{0} is not supported")]
    Unsupported(String),

    /// Claim data could not be serialized to canonical JSON.
    #[error("issue canonicalizing claim data: {0}")]
    Serialization(String),

    /// A fault in the connector's backend, passed through unchanged.
    #[error(transparent)]
    Connector(#[from] anyhow::Error),
}
