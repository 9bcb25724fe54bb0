//! Identifier parse errors.

/// Reasons a string is not a valid Discipl identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The string starts with neither the link nor the did prefix.
    UnknownPrefix,

    /// The connector segment is empty or contains the delimiter.
    InvalidConnectorName,

    /// Nothing follows the connector segment.
    MissingReference,
}

impl std::error::Error for ParseError {}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPrefix => write!(f, "not a discipl link or did"),
            Self::InvalidConnectorName => write!(f, "invalid connector name"),
            Self::MissingReference => write!(f, "missing reference"),
        }
    }
}
