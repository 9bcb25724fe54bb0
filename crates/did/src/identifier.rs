//! Validated link/did values.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::ParseError;
use crate::reference::{connector_name, is_did, is_link, reference_from_did, reference_from_link};
use crate::{DELIMITER, DID_PREFIX, LINK_PREFIX};

/// What an [`Identifier`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A single claim.
    Link,

    /// An identity.
    Did,
}

impl Kind {
    /// The canonical string prefix for this kind of identifier.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Link => LINK_PREFIX,
            Self::Did => DID_PREFIX,
        }
    }
}

/// A parsed link or did.
///
/// Round-trips through `Display`/`FromStr` without loss.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identifier {
    kind: Kind,
    connector: String,
    reference: String,
}

impl Identifier {
    /// Create a new identifier.
    ///
    /// # Errors
    ///
    /// Will return an error if the connector name is invalid (see
    /// [`validate_connector_name`]) or the reference is empty.
    pub fn new(kind: Kind, connector: &str, reference: &str) -> Result<Self, ParseError> {
        validate_connector_name(connector)?;
        if reference.is_empty() {
            return Err(ParseError::MissingReference);
        }
        Ok(Self {
            kind,
            connector: connector.to_string(),
            reference: reference.to_string(),
        })
    }

    /// Whether this is a link or a did.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    /// Name of the connector holding the referenced claim or identity.
    #[must_use]
    pub fn connector(&self) -> &str {
        &self.connector
    }

    /// Connector-local reference.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

impl FromStr for Identifier {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, reference) = if is_link(s) {
            (Kind::Link, reference_from_link(s))
        } else if is_did(s) {
            (Kind::Did, reference_from_did(s))
        } else {
            return Err(ParseError::UnknownPrefix);
        };

        let connector = connector_name(s).ok_or(ParseError::InvalidConnectorName)?;
        let reference = reference.ok_or(ParseError::MissingReference)?;

        Ok(Self {
            kind,
            connector: connector.to_string(),
            reference: reference.to_string(),
        })
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{DELIMITER}{}", self.kind.prefix(), self.connector, self.reference)
    }
}

/// Check a connector name can be embedded in a link or did.
///
/// # Errors
///
/// Will return an error if the name is empty or contains the delimiter.
pub fn validate_connector_name(name: &str) -> Result<(), ParseError> {
    if name.is_empty() || name.contains(DELIMITER) {
        return Err(ParseError::InvalidConnectorName);
    }
    Ok(())
}
