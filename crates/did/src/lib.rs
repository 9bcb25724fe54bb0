//! # Discipl Identifiers
//!
//! Connectors name claims and identities with two canonical string forms that
//! are portable across backends:
//!
//! - a **link** references a single claim: `link:discipl:<connector>:<reference>`
//! - a **did** references an identity: `did:discipl:<connector>:<reference>`
//!
//! The connector name is always the third colon-delimited segment and never
//! contains a colon. The reference is the remainder of the string and may
//! itself contain colons.
//!
//! Conversions never fail loudly: malformed input yields `None` so callers can
//! branch without error handling. For a validated value, parse an
//! [`Identifier`].

mod error;
mod identifier;
mod reference;

pub use self::error::ParseError;
pub use self::identifier::{Identifier, Kind, validate_connector_name};
pub use self::reference::*;

/// Delimiter between identifier segments.
pub const DELIMITER: char = ':';

/// Prefix shared by all claim links.
pub const LINK_PREFIX: &str = "link:discipl:";

/// Prefix shared by all identity dids.
pub const DID_PREFIX: &str = "did:discipl:";
