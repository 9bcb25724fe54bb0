//! # Discipl Core
//!
//! The contract every Discipl connector implements, and claim verification
//! layered on top of it.
//!
//! A connector persists identities and the chain of claims each identity
//! makes. Claims and identities are named across connectors with canonical
//! links and dids (see [`did`]). [`verify()`] works against any connector,
//! using only the contract's read operations.
//!
//! ```rust,ignore
//! let reference = connector.claim(&identity, json!({"need": "beer"})).await?;
//! let found = connector.verify(&identity, &json!({"need": "beer"})).await?;
//! assert_eq!(found, Some(reference));
//! ```

pub mod canonical;
pub mod connector;
mod error;
pub mod verify;

#[cfg(test)]
mod mock;

pub use discipl_did as did;

pub use crate::connector::{ClaimRecord, Connector, Identity, validate_name};
pub use crate::error::{Error, Result};
pub use crate::verify::{VerifyOptions, verify, verify_with};

/// Value connectors and policy layers use to mark an access-control rule as
/// "allow".
pub const ALLOW: &str = "DISCIPL_ALLOW";
