//! # Connector Contract
//!
//! Every storage or transport backend for claims implements [`Connector`].
//! Verification, and anything else layered above the contract, only uses the
//! trait's read operations and never reaches into backend internals.

use std::fmt::{Debug, Display};
use std::future::Future;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// A connector stores identities and their claims in some backend.
///
/// Claims are appended per identity, each pointing back at the identity's
/// previous claim, forming a chain from newest to oldest.
pub trait Connector: Send + Sync {
    /// Connector-local reference to a stored claim. Not portable across
    /// connectors; use [`Connector::link_from_reference`] for that.
    type Reference: Clone + Debug + Display + Eq + Hash + Send + Sync;

    /// Handle returned by [`Connector::observe`].
    type Subscription: Send;

    /// Name of the connector, used as the connector segment of links and dids.
    fn name(&self) -> &str;

    /// The did of the identity that made the referenced claim.
    fn get_did_of_claim(&self, reference: &Self::Reference) -> Option<String>;

    /// Reference to the most recent claim made by `identity`, if any.
    fn get_latest_claim(
        &self, identity: &Identity,
    ) -> impl Future<Output = Result<Option<Self::Reference>>> + Send;

    /// Create a new identity (key pair) within the connector.
    fn new_identity(&self) -> impl Future<Output = Result<Identity>> + Send;

    /// Append a claim to the identity's chain.
    ///
    /// The new claim's `previous` is the identity's prior latest claim.
    fn claim(
        &self, identity: &Identity, data: Value,
    ) -> impl Future<Output = Result<Self::Reference>> + Send;

    /// Dereference a claim.
    ///
    /// `identity` is the party requesting access, when known. Returns `None`
    /// when the claim does not exist.
    fn get(
        &self, reference: &Self::Reference, identity: Option<&Identity>,
    ) -> impl Future<Output = Result<Option<ClaimRecord<Self::Reference>>>> + Send;

    /// Subscribe to new claims, optionally only those made by `identity`.
    fn observe(
        &self, identity: Option<&Identity>,
    ) -> impl Future<Output = Result<Self::Subscription>> + Send;

    /// Import a claim made (and linked to by `link`) on another connector
    /// into the identity's chain on this one.
    ///
    /// Connectors must opt in by overriding this method.
    fn import(
        &self, identity: &Identity, link: &str, data: Value,
    ) -> impl Future<Output = Result<Self::Reference>> + Send {
        let _ = (identity, link, data);
        async { Err(Error::Unsupported("Claim import".into())) }
    }

    /// Verify that `identity` has, at some point, claimed `data`.
    ///
    /// See [`crate::verify()`].
    fn verify(
        &self, identity: &Identity, data: &Value,
    ) -> impl Future<Output = Result<Option<Self::Reference>>> + Send {
        crate::verify::verify(self, identity, data)
    }

    /// The link for a claim stored by this connector.
    fn link_from_reference(&self, reference: &Self::Reference) -> Option<String> {
        discipl_did::link_from_reference(self.name(), &reference.to_string())
    }

    /// The did for an identity reference held by this connector.
    fn did_from_reference(&self, reference: &str) -> Option<String> {
        discipl_did::did_from_reference(self.name(), reference)
    }
}

/// Check `name` is usable as a connector name.
///
/// Connectors call this on construction so misconfiguration fails fast.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if the name is empty or contains the
/// identifier delimiter.
pub fn validate_name(name: &str) -> Result<()> {
    discipl_did::validate_connector_name(name)
        .map_err(|e| Error::Configuration(format!("{e}: {name:?}")))
}

/// A dereferenced claim.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ClaimRecord<R> {
    /// The claimed data.
    pub data: Value,

    /// The claim made immediately before this one by the same identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<R>,
}

impl<R> ClaimRecord<R> {
    /// Create a record with no previous claim.
    #[must_use]
    pub const fn new(data: Value) -> Self {
        Self { data, previous: None }
    }

    /// Set the previous claim.
    #[must_use]
    pub fn previous(mut self, previous: R) -> Self {
        self.previous = Some(previous);
        self
    }
}

/// An identity, represented by its key pair.
///
/// Identities used only to read or verify claims carry no private key.
#[derive(Clone, Default, Deserialize, Serialize, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[zeroize(skip)]
    public_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    private_key: Option<String>,
}

impl Identity {
    /// Create an identity from a key pair.
    #[must_use]
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: Some(private_key.into()),
        }
    }

    /// Create a read-only identity from its public key.
    #[must_use]
    pub fn from_public_key(public_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: None,
        }
    }

    /// The identity's public key.
    #[must_use]
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// The identity's private key, when held.
    #[must_use]
    pub fn private_key(&self) -> Option<&str> {
        self.private_key.as_deref()
    }

    /// The identity's did on the named connector.
    #[must_use]
    pub fn did(&self, connector_name: &str) -> Option<String> {
        discipl_did::did_from_reference(connector_name, &self.public_key)
    }
}

impl Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("public_key", &self.public_key)
            .field("private_key", &self.private_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
