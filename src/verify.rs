//! # Claim Verification
//!
//! Verification answers "has this identity ever claimed this data?" by walking
//! the identity's claim chain from newest to oldest through the
//! [`Connector`] read operations. The first claim whose data is canonically
//! equal to the expected data wins, so a later claim never invalidates an
//! earlier match.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::canonical;
use crate::connector::{Connector, Identity};
use crate::error::Result;

/// Options controlling a chain walk.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOptions {
    /// Maximum number of claims to dereference before giving up. Unbounded
    /// when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

/// Verify `identity` has claimed `data` on `connector`, returning a reference
/// to the most recent matching claim.
///
/// Returns `None` when no claim matches, when the chain is broken (a
/// referenced claim cannot be found), or when the chain loops back on itself.
///
/// # Errors
///
/// Connector errors are returned unchanged. An error is also returned if
/// `data` cannot be canonicalized.
pub async fn verify<C>(
    connector: &C, identity: &Identity, data: &Value,
) -> Result<Option<C::Reference>>
where
    C: Connector + ?Sized,
{
    verify_with(connector, identity, data, &VerifyOptions::default()).await
}

/// Verify with explicit [`VerifyOptions`].
///
/// # Errors
///
/// See [`verify`].
pub async fn verify_with<C>(
    connector: &C, identity: &Identity, data: &Value, options: &VerifyOptions,
) -> Result<Option<C::Reference>>
where
    C: Connector + ?Sized,
{
    tracing::debug!(connector = connector.name(), "verify");

    let expected = canonical::stringify(data)?;
    let mut visited = HashSet::new();
    let mut current = connector.get_latest_claim(identity).await?;

    while let Some(reference) = current {
        if options.max_depth.is_some_and(|max| visited.len() >= max) {
            tracing::warn!(max_depth = visited.len(), "claim chain exceeds maximum depth");
            return Ok(None);
        }
        if !visited.insert(reference.clone()) {
            tracing::warn!(%reference, "claim chain contains a cycle");
            return Ok(None);
        }

        let Some(record) = connector.get(&reference, Some(identity)).await? else {
            tracing::debug!(%reference, "claim chain broken");
            return Ok(None);
        };
        if canonical::matches(&record.data, &expected) {
            return Ok(Some(reference));
        }
        current = record.previous;
    }

    Ok(None)
}
