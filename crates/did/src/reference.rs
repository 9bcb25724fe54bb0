//! Conversions between connector-local references and canonical links/dids.

use crate::identifier::validate_connector_name;
use crate::{DELIMITER, DID_PREFIX, LINK_PREFIX};

/// Construct a link for the claim `reference` stored by `connector_name`.
///
/// Returns `None` when the reference is empty or the connector name is not
/// usable (see [`validate_connector_name`]).
#[must_use]
pub fn link_from_reference(connector_name: &str, reference: &str) -> Option<String> {
    encode(LINK_PREFIX, connector_name, reference)
}

/// Construct a did for the identity `reference` held by `connector_name`.
///
/// Returns `None` when the reference is empty or the connector name is not
/// usable.
#[must_use]
pub fn did_from_reference(connector_name: &str, reference: &str) -> Option<String> {
    encode(DID_PREFIX, connector_name, reference)
}

/// Returns true if `s` is a Discipl link.
#[must_use]
pub fn is_link(s: &str) -> bool {
    s.starts_with(LINK_PREFIX)
}

/// Returns true if `s` is a Discipl did.
#[must_use]
pub fn is_did(s: &str) -> bool {
    s.starts_with(DID_PREFIX)
}

/// The name of the connector a link or did belongs to.
///
/// Returns `None` when `s` is neither a link nor a did, or the connector
/// segment is empty.
#[must_use]
pub fn connector_name(s: &str) -> Option<&str> {
    if !is_link(s) && !is_did(s) {
        return None;
    }
    split(s)?.0
}

/// The connector-local reference contained in a link.
///
/// Everything after the third delimiter is returned verbatim.
#[must_use]
pub fn reference_from_link(link: &str) -> Option<&str> {
    if !is_link(link) {
        return None;
    }
    split(link)?.1
}

/// The connector-local reference contained in a did.
#[must_use]
pub fn reference_from_did(did: &str) -> Option<&str> {
    if !is_did(did) {
        return None;
    }
    split(did)?.1
}

fn encode(prefix: &str, connector_name: &str, reference: &str) -> Option<String> {
    if reference.is_empty() || validate_connector_name(connector_name).is_err() {
        return None;
    }
    Some(format!("{prefix}{connector_name}{DELIMITER}{reference}"))
}

// Split a prefixed identifier into its non-empty connector segment and
// reference remainder, each independently optional.
fn split(s: &str) -> Option<(Option<&str>, Option<&str>)> {
    let mut segments = s.splitn(4, DELIMITER);
    segments.next()?;
    segments.next()?;
    let name = segments.next().filter(|n| !n.is_empty());
    let reference = segments.next().filter(|r| !r.is_empty());
    Some((name, reference))
}
