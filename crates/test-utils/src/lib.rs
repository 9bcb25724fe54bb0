//! # Test Utilities
//!
//! An in-memory [`Connector`] for exercising connector-agnostic code such as
//! verification. Claims live in process memory and are lost on drop.

use anyhow::anyhow;
use base64ct::{Base64UrlUnpadded, Encoding};
use dashmap::DashMap;
use discipl_core::{ClaimRecord, Connector, Identity, Result, did, validate_name};
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use serde_json::Value;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const CHANNEL_CAPACITY: usize = 64;

/// Install a `tracing` subscriber writing to the test harness. Filtered by
/// `RUST_LOG`. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Connector keeping claims in memory.
pub struct MemoryConnector {
    name: String,
    claims: DashMap<String, Stored>,
    latest: DashMap<String, Option<String>>,
    sender: broadcast::Sender<Observed>,
}

struct Stored {
    owner: String,
    record: ClaimRecord<String>,
    source: Option<String>,
}

/// A claim announced to observers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Observed {
    /// Did of the claiming identity.
    pub did: String,

    /// Link to the new claim.
    pub link: String,

    /// The claimed data.
    pub data: Value,
}

impl MemoryConnector {
    /// Create a connector with the given name.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the name cannot be used in links.
    pub fn new(name: &str) -> Result<Self> {
        validate_name(name)?;
        Ok(Self::named(name))
    }

    fn named(name: &str) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            name: name.to_string(),
            claims: DashMap::new(),
            latest: DashMap::new(),
            sender,
        }
    }

    /// The link a claim was imported from, if it was imported.
    #[must_use]
    pub fn source_of(&self, reference: &str) -> Option<String> {
        self.claims.get(reference)?.source.clone()
    }

    fn append(&self, identity: &Identity, data: Value, source: Option<String>) -> Result<String> {
        check_key_pair(identity)?;
        let owner = identity.public_key().to_string();
        let reference = Uuid::new_v4().to_string();

        // hold the identity's entry so concurrent claims serialize, and are
        // announced in chain order
        let mut latest = self.latest.entry(owner.clone()).or_default();
        let record = ClaimRecord {
            data: data.clone(),
            previous: latest.take(),
        };
        self.claims.insert(reference.clone(), Stored { owner, record, source });
        *latest = Some(reference.clone());

        if let (Some(did), Some(link)) =
            (identity.did(&self.name), self.link_from_reference(&reference))
        {
            // no receivers is fine
            let _ = self.sender.send(Observed { did, link, data });
        }
        drop(latest);

        tracing::debug!(connector = %self.name, %reference, "claim appended");
        Ok(reference)
    }
}

impl Default for MemoryConnector {
    fn default() -> Self {
        Self::named("memory")
    }
}

impl Connector for MemoryConnector {
    type Reference = String;
    type Subscription = Subscription;

    fn name(&self) -> &str {
        &self.name
    }

    fn get_did_of_claim(&self, reference: &String) -> Option<String> {
        let stored = self.claims.get(reference)?;
        self.did_from_reference(&stored.owner)
    }

    async fn get_latest_claim(&self, identity: &Identity) -> Result<Option<String>> {
        Ok(self.latest.get(identity.public_key()).and_then(|r| r.value().clone()))
    }

    async fn new_identity(&self) -> Result<Identity> {
        let signing_key = SigningKey::generate(&mut OsRng);
        let public_key = Base64UrlUnpadded::encode_string(signing_key.verifying_key().as_bytes());
        let private_key = Base64UrlUnpadded::encode_string(signing_key.as_bytes());

        tracing::debug!(connector = %self.name, %public_key, "new identity");
        Ok(Identity::new(public_key, private_key))
    }

    async fn claim(&self, identity: &Identity, data: Value) -> Result<String> {
        self.append(identity, data, None)
    }

    async fn get(
        &self, reference: &String, _identity: Option<&Identity>,
    ) -> Result<Option<ClaimRecord<String>>> {
        Ok(self.claims.get(reference).map(|stored| stored.record.clone()))
    }

    async fn observe(&self, identity: Option<&Identity>) -> Result<Subscription> {
        let did = match identity {
            Some(identity) => Some(
                identity.did(&self.name).ok_or_else(|| anyhow!("identity has no public key"))?,
            ),
            None => None,
        };
        Ok(Subscription {
            receiver: self.sender.subscribe(),
            did,
        })
    }

    async fn import(&self, identity: &Identity, link: &str, data: Value) -> Result<String> {
        if !did::is_link(link) {
            return Err(anyhow!("not a discipl link: {link}").into());
        }
        self.append(identity, data, Some(link.to_string()))
    }
}

/// Stream of claims made on a [`MemoryConnector`] after subscribing.
pub struct Subscription {
    receiver: broadcast::Receiver<Observed>,
    did: Option<String>,
}

impl Subscription {
    /// Wait for the next observed claim. Returns `None` once the connector
    /// has been dropped.
    pub async fn next(&mut self) -> Option<Observed> {
        loop {
            match self.receiver.recv().await {
                Ok(observed) => {
                    if self.did.as_ref().is_none_or(|did| *did == observed.did) {
                        return Some(observed);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "subscriber lagging");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

// The private key must belong to the identity making the claim.
fn check_key_pair(identity: &Identity) -> Result<()> {
    let Some(private_key) = identity.private_key() else {
        return Err(anyhow!("identity has no private key").into());
    };
    let bytes = Base64UrlUnpadded::decode_vec(private_key)
        .map_err(|e| anyhow!("issue decoding private key: {e}"))?;
    let bytes: [u8; 32] = bytes.try_into().map_err(|_| anyhow!("invalid private key length"))?;
    let public_key =
        Base64UrlUnpadded::encode_string(SigningKey::from_bytes(&bytes).verifying_key().as_bytes());

    if public_key != identity.public_key() {
        return Err(anyhow!("private key does not match identity").into());
    }
    Ok(())
}
