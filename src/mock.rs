//! Scripted connector for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::connector::{ClaimRecord, Connector, Identity};
use crate::error::Result;

/// Returns canned claims and records every `get` call.
#[derive(Default)]
pub struct MockConnector {
    latest: Option<String>,
    records: HashMap<String, ClaimRecord<String>>,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl MockConnector {
    pub fn latest(mut self, reference: &str) -> Self {
        self.latest = Some(reference.to_string());
        self
    }

    pub fn record(mut self, reference: &str, data: Value, previous: Option<&str>) -> Self {
        let mut record = ClaimRecord::new(data);
        record.previous = previous.map(ToString::to_string);
        self.records.insert(reference.to_string(), record);
        self
    }

    // (reference, requesting public key) for each `get`, in call order
    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().expect("lock").clone()
    }
}

impl Connector for MockConnector {
    type Reference = String;
    type Subscription = ();

    fn name(&self) -> &str {
        "base"
    }

    fn get_did_of_claim(&self, _reference: &String) -> Option<String> {
        None
    }

    async fn get_latest_claim(&self, _identity: &Identity) -> Result<Option<String>> {
        Ok(self.latest.clone())
    }

    async fn new_identity(&self) -> Result<Identity> {
        Ok(Identity::default())
    }

    async fn claim(&self, _identity: &Identity, _data: Value) -> Result<String> {
        Ok(String::new())
    }

    async fn get(
        &self, reference: &String, identity: Option<&Identity>,
    ) -> Result<Option<ClaimRecord<String>>> {
        let caller = identity.map(|i| i.public_key().to_string());
        self.calls.lock().expect("lock").push((reference.clone(), caller));
        Ok(self.records.get(reference).cloned())
    }

    async fn observe(&self, _identity: Option<&Identity>) -> Result<()> {
        Ok(())
    }
}
