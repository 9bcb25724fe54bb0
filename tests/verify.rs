//! Verification against a real (in-memory) connector.

use std::sync::Arc;

use discipl_core::{Connector, Identity, VerifyOptions, did, verify, verify_with};
use serde_json::json;
use test_utils::MemoryConnector;

#[tokio::test]
async fn verify_claims() {
    test_utils::init_tracing();

    let connector = MemoryConnector::default();
    let identity = connector.new_identity().await.expect("should create identity");

    let beer = connector.claim(&identity, json!({"need": "beer"})).await.expect("should claim");
    let wine = connector.claim(&identity, json!({"need": "wine"})).await.expect("should claim");

    let found = connector.verify(&identity, &json!({"need": "wine"})).await.expect("should verify");
    assert_eq!(found.as_ref(), Some(&wine));

    // an earlier claim is still verifiable
    let found =
        verify(&connector, &identity, &json!({"need": "beer"})).await.expect("should verify");
    assert_eq!(found.as_ref(), Some(&beer));

    let found = verify(&connector, &identity, &json!({"need": "a hole in the head"}))
        .await
        .expect("should verify");
    assert_eq!(found, None);
}

#[tokio::test]
async fn verify_read_only() {
    let connector = MemoryConnector::default();
    let identity = connector.new_identity().await.expect("should create identity");
    let reference = connector
        .claim(&identity, json!({"name": "fred", "age": 42}))
        .await
        .expect("should claim");

    // verifiers only hold the identity's did
    let did = identity.did(connector.name()).expect("should have did");
    let public_key = did::reference_from_did(&did).expect("should have reference");
    let subject = Identity::from_public_key(public_key);

    let found = verify(&connector, &subject, &json!({"age": 42, "name": "fred"}))
        .await
        .expect("should verify");
    assert_eq!(found.as_ref(), Some(&reference));

    let link = connector.link_from_reference(&reference).expect("should have link");
    assert_eq!(did::connector_name(&link), Some("memory"));
    assert_eq!(did::reference_from_link(&link), Some(reference.as_str()));
    assert_eq!(connector.get_did_of_claim(&reference), Some(did));
}

#[tokio::test]
async fn verify_other_identity() {
    let connector = MemoryConnector::default();
    let alice = connector.new_identity().await.expect("should create identity");
    let bob = connector.new_identity().await.expect("should create identity");

    connector.claim(&alice, json!({"need": "beer"})).await.expect("should claim");

    let found = verify(&connector, &bob, &json!({"need": "beer"})).await.expect("should verify");
    assert_eq!(found, None);
}

#[tokio::test]
async fn verify_depth() {
    let connector = MemoryConnector::default();
    let identity = connector.new_identity().await.expect("should create identity");

    connector.claim(&identity, json!(1)).await.expect("should claim");
    for n in 2..=5 {
        connector.claim(&identity, json!(n)).await.expect("should claim");
    }

    let options = VerifyOptions { max_depth: Some(4) };
    let found =
        verify_with(&connector, &identity, &json!(2), &options).await.expect("should verify");
    assert!(found.is_some());
    let found =
        verify_with(&connector, &identity, &json!(1), &options).await.expect("should verify");
    assert_eq!(found, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_verify() {
    let connector = Arc::new(MemoryConnector::default());
    let identity = connector.new_identity().await.expect("should create identity");
    for n in 0..10 {
        connector.claim(&identity, json!({"n": n})).await.expect("should claim");
    }

    let mut handles = Vec::new();
    for n in 0..10 {
        let connector = Arc::clone(&connector);
        let identity = identity.clone();
        handles.push(tokio::spawn(async move {
            verify(connector.as_ref(), &identity, &json!({"n": n})).await
        }));
    }
    for handle in handles {
        let found = handle.await.expect("should join").expect("should verify");
        assert!(found.is_some());
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_claims() {
    let connector = Arc::new(MemoryConnector::default());
    let identity = connector.new_identity().await.expect("should create identity");

    let mut handles = Vec::new();
    for n in 0..20 {
        let connector = Arc::clone(&connector);
        let identity = identity.clone();
        handles.push(tokio::spawn(async move { connector.claim(&identity, json!(n)).await }));
    }
    for handle in handles {
        handle.await.expect("should join").expect("should claim");
    }

    // every claim is reachable from the latest
    let mut length = 0;
    let mut current = connector.get_latest_claim(&identity).await.expect("should get latest");
    while let Some(reference) = current {
        let record =
            connector.get(&reference, None).await.expect("should get").expect("should exist");
        length += 1;
        current = record.previous;
    }
    assert_eq!(length, 20);
}
