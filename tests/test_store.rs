//! Integration tests for the document store.
//!
//! Tests cover:
//! - Adding and streaming documents in insertion order
//! - Collection isolation
//! - Persistence across close and reconnect
//! - Client lifecycle

mod common;

use common::*;
use serde_json::json;

#[tokio::test]
async fn test_add_and_stream_in_insertion_order() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;

    let first = store.add_detection(&make_test_record("a.jpg", "1,2", &["car"])).await?;
    let second = store.add_detection(&make_test_record("b.jpg", "3,4", &[])).await?;
    let third = store.add_detection(&make_test_record("c.jpg", "5,6", &["person", "person"])).await?;
    assert_eq!(first.collection, "detections");
    assert_ne!(first.id, second.id);

    let docs: Vec<Document> = store.stream_detections().await?;
    let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec![first.id.as_str(), second.id.as_str(), third.id.as_str()]);

    assert_eq!(docs[0].get_str("filename"), Some("a.jpg"));
    assert_eq!(docs[1].get("detected_obstacles"), Some(&json!([])));
    assert_eq!(docs[2].get("detected_obstacles"), Some(&json!(["person", "person"])));

    Ok(())
}

#[tokio::test]
async fn test_collections_are_isolated() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;

    store.add("other", &json!({"anything": true})).await?;
    store.add_detection(&make_test_record("a.jpg", "1,2", &[])).await?;

    assert_eq!(store.stream("other").await?.len(), 1);
    assert_eq!(store.stream_detections().await?.len(), 1);
    assert!(store.stream("missing").await?.is_empty());

    let trial = store.clone().with_collection("trial");
    assert_eq!(trial.collection(), "trial");
    assert!(trial.stream_detections().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_documents_are_schemaless() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;

    store
        .add("detections", &json!({"filename": 7, "extra": {"nested": [1, 2]}}))
        .await?;
    let docs = store.stream_detections().await?;
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].get("filename"), Some(&json!(7)));
    assert!(docs[0].get("location").is_none());

    Ok(())
}

#[tokio::test]
async fn test_records_survive_reconnect() -> anyhow::Result<()> {
    let (store, temp_dir) = create_test_store().await;
    let record = make_test_record("street.png", "12.9716,77.5946", &["bench", "car"]);
    store.add_detection(&record).await?;
    store.close().await?;

    let reopened = StoreClient::connect(temp_dir.path().join("test.db")).await?;
    let docs = reopened.stream_detections().await?;
    assert_eq!(docs.len(), 1);
    let stored: DetectionRecord = serde_json::from_value(serde_json::Value::Object(docs[0].data.clone()))?;
    assert_eq!(stored, record);

    reopened.close().await?;
    Ok(())
}

#[tokio::test]
async fn test_closed_client_rejects_use() -> anyhow::Result<()> {
    let (store, _temp_dir) = create_test_store().await;
    let handle = store.clone();
    store.close().await?;

    assert!(handle.is_closed());
    assert!(handle.stream_detections().await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_connect_fails_for_missing_directory() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let path = dir.path().join("no-such-dir").join("store.db");
    assert!(StoreClient::connect(&path).await.is_err());
}
