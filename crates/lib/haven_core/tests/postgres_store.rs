//! PostgreSQL document store tests.
//!
//! Run with `DATABASE_URL` set:
//! `cargo test -p haven_core --test postgres_store -- --ignored`

use serde_json::json;

use haven_core::store::{DocumentStore, PgDocumentStore};
use haven_core::uuid::new_document_id;

async fn connect() -> PgDocumentStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    PgDocumentStore::connect(&url, 2)
        .await
        .expect("connect and migrate")
}

/// A collection name no other test run will touch.
fn scratch_collection(prefix: &str) -> String {
    format!("{prefix}-{}", new_document_id())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn created_document_reads_back() {
    let store = connect().await;
    let collection = scratch_collection("inquiries");
    let body = json!({"fullName": "Ana Cruz", "tenantsNo": 2, "tags": ["pets"]});

    let id = store.create_document(&collection, body.clone()).await.unwrap();

    assert_eq!(store.get_document(&collection, &id).await.unwrap(), Some(body));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn created_ids_are_distinct() {
    let store = connect().await;
    let collection = scratch_collection("inquiries");

    let first = store.create_document(&collection, json!({"n": 1})).await.unwrap();
    let second = store.create_document(&collection, json!({"n": 2})).await.unwrap();

    assert_ne!(first, second);
    assert_eq!(
        store.get_document(&collection, &second).await.unwrap(),
        Some(json!({"n": 2}))
    );
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn put_replaces_existing_body() {
    let store = connect().await;
    let collection = scratch_collection("roomAvailability");

    store
        .put_document(&collection, "floors", json!({"3rd Floor": []}))
        .await
        .unwrap();
    store
        .put_document(
            &collection,
            "floors",
            json!({"4th Floor": [{"room": "0404", "available": true}]}),
        )
        .await
        .unwrap();

    assert_eq!(
        store.get_document(&collection, "floors").await.unwrap(),
        Some(json!({"4th Floor": [{"room": "0404", "available": true}]}))
    );
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn missing_key_is_none() {
    let store = connect().await;
    let collection = scratch_collection("roomAvailability");

    assert_eq!(store.get_document(&collection, "floors").await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn collections_do_not_share_keys() {
    let store = connect().await;
    let a = scratch_collection("a");
    let b = scratch_collection("b");

    store.put_document(&a, "k", json!(1)).await.unwrap();

    assert_eq!(store.get_document(&b, "k").await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn migrations_can_run_again() {
    let first = connect().await;
    let collection = scratch_collection("inquiries");
    let id = first.create_document(&collection, json!({"n": 1})).await.unwrap();

    // Second connect re-runs the embedded migrations against the same schema.
    let second = connect().await;

    assert_eq!(
        second.get_document(&collection, &id).await.unwrap(),
        Some(json!({"n": 1}))
    );
}
