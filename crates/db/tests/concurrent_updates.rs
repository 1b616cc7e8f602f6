//! Concurrent writers against a multi-connection file store.
//!
//! The in-memory store used elsewhere has a single connection and serializes
//! everything; these tests run real parallel transactions.

mod common;

use estimation_core::status::StatusCatalog;
use estimation_db::models::estimation_request::UpdateEstimationRequest;
use estimation_db::repositories::EstimationRequestRepo;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_of_one_row_all_succeed() {
    let (pool, dir) = common::file_pool("same-field", 8).await;
    let catalog = StatusCatalog::default();
    let created = EstimationRequestRepo::create(&pool, &catalog, &common::new_request("Busy"))
        .await
        .unwrap();
    let id = created.id;

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let pool = pool.clone();
            tokio::spawn(async move {
                let patch = UpdateEstimationRequest {
                    estimation: Some(Some(format!("revision {i}"))),
                    ..Default::default()
                };
                EstimationRequestRepo::update(&pool, id, &patch).await
            })
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }
    let failures: Vec<_> = results.iter().filter_map(|r| r.as_ref().err()).collect();
    assert!(failures.is_empty(), "updates failed: {failures:?}");

    // Last write wins: the stored value is the one written by the update that
    // committed with the latest timestamp.
    let stored = EstimationRequestRepo::find_by_id(&pool, created.id)
        .await
        .unwrap();
    let latest = results
        .iter()
        .map(|r| r.as_ref().unwrap())
        .max_by_key(|r| r.updated_at)
        .unwrap();
    assert_eq!(stored.updated_at, latest.updated_at);
    assert!(stored
        .estimation
        .as_deref()
        .is_some_and(|e| e.starts_with("revision ")));

    pool.close().await;
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_to_different_fields_are_both_kept() {
    let (pool, dir) = common::file_pool("disjoint-fields", 8).await;
    let catalog = StatusCatalog::default();
    let created = EstimationRequestRepo::create(&pool, &catalog, &common::new_request("Shared"))
        .await
        .unwrap();
    let id = created.id;

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let pool = pool.clone();
            tokio::spawn(async move {
                let patch = if i % 2 == 0 {
                    UpdateEstimationRequest {
                        remarks: Some(Some(format!("note {i}"))),
                        ..Default::default()
                    }
                } else {
                    UpdateEstimationRequest {
                        sales_person: Some(Some(format!("seller {i}"))),
                        ..Default::default()
                    }
                };
                EstimationRequestRepo::update(&pool, id, &patch).await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // Neither writer may overwrite the other's field with a stale copy.
    let stored = EstimationRequestRepo::find_by_id(&pool, created.id)
        .await
        .unwrap();
    assert!(stored.remarks.as_deref().is_some_and(|r| r.starts_with("note ")));
    assert!(stored
        .sales_person
        .as_deref()
        .is_some_and(|s| s.starts_with("seller ")));
    assert_eq!(stored.project_name, "Shared");
    assert!(stored.created_at <= stored.updated_at);

    pool.close().await;
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_and_updates_on_file_store_succeed() {
    let (pool, dir) = common::file_pool("mixed", 8).await;
    let catalog = StatusCatalog::default();
    let seed = EstimationRequestRepo::create(&pool, &catalog, &common::new_request("Seed"))
        .await
        .unwrap();
    let seed_id = seed.id;

    let handles: Vec<_> = (0..12)
        .map(|i| {
            let pool = pool.clone();
            tokio::spawn(async move {
                let catalog = StatusCatalog::default();
                if i % 2 == 0 {
                    EstimationRequestRepo::create(
                        &pool,
                        &catalog,
                        &common::new_request(&format!("New {i}")),
                    )
                    .await
                    .map(|_| ())
                } else {
                    let patch = UpdateEstimationRequest {
                        others: Some(Some(format!("touch {i}"))),
                        ..Default::default()
                    };
                    EstimationRequestRepo::update(&pool, seed_id, &patch)
                        .await
                        .map(|_| ())
                }
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(common::stored_count(&pool).await, 7);

    pool.close().await;
    let _ = std::fs::remove_dir_all(&dir);
}
