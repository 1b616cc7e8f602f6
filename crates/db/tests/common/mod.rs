#![allow(dead_code)]

use std::path::PathBuf;

use chrono::NaiveDate;
use estimation_db::models::estimation_request::CreateEstimationRequest;
use estimation_db::repositories::EstimationRequestRepo;
use estimation_db::{create_pool, initialize_schema, DatabaseConfig, DbPool};

/// Fresh in-memory SQLite store with the schema applied.
pub async fn test_pool() -> DbPool {
    let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
    initialize_schema(&pool).await.unwrap();
    pool
}

/// A SQLite file store that hands out several connections, like the default
/// local deployment. Returns the directory to remove once the test is done.
pub async fn file_pool(name: &str, max_connections: u32) -> (DbPool, PathBuf) {
    let dir = std::env::temp_dir().join(format!(
        "estimation-db-{name}-{}-{}",
        std::process::id(),
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    std::fs::create_dir_all(&dir).unwrap();

    let config = DatabaseConfig {
        url: format!("sqlite://{}", dir.join("store.db").display()),
        max_connections,
        acquire_timeout_secs: 30,
    };
    let pool = create_pool(&config).await.unwrap();
    initialize_schema(&pool).await.unwrap();
    (pool, dir)
}

/// Number of rows currently stored.
pub async fn stored_count(pool: &DbPool) -> usize {
    EstimationRequestRepo::list(pool, 0, 1000).await.unwrap().len()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Minimal valid create payload: only the required fields.
pub fn new_request(project_name: &str) -> CreateEstimationRequest {
    CreateEstimationRequest {
        request_date: date(2024, 1, 1),
        desired_estimation_date: None,
        project_name: project_name.to_string(),
        zac_project_number: None,
        sales_person: None,
        estimation_person: None,
        status: None,
        estimation: None,
        completion_date: None,
        remarks: None,
        estimation_materials: None,
        box_url: None,
        others: None,
    }
}
