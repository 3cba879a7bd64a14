//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use analyzer_core::domains::urls::{validate_and_normalize, Url};
use anyhow::Result;
use sqlx::PgPool;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// A `https://` URL whose host is unique within this test run
pub fn unique_url(label: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("https://{}-{}-{}.example.test", label, nanos, n)
}

/// Create a stored URL from a raw submission
pub async fn create_test_url(pool: &PgPool, raw: &str) -> Result<Url> {
    let name = validate_and_normalize(raw)?;
    Ok(Url::find_or_create(&name, pool).await?.into_url())
}

/// Number of rows in `urls` with this exact name
pub async fn count_urls_named(pool: &PgPool, name: &str) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
