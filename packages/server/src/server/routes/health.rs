use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;
use sqlx::PgPool;
use std::time::{Duration, Instant};

use crate::server::app::AppState;

/// Bound on the database round-trip
const PING_TIMEOUT: Duration = Duration::from_secs(5);

/// Result of one `SELECT 1` against the pool
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DatabasePing {
    Ok { latency_ms: u64 },
    Error { error: String },
    Timeout { timeout_ms: u64 },
}

impl DatabasePing {
    async fn run(pool: &PgPool) -> Self {
        let started = Instant::now();
        match tokio::time::timeout(PING_TIMEOUT, sqlx::query("SELECT 1").execute(pool)).await {
            Ok(Ok(_)) => DatabasePing::Ok {
                latency_ms: started.elapsed().as_millis() as u64,
            },
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Health check query failed");
                DatabasePing::Error {
                    error: e.to_string(),
                }
            }
            Err(_) => {
                tracing::warn!("Health check query timed out");
                DatabasePing::Timeout {
                    timeout_ms: PING_TIMEOUT.as_millis() as u64,
                }
            }
        }
    }

    fn is_ok(&self) -> bool {
        matches!(self, DatabasePing::Ok { .. })
    }
}

#[derive(Debug, Serialize)]
pub struct PoolStats {
    size: u32,
    idle: usize,
    max: u32,
}

impl PoolStats {
    fn of(pool: &PgPool) -> Self {
        Self {
            size: pool.size(),
            idle: pool.num_idle(),
            max: pool.options().get_max_connections(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    healthy: bool,
    database: DatabasePing,
    pool: PoolStats,
}

/// GET /health - 200 when the database answers within the bound, 503 otherwise
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthReport>) {
    let pool = &state.server_deps.db_pool;
    let database = DatabasePing::run(pool).await;
    let healthy = database.is_ok();

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthReport {
            healthy,
            database,
            pool: PoolStats::of(pool),
        }),
    )
}
