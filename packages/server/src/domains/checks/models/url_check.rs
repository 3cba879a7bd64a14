use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{CheckId, UrlId};
use crate::domains::checks::Metadata;
use crate::domains::urls::Url;

/// UrlCheck - one immutable fetch-and-extract result for a URL
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UrlCheck {
    pub id: CheckId,
    pub url_id: UrlId,
    pub status_code: Option<i16>,
    pub h1: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_at: NaiveDate,
}

/// Values for a new check row
#[derive(Debug, Clone)]
pub struct NewUrlCheck {
    pub url_id: UrlId,
    pub status_code: i16,
    pub metadata: Metadata,
}

impl NewUrlCheck {
    pub fn new(url_id: UrlId, status_code: u16, metadata: Metadata) -> Result<Self> {
        let status_code = i16::try_from(status_code)
            .with_context(|| format!("status code {} does not fit smallint", status_code))?;
        Ok(Self {
            url_id,
            status_code,
            metadata,
        })
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl UrlCheck {
    /// Check history for a URL, newest first
    pub async fn find_by_url(url_id: UrlId, pool: &PgPool) -> Result<Vec<Self>> {
        let checks = sqlx::query_as::<_, UrlCheck>(
            r#"
            SELECT id, url_id, status_code, h1, title, description, created_at
            FROM url_checks
            WHERE url_id = $1
            ORDER BY id DESC
            "#,
        )
        .bind(url_id)
        .fetch_all(pool)
        .await?;
        Ok(checks)
    }

    /// Record a check and refresh the owning URL's summary in one transaction.
    ///
    /// Either both the check row and the summary update commit, or neither does.
    /// Concurrent records for the same URL are serialized on the URL row, so
    /// the summary always follows the newest check.
    pub async fn record(check: NewUrlCheck, pool: &PgPool) -> Result<Self> {
        let mut tx = pool.begin().await?;

        if !Url::lock_in(check.url_id, &mut *tx).await? {
            anyhow::bail!("URL {} not found while recording check", check.url_id);
        }

        let inserted = Self::insert_in(&check, &mut *tx).await?;
        Url::apply_check_in(
            inserted.url_id,
            inserted.created_at,
            inserted.status_code,
            &mut *tx,
        )
        .await?;

        tx.commit().await?;
        Ok(inserted)
    }

    /// Insert the check row on the caller's connection (no summary update).
    pub async fn insert_in(check: &NewUrlCheck, conn: &mut PgConnection) -> Result<Self> {
        let inserted = sqlx::query_as::<_, UrlCheck>(
            r#"
            INSERT INTO url_checks (url_id, status_code, h1, title, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, url_id, status_code, h1, title, description, created_at
            "#,
        )
        .bind(check.url_id)
        .bind(check.status_code)
        .bind(check.metadata.h1.as_deref())
        .bind(check.metadata.title.as_deref())
        .bind(check.metadata.description.as_deref())
        .fetch_one(&mut *conn)
        .await?;
        Ok(inserted)
    }

    /// Number of checks recorded for a URL
    pub async fn count_for_url(url_id: UrlId, pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM url_checks WHERE url_id = $1")
            .bind(url_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
