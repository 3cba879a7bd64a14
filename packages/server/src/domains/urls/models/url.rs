use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::UrlId;
use crate::domains::urls::CanonicalUrl;

/// Url - a submitted site, identified by its canonical `scheme://host` name
///
/// `last_check` / `last_status_code` cache the most recent check so list pages
/// do not have to join `url_checks`. Both are null until the first check.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Url {
    pub id: UrlId,
    pub name: String,
    pub created_at: NaiveDate,
    pub last_check: Option<NaiveDate>,
    pub last_status_code: Option<i16>,
}

/// Outcome of `Url::find_or_create`
#[derive(Debug, Clone)]
pub enum FindOrCreate {
    Created(Url),
    Existing(Url),
}

impl FindOrCreate {
    pub fn url(&self) -> &Url {
        match self {
            FindOrCreate::Created(url) | FindOrCreate::Existing(url) => url,
        }
    }

    pub fn into_url(self) -> Url {
        match self {
            FindOrCreate::Created(url) | FindOrCreate::Existing(url) => url,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, FindOrCreate::Created(_))
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Url {
    /// Find URL by ID
    pub async fn find_by_id(id: UrlId, pool: &PgPool) -> Result<Option<Self>> {
        let url = sqlx::query_as::<_, Url>(
            "SELECT id, name, created_at, last_check, last_status_code FROM urls WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(url)
    }

    /// Find URL by exact canonical name
    pub async fn find_by_name(name: &CanonicalUrl, pool: &PgPool) -> Result<Option<Self>> {
        let url = sqlx::query_as::<_, Url>(
            "SELECT id, name, created_at, last_check, last_status_code FROM urls WHERE name = $1",
        )
        .bind(name.as_str())
        .fetch_optional(pool)
        .await?;
        Ok(url)
    }

    /// All URLs with their last-check summary, newest first
    pub async fn list_with_last_check(pool: &PgPool) -> Result<Vec<Self>> {
        let urls = sqlx::query_as::<_, Url>(
            "SELECT id, name, created_at, last_check, last_status_code FROM urls ORDER BY id DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(urls)
    }

    /// Find or create a URL by canonical name (handles race conditions)
    ///
    /// The unique constraint on `name` decides concurrent inserts: the loser gets
    /// a unique violation, which is mapped to `Existing` by re-reading the
    /// winning row.
    pub async fn find_or_create(name: &CanonicalUrl, pool: &PgPool) -> Result<FindOrCreate> {
        if let Some(existing) = Self::find_by_name(name, pool).await? {
            return Ok(FindOrCreate::Existing(existing));
        }

        let inserted = sqlx::query_as::<_, Url>(
            r#"
            INSERT INTO urls (name)
            VALUES ($1)
            RETURNING id, name, created_at, last_check, last_status_code
            "#,
        )
        .bind(name.as_str())
        .fetch_one(pool)
        .await;

        match inserted {
            Ok(url) => Ok(FindOrCreate::Created(url)),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tracing::debug!(name = %name, "Lost insert race, re-reading existing URL");
                let existing = Self::find_by_name(name, pool).await?.ok_or_else(|| {
                    anyhow::anyhow!("URL {} vanished after unique violation", name)
                })?;
                Ok(FindOrCreate::Existing(existing))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Take the row lock on a URL for the rest of the caller's transaction.
    ///
    /// Check writers hold it from before the check insert until commit, so
    /// check ids and summary updates land in the same order. Returns false if
    /// the URL does not exist.
    pub async fn lock_in(id: UrlId, conn: &mut PgConnection) -> Result<bool> {
        let locked = sqlx::query_scalar::<_, UrlId>("SELECT id FROM urls WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(locked.is_some())
    }

    /// Point the summary fields at a freshly inserted check.
    ///
    /// Runs on the caller's connection so it can share a transaction with the
    /// check insert. Fails if the URL row no longer exists.
    pub async fn apply_check_in(
        id: UrlId,
        checked_on: NaiveDate,
        status_code: Option<i16>,
        conn: &mut PgConnection,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE urls
            SET last_check = $2, last_status_code = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(checked_on)
        .bind(status_code)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() != 1 {
            anyhow::bail!("URL {} not found while updating check summary", id);
        }
        Ok(())
    }

    /// Delete a URL (its checks go with it)
    pub async fn delete(id: UrlId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM urls WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
