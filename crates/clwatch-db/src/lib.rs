//! Post log: a write-only sqlite record of listings that triggered a
//! notification run. The dedup path never reads it.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("invalid database URL: {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Open the sqlite pool, creating the database file if it does not exist.
///
/// # Errors
///
/// Returns [`DbError::InvalidUrl`] if the URL cannot be parsed, or
/// [`DbError::Sqlx`] if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| DbError::InvalidUrl(e.to_string()))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Bootstrap the `posts` table if absent.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the DDL fails.
pub async fn init_post_log(pool: &SqlitePool) -> Result<(), DbError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS posts \
         (id INTEGER, \
          notification_status BOOLEAN, \
          url TEXT)",
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Insert one post row with `notification_status = false`.
///
/// Listing ids from the feed are strings; sqlite's INTEGER type affinity
/// stores non-numeric ids as text without complaint.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_post(pool: &SqlitePool, id: &str, url: &str) -> Result<(), DbError> {
    sqlx::query("INSERT INTO posts VALUES (?, ?, ?)")
        .bind(id)
        .bind(false)
        .bind(url)
        .execute(pool)
        .await?;
    tracing::debug!(id, "logged post");
    Ok(())
}
