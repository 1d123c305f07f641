//! TTL cache operations.
//!
//! Each logical key maps to exactly one row, replaced in a single UPSERT so
//! the payload and its freshness metadata always change together.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio_rusqlite::{params, rusqlite};

use super::CacheStore;
use super::connection::Store;
use crate::Error;
use crate::news::{Article, CacheEntry};

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::CorruptRecord(format!("bad timestamp {raw:?}: {e}")))
}

#[async_trait]
impl CacheStore for Store {
    async fn read(&self, key: &str) -> Result<Option<CacheEntry>, Error> {
        let key = key.to_string();
        let row = self
            .conn
            .call(move |conn| -> Result<Option<(String, String, String, String, bool)>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT key, payload_json, generated_at, expires_at, is_fallback
                     FROM cache_entries WHERE key = ?1",
                )?;

                let result = stmt.query_row(params![key], |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get::<_, i32>(4)? == 1))
                });

                match result {
                    Ok(row) => Ok(Some(row)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)?;

        let Some((key, payload_json, generated_at, expires_at, is_fallback)) = row else {
            return Ok(None);
        };

        Ok(Some(CacheEntry {
            key,
            payload: serde_json::from_str(&payload_json)?,
            generated_at: parse_timestamp(&generated_at)?,
            expires_at: parse_timestamp(&expires_at)?,
            is_fallback,
        }))
    }

    async fn write(
        &self, key: &str, payload: &[Article], ttl: Duration, is_fallback: bool,
    ) -> Result<CacheEntry, Error> {
        if ttl <= Duration::zero() {
            return Err(Error::InvalidInput(format!("cache ttl must be positive, got {ttl}")));
        }

        let entry = CacheEntry::new(key, payload.to_vec(), Utc::now(), ttl, is_fallback)?;
        let payload_json = serde_json::to_string(&entry.payload)?;
        let key = entry.key.clone();
        let generated_at = entry.generated_at.to_rfc3339();
        let expires_at = entry.expires_at.to_rfc3339();

        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO cache_entries (key, payload_json, generated_at, expires_at, is_fallback)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    ON CONFLICT(key) DO UPDATE SET
                        payload_json = excluded.payload_json,
                        generated_at = excluded.generated_at,
                        expires_at = excluded.expires_at,
                        is_fallback = excluded.is_fallback",
                    params![key, payload_json, generated_at, expires_at, is_fallback as i32],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)?;

        tracing::debug!(key = %entry.key, articles = entry.payload.len(), is_fallback, "cache entry replaced");
        Ok(entry)
    }
}
