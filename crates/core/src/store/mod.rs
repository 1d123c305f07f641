//! SQLite-backed store for the news cache and monitored zones.
//!
//! This module provides persistent storage using SQLite with async access
//! via tokio-rusqlite. It supports:
//!
//! - A TTL cache holding one wholesale-replaced entry per logical key
//! - The zone records read and enriched by the impact job
//! - Automatic schema migrations
//! - WAL mode for concurrent access
//!
//! Callers depend on the [`CacheStore`] and [`ZoneStore`] traits so other
//! backends (or test fakes) can stand in for [`Store`].

pub mod cache;
pub mod connection;
pub mod migrations;
pub mod zones;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

pub use crate::Error;
use crate::news::{Article, CacheEntry};
use crate::zone::ZoneRecord;

pub use connection::Store;

/// Persistence for named TTL cache entries.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read the entry for `key`, fresh or not.
    ///
    /// Returns None if nothing was ever written under `key`.
    async fn read(&self, key: &str) -> Result<Option<CacheEntry>, Error>;

    /// Replace the entry for `key` with `payload`, stamped now and expiring after `ttl`.
    ///
    /// Readers observe either the previous entry or the new one, never a mix.
    async fn write(&self, key: &str, payload: &[Article], ttl: Duration, is_fallback: bool)
    -> Result<CacheEntry, Error>;
}

/// Access to the monitored zones.
#[async_trait]
pub trait ZoneStore: Send + Sync {
    /// All zones in their natural listing order (ascending id).
    async fn list_all(&self) -> Result<Vec<ZoneRecord>, Error>;

    /// A single zone by id, or None if it does not exist.
    async fn get(&self, id: &str) -> Result<Option<ZoneRecord>, Error>;

    /// Store a generated impact analysis on zone `id`.
    ///
    /// Returns `Error::NotFound` if the zone no longer exists.
    async fn update_enrichment(&self, id: &str, analysis: &str, generated_at: DateTime<Utc>) -> Result<(), Error>;
}
