//! Core types and shared functionality for ecowatch.
//!
//! This crate provides:
//! - News article and zone domain types
//! - The static fallback news set
//! - SQLite-backed cache and zone store
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod news;
pub mod store;
pub mod zone;

pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use news::{Article, ArticleSource, CacheEntry, NEWS_CACHE_KEY};
pub use store::{CacheStore, Store, ZoneStore};
pub use zone::ZoneRecord;
