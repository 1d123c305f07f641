//! Opening the SQLite store.
//!
//! Every handle runs with WAL journaling and a busy timeout so the MCP server
//! and a concurrently running CLI can share one database file.

use super::migrations;
use crate::Error;
use std::path::Path;
use tokio_rusqlite::Connection;

const PRAGMAS: &str = "PRAGMA journal_mode=WAL;
     PRAGMA synchronous=NORMAL;
     PRAGMA busy_timeout=5000;
     PRAGMA foreign_keys=ON;";

/// Handle to the ecowatch database.
///
/// Implements both [`super::CacheStore`] and [`super::ZoneStore`]. Clones
/// share the same background connection thread.
#[derive(Clone, Debug)]
pub struct Store {
    pub(crate) conn: Connection,
}

impl Store {
    /// Open (or create) the database file at `path` and bring its schema up to date.
    ///
    /// Missing parent directories are created.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
            && !parent.exists()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::StorageIo(format!("cannot create {}: {e}", parent.display())))?;
        }

        let conn = Connection::open(path).await.map_err(|e| Error::Database(e.into()))?;
        let store = Self::prepare(conn).await?;
        tracing::debug!(path = %path.display(), "store opened");
        Ok(store)
    }

    /// Private in-memory database, used by tests.
    pub async fn open_in_memory() -> Result<Self, Error> {
        let conn = Connection::open_in_memory().await.map_err(|e| Error::Database(e.into()))?;
        Self::prepare(conn).await
    }

    async fn prepare(conn: Connection) -> Result<Self, Error> {
        conn.call(|conn| {
            conn.execute_batch(PRAGMAS)?;
            Ok(())
        })
        .await
        .map_err(Error::Database)?;

        migrations::run(&conn).await?;
        Ok(Self { conn })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CacheStore, ZoneStore};

    #[tokio::test]
    async fn test_open_in_memory_is_empty() {
        let store = Store::open_in_memory().await.unwrap();
        assert!(store.read("news").await.unwrap().is_none());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_file_creates_parent_dirs_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ecowatch.sqlite");

        {
            let store = Store::open(&path).await.unwrap();
            store.write("news", &[], chrono::Duration::minutes(30), true).await.unwrap();
        }

        let reopened = Store::open(&path).await.unwrap();
        let entry = reopened.read("news").await.unwrap().unwrap();
        assert!(entry.is_fallback);
    }

    #[tokio::test]
    async fn test_open_under_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = Store::open(blocker.join("db").join("ecowatch.sqlite")).await.unwrap_err();
        assert!(matches!(err, Error::StorageIo(_)));
        assert!(err.is_storage());
    }
}
