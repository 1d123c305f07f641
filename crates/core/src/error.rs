//! Unified error types for ecowatch.
//!
//! Upstream failures keep the three kinds callers need to tell apart
//! (transport, provider-reported, malformed response); storage failures are
//! grouped under the `STORAGE_ERROR` code.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error types for the ecowatch services.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty question).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// A required upstream credential or setting is absent.
    #[error("NOT_CONFIGURED: {0}")]
    NotConfigured(String),

    /// No zone or cache entry exists for the given identifier.
    #[error("NOT_FOUND: {0}")]
    NotFound(String),

    /// Network, DNS or timeout failure talking to an upstream provider.
    #[error("TRANSPORT_ERROR: {0}")]
    Transport(String),

    /// The upstream provider answered with an error payload.
    #[error("PROVIDER_ERROR: {0}")]
    Provider(String),

    /// The upstream provider answered successfully but without the expected structure.
    #[error("MALFORMED_RESPONSE: {0}")]
    MalformedResponse(String),

    /// Database operation failed.
    #[error("STORAGE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("STORAGE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// A stored row could not be decoded.
    #[error("STORAGE_ERROR: corrupt record: {0}")]
    CorruptRecord(String),

    /// Filesystem failure around the database file.
    #[error("STORAGE_ERROR: {0}")]
    StorageIo(String),
}

impl Error {
    /// True for failures of the persistence layer.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Error::Database(_) | Error::MigrationFailed(_) | Error::CorruptRecord(_) | Error::StorageIo(_)
        )
    }

    /// True for any failure reported while talking to an upstream provider.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Provider(_) | Error::MalformedResponse(_))
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::CorruptRecord(err.to_string())
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::NotConfigured(msg) => (-32000, msg.clone()),
            Error::NotFound(msg) => (-32001, msg.clone()),
            Error::Database(e) => (-32002, e.to_string()),
            Error::MigrationFailed(msg) => (-32002, msg.clone()),
            Error::CorruptRecord(msg) => (-32002, msg.clone()),
            Error::StorageIo(msg) => (-32002, msg.clone()),
            Error::Transport(msg) => (-32003, msg.clone()),
            Error::Provider(msg) => (-32004, msg.clone()),
            Error::MalformedResponse(msg) => (-32005, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}
