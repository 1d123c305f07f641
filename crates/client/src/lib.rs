//! Upstream provider clients for ecowatch.
//!
//! This crate provides the GNews news-search client, the Gemini
//! text-generation client, their shared error type, and the pacing
//! primitives used to stay within provider quotas.

pub mod error;
pub mod gemini;
pub mod gnews;
pub mod pacing;

pub use error::UpstreamError;
pub use gemini::{GeminiClient, GeminiConfig, TextGenerator};
pub use gnews::{GNewsClient, GNewsConfig, NewsSource, SearchRequest};
pub use pacing::{FixedDelay, MinInterval, Pacer};
