//! Background and on-demand jobs for ecowatch.
//!
//! This crate wires the upstream clients to the store:
//! - [`NewsRefresher`] keeps the cached news feed fresh, degrading to the
//!   bundled fallback set when the provider fails
//! - [`NewsScheduler`] refreshes the feed on a fixed period
//! - [`ImpactJob`] fills in missing zone impact analyses, one paced call at a time
//! - [`Analyst`] answers single-zone analysis and Q&A requests synchronously

pub mod analysis;
pub mod impact;
pub mod news;
pub mod prompt;
pub mod scheduler;
pub mod services;

#[cfg(test)]
mod test_support;

pub use analysis::Analyst;
pub use impact::{BatchRunStats, ImpactJob, RunOptions};
pub use news::{NewsRefresher, NewsSettings, NewsView};
pub use scheduler::{NewsScheduler, SchedulerHandle, TickOutcome};
pub use services::Services;
