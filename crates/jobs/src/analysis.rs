//! On-demand analysis and Q&A.
//!
//! Unlike the batch job nothing here is persisted, and every failure is
//! returned to the caller.

use std::sync::Arc;

use ecowatch_client::TextGenerator;
use ecowatch_core::{Error, ZoneStore};

use crate::prompt;

/// Longest question accepted by [`Analyst::ask`], in characters.
pub const MAX_QUESTION_CHARS: usize = 2000;

#[derive(Clone)]
pub struct Analyst {
    zones: Arc<dyn ZoneStore>,
    generator: Arc<dyn TextGenerator>,
}

impl Analyst {
    pub fn new(zones: Arc<dyn ZoneStore>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { zones, generator }
    }

    /// Short HTML analysis of a stored zone.
    pub async fn analyze_zone(&self, zone_id: &str) -> Result<String, Error> {
        let zone_id = zone_id.trim();
        if zone_id.is_empty() {
            return Err(Error::InvalidInput("zone id is required".to_string()));
        }

        let zone = self
            .zones
            .get(zone_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("zone {zone_id}")))?;

        tracing::debug!(zone = %zone.id, "analyzing zone on demand");
        Ok(self.generator.generate(&prompt::analysis_prompt(&zone)).await?)
    }

    /// Answer a free-form environmental question in a few sentences.
    pub async fn ask(&self, question: &str) -> Result<String, Error> {
        let question = question.trim();
        if question.is_empty() {
            return Err(Error::InvalidInput("question is required".to_string()));
        }
        if question.chars().count() > MAX_QUESTION_CHARS {
            return Err(Error::InvalidInput(format!("question exceeds {MAX_QUESTION_CHARS} characters")));
        }

        Ok(self.generator.generate(&prompt::question_prompt(question)).await?)
    }
}
