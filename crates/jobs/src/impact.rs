//! Batch zone enrichment.
//!
//! Walks every zone in id order and generates an impact analysis for those
//! without one. Zones are processed strictly one at a time; a failure on one
//! zone is counted and logged, and the run moves on.

use std::sync::Arc;

use chrono::Utc;
use ecowatch_client::{Pacer, TextGenerator};
use ecowatch_core::{Error, ZoneRecord, ZoneStore};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::prompt;

/// Counters for one enrichment run.
///
/// `generated_count + skipped_count + failed_count == total` once a run completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchRunStats {
    pub total: usize,
    pub generated_count: usize,
    pub skipped_count: usize,
    pub failed_count: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Regenerate zones that already carry an analysis.
    pub force: bool,
}

pub struct ImpactJob {
    zones: Arc<dyn ZoneStore>,
    generator: Arc<dyn TextGenerator>,
    pacer: Arc<dyn Pacer>,
}

impl ImpactJob {
    pub fn new(zones: Arc<dyn ZoneStore>, generator: Arc<dyn TextGenerator>, pacer: Arc<dyn Pacer>) -> Self {
        Self { zones, generator, pacer }
    }

    /// Run once over all zones.
    ///
    /// Only a failure to list zones aborts the run. The pacer is awaited
    /// between consecutive generation calls, never before the first.
    pub async fn run(&self, options: RunOptions) -> Result<BatchRunStats, Error> {
        let zones = self.zones.list_all().await?;
        let mut stats = BatchRunStats { total: zones.len(), ..Default::default() };
        info!(total = stats.total, force = options.force, "starting impact enrichment");

        let mut called_upstream = false;
        for (i, zone) in zones.iter().enumerate() {
            let position = i + 1;

            if zone.has_impact_analysis() && !options.force {
                info!(zone = %zone.id, position, total = stats.total, "impact analysis exists, skipping");
                stats.skipped_count += 1;
                continue;
            }

            if called_upstream {
                self.pacer.pace().await;
            }
            called_upstream = true;

            info!(zone = %zone.id, position, total = stats.total, "generating impact analysis");
            match self.enrich(zone).await {
                Ok(()) => stats.generated_count += 1,
                Err(e) => {
                    error!(zone = %zone.id, error = %e, "impact analysis failed");
                    stats.failed_count += 1;
                }
            }
        }

        info!(
            total = stats.total,
            generated = stats.generated_count,
            skipped = stats.skipped_count,
            failed = stats.failed_count,
            "impact enrichment finished"
        );
        Ok(stats)
    }

    async fn enrich(&self, zone: &ZoneRecord) -> Result<(), Error> {
        let analysis = self.generator.generate(&prompt::impact_prompt(zone)).await?;
        self.zones.update_enrichment(&zone.id, &analysis, Utc::now()).await
    }
}
