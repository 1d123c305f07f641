//! Subcommand implementations.
//!
//! Results are printed to stdout as JSON; progress goes to the log on stderr.

use std::path::Path;

use anyhow::Context;
use ecowatch_core::ZoneRecord;
use ecowatch_jobs::{NewsView, RunOptions, Services};

pub async fn refresh_news(services: &Services) -> anyhow::Result<()> {
    let view: NewsView = services.news().refresh().await?.into();
    if view.is_fallback {
        tracing::warn!("news provider unavailable, cache now holds fallback articles");
    }
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

pub async fn generate_impacts(services: &Services, force: bool) -> anyhow::Result<()> {
    let stats = services.impact_job()?.run(RunOptions { force }).await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

pub async fn seed(services: &Services, file: &Path) -> anyhow::Result<()> {
    let zones = load_zones(file).await?;
    for zone in &zones {
        services.store.upsert_zone(zone).await.with_context(|| format!("failed to store zone {}", zone.id))?;
    }
    tracing::info!(count = zones.len(), file = %file.display(), "seeded zones");
    Ok(())
}

async fn load_zones(file: &Path) -> anyhow::Result<Vec<ZoneRecord>> {
    let raw = tokio::fs::read_to_string(file).await.with_context(|| format!("failed to read {}", file.display()))?;
    parse_zones(&raw).with_context(|| format!("invalid zones file {}", file.display()))
}

fn parse_zones(raw: &str) -> anyhow::Result<Vec<ZoneRecord>> {
    let zones: Vec<ZoneRecord> = serde_json::from_str(raw)?;
    if let Some(zone) = zones.iter().find(|z| z.id.trim().is_empty()) {
        anyhow::bail!("zone {:?} has an empty id", zone.name);
    }
    Ok(zones)
}
