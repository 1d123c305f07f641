//! Monitored environmental zones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One monitored environmental zone.
///
/// The profile fields are fixed once seeded; only the impact analysis pair
/// is written afterwards, by the enrichment job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRecord {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Severity index on a 1-10 scale.
    pub importance: u8,
    pub hazard: String,
    pub impact: String,
    #[serde(default)]
    pub species: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_analysis_generated_at: Option<DateTime<Utc>>,
}

impl ZoneRecord {
    /// Whether a non-empty impact analysis is already stored.
    pub fn has_impact_analysis(&self) -> bool {
        self.impact_analysis.as_deref().is_some_and(|a| !a.is_empty())
    }

    /// Species list for prompts, or `default` when none are recorded.
    pub fn species_or(&self, default: &str) -> String {
        if self.species.is_empty() { default.to_string() } else { self.species.join(", ") }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED_JSON: &str = r#"{
        "id": "sundarbans",
        "name": "Sundarbans Mangroves",
        "lat": 21.95,
        "lng": 88.75,
        "radius": 35000,
        "importance": 9,
        "hazard": "Climate Change & Deforestation",
        "impact": "Flooding, livelihood loss",
        "species": ["Royal Bengal Tiger", "Mangrove Fish"]
    }"#;

    #[test]
    fn test_deserialize_seed_zone() {
        let zone: ZoneRecord = serde_json::from_str(SEED_JSON).unwrap();
        assert_eq!(zone.id, "sundarbans");
        assert_eq!(zone.importance, 9);
        assert!(!zone.has_impact_analysis());
        assert_eq!(zone.species_or("Various"), "Royal Bengal Tiger, Mangrove Fish");
    }

    #[test]
    fn test_only_empty_analysis_counts_as_missing() {
        let mut zone: ZoneRecord = serde_json::from_str(SEED_JSON).unwrap();
        zone.impact_analysis = Some(String::new());
        assert!(!zone.has_impact_analysis());

        zone.impact_analysis = Some("  ".to_string());
        assert!(zone.has_impact_analysis());

        zone.impact_analysis = Some("<h3>Impact</h3>".to_string());
        assert!(zone.has_impact_analysis());
    }

    #[test]
    fn test_species_default() {
        let mut zone: ZoneRecord = serde_json::from_str(SEED_JSON).unwrap();
        zone.species.clear();
        assert_eq!(zone.species_or("Various"), "Various");
    }
}
