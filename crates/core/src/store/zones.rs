//! Zone record operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_rusqlite::{params, rusqlite};

use super::ZoneStore;
use super::cache::parse_timestamp;
use super::connection::Store;
use crate::Error;
use crate::zone::ZoneRecord;

const ZONE_COLUMNS: &str = "id, name, lat, lng, radius, importance, hazard, impact, species_json,
     impact_analysis, impact_analysis_generated_at";

/// A zone row before its JSON and timestamp columns are decoded.
struct ZoneRow {
    id: String,
    name: String,
    lat: f64,
    lng: f64,
    radius: Option<f64>,
    importance: i64,
    hazard: String,
    impact: String,
    species_json: String,
    impact_analysis: Option<String>,
    impact_analysis_generated_at: Option<String>,
}

impl ZoneRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            lat: row.get(2)?,
            lng: row.get(3)?,
            radius: row.get(4)?,
            importance: row.get(5)?,
            hazard: row.get(6)?,
            impact: row.get(7)?,
            species_json: row.get(8)?,
            impact_analysis: row.get(9)?,
            impact_analysis_generated_at: row.get(10)?,
        })
    }

    fn decode(self) -> Result<ZoneRecord, Error> {
        let importance = u8::try_from(self.importance)
            .map_err(|_| Error::CorruptRecord(format!("zone {}: importance {} out of range", self.id, self.importance)))?;

        Ok(ZoneRecord {
            species: serde_json::from_str(&self.species_json)?,
            impact_analysis_generated_at: self
                .impact_analysis_generated_at
                .as_deref()
                .map(parse_timestamp)
                .transpose()?,
            id: self.id,
            name: self.name,
            lat: self.lat,
            lng: self.lng,
            radius: self.radius,
            importance,
            hazard: self.hazard,
            impact: self.impact,
            impact_analysis: self.impact_analysis,
        })
    }
}

impl Store {
    /// Insert or fully replace a zone, including its enrichment fields.
    pub async fn upsert_zone(&self, zone: &ZoneRecord) -> Result<(), Error> {
        let zone = zone.clone();
        let species_json = serde_json::to_string(&zone.species)?;
        let generated_at = zone.impact_analysis_generated_at.map(|t| t.to_rfc3339());
        let now = Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO zones (
                        id, name, lat, lng, radius, importance, hazard, impact, species_json,
                        impact_analysis, impact_analysis_generated_at, last_updated
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                    ON CONFLICT(id) DO UPDATE SET
                        name = excluded.name,
                        lat = excluded.lat,
                        lng = excluded.lng,
                        radius = excluded.radius,
                        importance = excluded.importance,
                        hazard = excluded.hazard,
                        impact = excluded.impact,
                        species_json = excluded.species_json,
                        impact_analysis = excluded.impact_analysis,
                        impact_analysis_generated_at = excluded.impact_analysis_generated_at,
                        last_updated = excluded.last_updated",
                    params![
                        &zone.id,
                        &zone.name,
                        zone.lat,
                        zone.lng,
                        zone.radius,
                        zone.importance as i64,
                        &zone.hazard,
                        &zone.impact,
                        species_json,
                        &zone.impact_analysis,
                        generated_at,
                        now,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }
}

#[async_trait]
impl ZoneStore for Store {
    async fn list_all(&self) -> Result<Vec<ZoneRecord>, Error> {
        let rows = self
            .conn
            .call(|conn| -> Result<Vec<ZoneRow>, Error> {
                let mut stmt = conn.prepare(&format!("SELECT {ZONE_COLUMNS} FROM zones ORDER BY id ASC"))?;
                let rows = stmt
                    .query_map([], ZoneRow::from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await
            .map_err(Error::from)?;

        rows.into_iter().map(ZoneRow::decode).collect()
    }

    async fn get(&self, id: &str) -> Result<Option<ZoneRecord>, Error> {
        let id = id.to_string();
        let row = self
            .conn
            .call(move |conn| -> Result<Option<ZoneRow>, Error> {
                let mut stmt = conn.prepare(&format!("SELECT {ZONE_COLUMNS} FROM zones WHERE id = ?1"))?;

                match stmt.query_row(params![id], ZoneRow::from_row) {
                    Ok(row) => Ok(Some(row)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)?;

        row.map(ZoneRow::decode).transpose()
    }

    async fn update_enrichment(&self, id: &str, analysis: &str, generated_at: DateTime<Utc>) -> Result<(), Error> {
        let id = id.to_string();
        let analysis = analysis.to_string();
        let generated_at = generated_at.to_rfc3339();
        let now = Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| -> Result<(), Error> {
                let updated = conn.execute(
                    "UPDATE zones SET
                        impact_analysis = ?2,
                        impact_analysis_generated_at = ?3,
                        last_updated = ?4
                    WHERE id = ?1",
                    params![&id, analysis, generated_at, now],
                )?;

                if updated == 0 {
                    return Err(Error::NotFound(format!("zone {id}")));
                }
                Ok(())
            })
            .await
            .map_err(Error::from)
    }
}
