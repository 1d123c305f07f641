//! In-process fakes for the store and upstream traits.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use ecowatch_client::{NewsSource, Pacer, SearchRequest, TextGenerator, UpstreamError};
use ecowatch_core::{Article, ArticleSource, CacheEntry, CacheStore, Error, ZoneRecord, ZoneStore};
use tokio::sync::mpsc;
use tokio::time::Instant;

pub fn article(title: &str) -> Article {
    Article {
        title: title.to_string(),
        description: format!("{title} description"),
        url: format!("https://news.example/{title}"),
        image: "https://news.example/img.jpg".to_string(),
        source: ArticleSource { name: "Example News".to_string(), url: None },
        published_at: "2025-05-01T09:00:00Z".to_string(),
        content: format!("{title} content"),
    }
}

pub fn zone(id: &str) -> ZoneRecord {
    ZoneRecord {
        id: id.to_string(),
        name: format!("Zone {id}"),
        lat: 15.5,
        lng: 73.8,
        radius: Some(40000.0),
        importance: 8,
        hazard: "Deforestation".to_string(),
        impact: "Biodiversity loss".to_string(),
        species: vec!["Tiger".to_string()],
        impact_analysis: None,
        impact_analysis_generated_at: None,
    }
}

pub fn enriched_zone(id: &str) -> ZoneRecord {
    ZoneRecord {
        impact_analysis: Some(format!("<h3>existing analysis for {id}</h3>")),
        impact_analysis_generated_at: Some(Utc::now()),
        ..zone(id)
    }
}

#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryCache {
    pub fn insert(&self, entry: CacheEntry) {
        self.entries.lock().unwrap().insert(entry.key.clone(), entry);
    }

    pub fn entry(&self, key: &str) -> Option<CacheEntry> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn read(&self, key: &str) -> Result<Option<CacheEntry>, Error> {
        Ok(self.entry(key))
    }

    async fn write(
        &self, key: &str, payload: &[Article], ttl: Duration, is_fallback: bool,
    ) -> Result<CacheEntry, Error> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::CorruptRecord("storage unavailable".to_string()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        let entry = CacheEntry::new(key, payload.to_vec(), Utc::now(), ttl, is_fallback)?;
        self.insert(entry.clone());
        Ok(entry)
    }
}

/// News source returning a fixed answer and reporting each call.
pub struct ScriptedNews {
    answer: Result<Vec<Article>, UpstreamError>,
    calls: AtomicUsize,
    notify: Option<mpsc::UnboundedSender<Instant>>,
}

impl ScriptedNews {
    pub fn ok(articles: Vec<Article>) -> Self {
        Self { answer: Ok(articles), calls: AtomicUsize::new(0), notify: None }
    }

    pub fn failing(err: UpstreamError) -> Self {
        Self { answer: Err(err), calls: AtomicUsize::new(0), notify: None }
    }

    pub fn with_notify(mut self, tx: mpsc::UnboundedSender<Instant>) -> Self {
        self.notify = Some(tx);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NewsSource for ScriptedNews {
    async fn search(&self, _req: &SearchRequest) -> Result<Vec<Article>, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(tx) = &self.notify {
            let _ = tx.send(Instant::now());
        }
        self.answer.clone()
    }
}

#[derive(Default)]
pub struct MemoryZones {
    zones: Mutex<Vec<ZoneRecord>>,
    deleted_on_update: Mutex<Vec<String>>,
}

impl MemoryZones {
    pub fn with(zones: Vec<ZoneRecord>) -> Self {
        Self { zones: Mutex::new(zones), ..Default::default() }
    }

    /// Simulate `id` being deleted between listing and enrichment.
    pub fn delete_before_update(&self, id: &str) {
        self.deleted_on_update.lock().unwrap().push(id.to_string());
    }

    pub fn zone(&self, id: &str) -> Option<ZoneRecord> {
        self.zones.lock().unwrap().iter().find(|z| z.id == id).cloned()
    }
}

#[async_trait]
impl ZoneStore for MemoryZones {
    async fn list_all(&self) -> Result<Vec<ZoneRecord>, Error> {
        let mut zones = self.zones.lock().unwrap().clone();
        zones.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(zones)
    }

    async fn get(&self, id: &str) -> Result<Option<ZoneRecord>, Error> {
        Ok(self.zone(id))
    }

    async fn update_enrichment(&self, id: &str, analysis: &str, generated_at: DateTime<Utc>) -> Result<(), Error> {
        if self.deleted_on_update.lock().unwrap().iter().any(|d| d == id) {
            return Err(Error::NotFound(format!("zone {id}")));
        }
        let mut zones = self.zones.lock().unwrap();
        let zone = zones
            .iter_mut()
            .find(|z| z.id == id)
            .ok_or_else(|| Error::NotFound(format!("zone {id}")))?;
        zone.impact_analysis = Some(analysis.to_string());
        zone.impact_analysis_generated_at = Some(generated_at);
        Ok(())
    }
}

/// Generator that fails for prompts mentioning any of `fail_on`,
/// answering everything else with a canned analysis.
#[derive(Default)]
pub struct ScriptedGenerator {
    fail_on: Vec<String>,
    calls: Mutex<Vec<(String, Instant)>>,
    queued: Mutex<VecDeque<Result<String, UpstreamError>>>,
}

impl ScriptedGenerator {
    pub fn failing_on(names: &[&str]) -> Self {
        Self { fail_on: names.iter().map(|n| n.to_string()).collect(), ..Default::default() }
    }

    /// Answer the next calls with these results before falling back to the default behavior.
    pub fn queue(&self, result: Result<String, UpstreamError>) {
        self.queued.lock().unwrap().push_back(result);
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        self.calls.lock().unwrap().push((prompt.to_string(), Instant::now()));

        if let Some(result) = self.queued.lock().unwrap().pop_front() {
            return result;
        }

        if self.fail_on.iter().any(|name| prompt.contains(name.as_str())) {
            return Err(UpstreamError::Provider { status: 429, message: "quota exceeded".to_string() });
        }
        Ok("<h3>Generated analysis</h3>".to_string())
    }
}

/// Pacer that only counts how often it was awaited.
#[derive(Default)]
pub struct CountingPacer {
    pub count: AtomicUsize,
}

impl CountingPacer {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Pacer for CountingPacer {
    async fn pace(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}
