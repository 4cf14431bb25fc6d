//! Fixture-backed data source.
//!
//! # Fixture Format
//!
//! ```json
//! {
//!   "journals": [{ "id": "42", "date": "1615750200000", "title": "...", "picUrl": "..." }],
//!   "photos":   [{ "id": "7", "category": "Beach", "title": "..." }]
//! }
//! ```
//!
//! Records use the same camelCase fields as the site's servers. Missing
//! fields fall back to their defaults.
//!
//! # Delays
//!
//! Each call can be slowed down with [`InMemorySource::with_delay`], keyed by
//! a resource label:
//!
//! | Call                   | Label            |
//! |------------------------|------------------|
//! | `entry(Some(id))`      | `entry:<id>`     |
//! | `entry(None)`          | `entry`          |
//! | `entry_list()`         | `entries`        |
//! | `photos(None)`         | `photos`         |
//! | `photos(Some(c))`      | `photos:<c>`     |
//!
//! Delays use tokio's clock, so paused-time tests control them exactly.

use super::DataAccess;
use crate::domain::{JournalEntry, JournalSummary, PhotoRecord, Result, SiteError};
use futures_util::future::LocalBoxFuture;
use serde::Deserialize;
use std::cell::Cell;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Fixtures {
    journals: Vec<JournalEntry>,
    photos: Vec<PhotoRecord>,
}

/// In-memory [`DataAccess`] implementation.
#[derive(Debug, Default)]
pub struct InMemorySource {
    journals: Vec<JournalEntry>,
    photos: Vec<PhotoRecord>,
    delays: HashMap<String, Duration>,
    offline: Cell<bool>,
}

impl InMemorySource {
    #[must_use]
    pub fn new(journals: Vec<JournalEntry>, photos: Vec<PhotoRecord>) -> Self {
        Self {
            journals,
            photos,
            ..Self::default()
        }
    }

    /// Parses a fixtures document.
    ///
    /// # Example
    ///
    /// ```
    /// use vanillabeach::data::InMemorySource;
    ///
    /// let source = InMemorySource::from_json(r#"{ "journals": [{ "id": "1" }] }"#)?;
    /// assert_eq!(source.journal_count(), 1);
    /// # Ok::<(), vanillabeach::SiteError>(())
    /// ```
    pub fn from_json(contents: &str) -> Result<Self> {
        let fixtures: Fixtures = serde_json::from_str(contents)?;
        Ok(Self::new(fixtures.journals, fixtures.photos))
    }

    /// Reads a fixtures file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let source = Self::from_json(&contents)?;
        tracing::debug!(
            path = %path.display(),
            journals = source.journals.len(),
            photos = source.photos.len(),
            "loaded fixtures"
        );
        Ok(source)
    }

    /// Delays every call answering `label` by `delay`.
    #[must_use]
    pub fn with_delay(mut self, label: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(label.into(), delay);
        self
    }

    /// While offline, every call fails with [`SiteError::Fetch`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    #[must_use]
    pub fn journal_count(&self) -> usize {
        self.journals.len()
    }

    fn delay_for(&self, label: &str) -> Option<Duration> {
        self.delays.get(label).copied()
    }

    fn latest_entry(&self) -> Option<&JournalEntry> {
        self.journals
            .iter()
            .max_by_key(|entry| entry.timestamp_millis().unwrap_or(i64::MIN))
    }

    fn lookup_entry(&self, id: Option<&str>) -> Result<JournalEntry> {
        let found = match id {
            Some(id) => self.journals.iter().find(|entry| entry.id == id),
            None => self.latest_entry(),
        };
        found.cloned().ok_or_else(|| {
            SiteError::NotFound(format!("journal entry {}", id.unwrap_or("(latest)")))
        })
    }

    /// One cover per category, in order of first appearance.
    fn covers(&self) -> Vec<PhotoRecord> {
        let mut covers: Vec<PhotoRecord> = Vec::new();
        for photo in &self.photos {
            if !covers
                .iter()
                .any(|cover| cover.category.eq_ignore_ascii_case(&photo.category))
            {
                covers.push(photo.clone());
            }
        }
        covers
    }

    fn album(&self, category: &str) -> Vec<PhotoRecord> {
        self.photos
            .iter()
            .filter(|photo| photo.category.eq_ignore_ascii_case(category))
            .cloned()
            .collect()
    }

    /// Shared wrapper: offline check, then delay, then the lookup.
    fn respond<'a, T: 'a>(
        &'a self,
        label: String,
        lookup: impl FnOnce(&'a Self) -> Result<T> + 'a,
    ) -> LocalBoxFuture<'a, Result<T>> {
        let offline = self.offline.get();
        let delay = self.delay_for(&label);

        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if offline {
                tracing::debug!(resource = %label, "fixture source offline");
                return Err(SiteError::Fetch(format!("{label}: source offline")));
            }
            tracing::trace!(resource = %label, "serving fixture");
            lookup(self)
        })
    }
}

impl DataAccess for InMemorySource {
    fn entry<'a>(&'a self, id: Option<&'a str>) -> LocalBoxFuture<'a, Result<JournalEntry>> {
        let label = id.map_or_else(|| "entry".to_string(), |id| format!("entry:{id}"));
        self.respond(label, move |source| source.lookup_entry(id))
    }

    fn entry_list(&self) -> LocalBoxFuture<'_, Result<Vec<JournalSummary>>> {
        self.respond("entries".to_string(), |source| {
            Ok(source.journals.iter().map(JournalEntry::summary).collect())
        })
    }

    fn photos<'a>(
        &'a self,
        category: Option<&'a str>,
    ) -> LocalBoxFuture<'a, Result<Vec<PhotoRecord>>> {
        match category {
            Some(category) => self.respond(format!("photos:{category}"), move |source| {
                Ok(source.album(category))
            }),
            None => self.respond("photos".to_string(), |source| Ok(source.covers())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURES: &str = r#"{
        "journals": [
            { "id": "1", "date": "1600000000000", "title": "First" },
            { "id": "42", "date": "1615750200000", "title": "Latest" },
            { "id": "7", "date": "1610000000000", "title": "Middle" }
        ],
        "photos": [
            { "id": "a1", "category": "Beach" },
            { "id": "b1", "category": "Mountains" },
            { "id": "a2", "category": "beach" }
        ]
    }"#;

    fn source() -> InMemorySource {
        InMemorySource::from_json(FIXTURES).unwrap()
    }

    #[tokio::test]
    async fn absent_id_returns_most_recent_entry() {
        let source = source();
        let entry = source.entry(None).await.unwrap();
        assert_eq!(entry.id, "42");

        let entry = source.entry(Some("7")).await.unwrap();
        assert_eq!(entry.title, "Middle");
    }

    #[tokio::test]
    async fn unknown_entry_is_not_found() {
        let error = source().entry(Some("missing")).await.unwrap_err();
        assert!(matches!(error, SiteError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_keeps_fixture_order() {
        let list = source().entry_list().await.unwrap();
        let ids: Vec<_> = list.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["1", "42", "7"]);
    }

    #[tokio::test]
    async fn covers_and_albums_ignore_case() {
        let source = source();

        let covers = source.photos(None).await.unwrap();
        let ids: Vec<_> = covers.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a1", "b1"]);

        let album = source.photos(Some("BEACH")).await.unwrap();
        assert_eq!(album.len(), 2);

        assert!(source.photos(Some("Desert")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn offline_source_fails_every_call() {
        let source = source();
        source.set_offline(true);
        assert!(matches!(source.entry_list().await, Err(SiteError::Fetch(_))));
        source.set_offline(false);
        assert!(source.entry_list().await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn delays_are_per_resource() {
        let source = source().with_delay("photos:b", Duration::from_millis(300));
        let start = tokio::time::Instant::now();

        source.photos(Some("a")).await.unwrap();
        assert!(start.elapsed() < Duration::from_millis(300));

        source.photos(Some("b")).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[test]
    fn malformed_fixtures_are_json_errors() {
        assert!(matches!(
            InMemorySource::from_json("{ not json"),
            Err(SiteError::Json(_))
        ));
    }
}
