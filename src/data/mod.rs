//! Data-access collaborator.
//!
//! The core never talks to a server. Journal entries, the journal list and
//! photos come from a [`DataAccess`] implementation supplied by the host: a
//! wasm shim issuing HTTP requests in the browser, or [`InMemorySource`] for
//! headless runs and tests.
//!
//! Futures are `!Send` ([`LocalBoxFuture`]) because everything runs on one
//! thread inside a `LocalSet`.
//!
//! # Modules
//!
//! - [`memory`]: Fixture-backed source with delay and failure injection

pub mod memory;

pub use memory::InMemorySource;

use crate::app::{FetchPayload, FetchRequest};
use crate::domain::{JournalEntry, JournalSummary, PhotoRecord, Result};
use futures_util::future::LocalBoxFuture;

/// Asynchronous access to the site's records.
///
/// Every call is a fresh fetch; implementations must not assume the caller
/// caches anything.
pub trait DataAccess {
    /// Fetches one journal entry. `None` asks for the most recent one.
    fn entry<'a>(&'a self, id: Option<&'a str>) -> LocalBoxFuture<'a, Result<JournalEntry>>;

    /// Fetches the journal list used for previous/next navigation.
    fn entry_list(&self) -> LocalBoxFuture<'_, Result<Vec<JournalSummary>>>;

    /// Fetches photos. `None` asks for one cover photo per category;
    /// `Some(category)` for every photo of that category.
    fn photos<'a>(&'a self, category: Option<&'a str>)
        -> LocalBoxFuture<'a, Result<Vec<PhotoRecord>>>;
}

/// Runs a store fetch request against `source`.
pub async fn fetch(source: &dyn DataAccess, request: &FetchRequest) -> Result<FetchPayload> {
    match request {
        FetchRequest::JournalEntry { id } => source
            .entry(id.as_deref())
            .await
            .map(FetchPayload::JournalEntry),
        FetchRequest::JournalNavigation => source
            .entry_list()
            .await
            .map(FetchPayload::JournalNavigation),
        FetchRequest::PhotoCategories => source
            .photos(None)
            .await
            .map(FetchPayload::PhotoCategories),
        FetchRequest::PhotoAlbum { category } => {
            let photos = source.photos(Some(category.as_str())).await?;
            Ok(FetchPayload::PhotoAlbum {
                category: category.clone(),
                photos,
            })
        }
    }
}
