//! Application state tree.
//!
//! [`ApplicationState`] is the single source of truth shared by every
//! display component. It is never mutated in place once published: the store
//! builds a new tree for every change and hands out `Arc<ApplicationState>`
//! snapshots.
//!
//! # Shape
//!
//! ```text
//! ApplicationState
//! ├── pages
//! │   ├── journal: Arc<JournalPage>   { entry, navigation }
//! │   └── photos:  Arc<PhotosPage>    { categories, album }
//! ├── user                            { selectedPage, route }
//! └── intervalIds                     { navigation }
//! ```
//!
//! Page branches sit behind their own `Arc`. An update clones the top level
//! and replaces only the branch it touched, so a subscriber can compare
//! branches with [`Arc::ptr_eq`] to find out whether its part moved.
//!
//! # Slices
//!
//! Every domain payload lives in a [`Slice`], which records where its fetch
//! stands next to the last value it produced:
//!
//! ```text
//! Empty ──request──> Loading ──ok──> Populated
//!                       │  ^             │
//!                       │  └──request────┤
//!                       └──err──> Failed ┘
//! ```

use crate::domain::{JournalEntry, JournalSummary, PhotoAlbum, PhotoRecord};
use crate::router::{IntervalId, PageRoute};
use serde::Serialize;
use std::sync::Arc;

/// Fetch status of one slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SliceStatus {
    /// Never requested.
    #[default]
    Empty,
    /// A request is in flight.
    Loading,
    /// The last applied fetch succeeded.
    Populated,
    /// The last applied fetch failed. The previous value, if any, is kept.
    Failed,
}

/// A piece of fetched state together with its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slice<T> {
    pub status: SliceStatus,
    pub value: Option<T>,
    /// Message of the last failure, cleared on success.
    pub error: Option<String>,
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self {
            status: SliceStatus::Empty,
            value: None,
            error: None,
        }
    }
}

impl<T> Slice<T> {
    /// The slice with a request in flight, keeping the current value.
    #[must_use]
    pub fn loading(&self) -> Self
    where
        T: Clone,
    {
        Self {
            status: SliceStatus::Loading,
            value: self.value.clone(),
            error: None,
        }
    }

    #[must_use]
    pub const fn populated(value: T) -> Self {
        Self {
            status: SliceStatus::Populated,
            value: Some(value),
            error: None,
        }
    }

    /// The slice after a failed fetch, keeping the current value.
    #[must_use]
    pub fn failed(&self, error: impl Into<String>) -> Self
    where
        T: Clone,
    {
        Self {
            status: SliceStatus::Failed,
            value: self.value.clone(),
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == SliceStatus::Loading
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status == SliceStatus::Failed
    }
}

/// Journal page branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JournalPage {
    /// The entry currently shown.
    pub entry: Slice<JournalEntry>,
    /// The entry list used for previous/next links, oldest first as served.
    pub navigation: Slice<Vec<JournalSummary>>,
}

/// Photos page branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PhotosPage {
    /// One cover photo per category.
    pub categories: Slice<Vec<PhotoRecord>>,
    /// The album of the category named in the route.
    pub album: Slice<PhotoAlbum>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pages {
    pub journal: Arc<JournalPage>,
    pub photos: Arc<PhotosPage>,
}

/// What the visitor is looking at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
    /// Page id from the last parsed location.
    pub selected_page: Option<String>,
    /// The full last parsed route.
    pub route: Option<PageRoute>,
}

/// Handles of long-running timers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntervalIds {
    /// The router's watch task.
    pub navigation: Option<IntervalId>,
}

/// Root of the state tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationState {
    pub pages: Pages,
    pub user: UserState,
    pub interval_ids: IntervalIds,
}

impl ApplicationState {
    #[must_use]
    pub fn selected_page(&self) -> Option<&str> {
        self.user.selected_page.as_deref()
    }

    /// Route parameter of the selected page as a flat string, if any.
    #[must_use]
    pub fn route_value(&self) -> Option<&str> {
        self.user
            .route
            .as_ref()
            .and_then(|route| route.param.as_value())
            .filter(|value| !value.is_empty())
    }

    /// Shorthand for the current journal entry.
    #[must_use]
    pub fn journal_entry(&self) -> Option<&JournalEntry> {
        self.pages.journal.entry.value()
    }

    /// A copy with the journal branch replaced by `update` applied to it.
    #[must_use]
    pub fn with_journal(&self, update: impl FnOnce(&mut JournalPage)) -> Self {
        let mut journal = JournalPage::clone(&self.pages.journal);
        update(&mut journal);
        Self {
            pages: Pages {
                journal: Arc::new(journal),
                photos: Arc::clone(&self.pages.photos),
            },
            ..self.clone()
        }
    }

    /// A copy with the photos branch replaced by `update` applied to it.
    #[must_use]
    pub fn with_photos(&self, update: impl FnOnce(&mut PhotosPage)) -> Self {
        let mut photos = PhotosPage::clone(&self.pages.photos);
        update(&mut photos);
        Self {
            pages: Pages {
                journal: Arc::clone(&self.pages.journal),
                photos: Arc::new(photos),
            },
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_has_empty_slices() {
        let state = ApplicationState::default();
        assert_eq!(state.pages.journal.entry.status, SliceStatus::Empty);
        assert_eq!(state.pages.photos.album.status, SliceStatus::Empty);
        assert!(state.selected_page().is_none());
        assert!(state.interval_ids.navigation.is_none());
    }

    #[test]
    fn failure_keeps_previous_value() {
        let slice = Slice::populated(7_u32);
        let failed = slice.loading().failed("offline");

        assert_eq!(failed.status, SliceStatus::Failed);
        assert_eq!(failed.value, Some(7));
        assert_eq!(failed.error.as_deref(), Some("offline"));
        assert!(failed.loading().error.is_none());
    }

    #[test]
    fn branch_updates_share_untouched_branches() {
        let state = ApplicationState::default();
        let next = state.with_photos(|photos| photos.categories = photos.categories.loading());

        assert!(Arc::ptr_eq(&state.pages.journal, &next.pages.journal));
        assert!(!Arc::ptr_eq(&state.pages.photos, &next.pages.photos));
        assert!(next.pages.photos.categories.is_loading());
    }

    #[test]
    fn route_value_ignores_empty_and_pairs() {
        let mut state = ApplicationState::default();
        state.user.route = Some(PageRoute::new("photos", ""));
        assert_eq!(state.route_value(), None);

        state.user.route = Some(PageRoute::new("photos", "Beach"));
        assert_eq!(state.route_value(), Some("Beach"));

        state.user.route = Some(PageRoute::new(
            "photos",
            vec![crate::router::QueryPair::new("a", "1")],
        ));
        assert_eq!(state.route_value(), None);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(ApplicationState::default()).unwrap();
        assert!(json["user"].get("selectedPage").is_some());
        assert!(json.get("intervalIds").is_some());
        assert_eq!(json["pages"]["journal"]["entry"]["status"], "empty");
    }
}
