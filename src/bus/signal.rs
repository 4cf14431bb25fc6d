//! Signals and their typed payloads.

use crate::app::ApplicationState;
use crate::router::PageRoute;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A named topic on the event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Signal {
    /// The store republished the full application state.
    AppSynced,
    /// Someone wants a journal entry loaded.
    JournalEntryRequested,
    /// Someone wants the journal list loaded.
    JournalNavigationRequested,
    /// Someone wants photos loaded, optionally for one category.
    PhotosRequested,
    /// The router observed a new location.
    UrlChanged,
}

impl Signal {
    /// Wire name of the signal.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AppSynced => "APP_SYNC",
            Self::JournalEntryRequested => "JOURNAL_ENTRY_REQUEST",
            Self::JournalNavigationRequested => "JOURNAL_NAVIGATION_REQUEST",
            Self::PhotosRequested => "CATEGORY_PHOTOS_REQUEST",
            Self::UrlChanged => "URL_CHANGE",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A message published on the bus. Each variant belongs to exactly one
/// [`Signal`].
#[derive(Debug, Clone)]
pub enum Message {
    AppSynced(Arc<ApplicationState>),
    /// `id: None` asks for the most recent entry.
    JournalEntryRequested { id: Option<String> },
    JournalNavigationRequested,
    /// `category: None` asks for the category cover list.
    PhotosRequested { category: Option<String> },
    UrlChanged(PageRoute),
}

impl Message {
    #[must_use]
    pub const fn signal(&self) -> Signal {
        match self {
            Self::AppSynced(_) => Signal::AppSynced,
            Self::JournalEntryRequested { .. } => Signal::JournalEntryRequested,
            Self::JournalNavigationRequested => Signal::JournalNavigationRequested,
            Self::PhotosRequested { .. } => Signal::PhotosRequested,
            Self::UrlChanged(_) => Signal::UrlChanged,
        }
    }

    /// Convenience constructor for an entry request.
    #[must_use]
    pub fn journal_entry(id: Option<impl Into<String>>) -> Self {
        Self::JournalEntryRequested {
            id: id.map(Into::into),
        }
    }

    /// Convenience constructor for a photos request.
    #[must_use]
    pub fn photos(category: Option<impl Into<String>>) -> Self {
        Self::PhotosRequested {
            category: category.map(Into::into),
        }
    }
}
