//! Effects emitted by the store.
//!
//! The store never performs I/O itself. Handling a message yields a list of
//! [`Effect`]s that the runtime executes: fetches go to the data-access
//! collaborator and their [`FetchOutcome`] is fed back into
//! [`Store::complete`](super::Store::complete); syncs are published on the
//! bus as `AppSynced`.
//!
//! # Example
//!
//! ```
//! use vanillabeach::app::{Effect, FetchRequest, SliceKey};
//!
//! let request = FetchRequest::PhotoAlbum { category: "Beach".to_string() };
//! assert_eq!(request.slice(), SliceKey::PhotoAlbum);
//! ```

use super::state::ApplicationState;
use crate::domain::{JournalEntry, JournalSummary, PhotoRecord, Result};
use std::fmt;
use std::sync::Arc;

/// Names one fetchable slice of the state tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceKey {
    JournalEntry,
    JournalNavigation,
    PhotoCategories,
    PhotoAlbum,
}

impl SliceKey {
    pub const ALL: [Self; 4] = [
        Self::JournalEntry,
        Self::JournalNavigation,
        Self::PhotoCategories,
        Self::PhotoAlbum,
    ];

    const fn index(self) -> usize {
        match self {
            Self::JournalEntry => 0,
            Self::JournalNavigation => 1,
            Self::PhotoCategories => 2,
            Self::PhotoAlbum => 3,
        }
    }

    /// Dotted path of the slice in the serialized tree.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::JournalEntry => "pages.journal.entry",
            Self::JournalNavigation => "pages.journal.navigation",
            Self::PhotoCategories => "pages.photos.categories",
            Self::PhotoAlbum => "pages.photos.album",
        }
    }
}

impl fmt::Display for SliceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A data-access call the runtime should make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    /// `id: None` asks for the most recent entry.
    JournalEntry { id: Option<String> },
    JournalNavigation,
    PhotoCategories,
    PhotoAlbum { category: String },
}

impl FetchRequest {
    /// The slice this request populates.
    #[must_use]
    pub const fn slice(&self) -> SliceKey {
        match self {
            Self::JournalEntry { .. } => SliceKey::JournalEntry,
            Self::JournalNavigation => SliceKey::JournalNavigation,
            Self::PhotoCategories => SliceKey::PhotoCategories,
            Self::PhotoAlbum { .. } => SliceKey::PhotoAlbum,
        }
    }
}

/// Identifies one issued request: its slice and its sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub slice: SliceKey,
    pub seq: u64,
}

/// What a successful fetch produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPayload {
    JournalEntry(JournalEntry),
    JournalNavigation(Vec<JournalSummary>),
    PhotoCategories(Vec<PhotoRecord>),
    PhotoAlbum {
        category: String,
        photos: Vec<PhotoRecord>,
    },
}

impl FetchPayload {
    #[must_use]
    pub const fn slice(&self) -> SliceKey {
        match self {
            Self::JournalEntry(_) => SliceKey::JournalEntry,
            Self::JournalNavigation(_) => SliceKey::JournalNavigation,
            Self::PhotoCategories(_) => SliceKey::PhotoCategories,
            Self::PhotoAlbum { .. } => SliceKey::PhotoAlbum,
        }
    }
}

/// A finished fetch, fed back into the store.
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: Result<FetchPayload>,
}

/// Side effects requested by the store.
#[derive(Debug, Clone)]
pub enum Effect {
    /// Call the data source and report back with the ticket.
    Fetch {
        ticket: FetchTicket,
        request: FetchRequest,
    },
    /// Publish this snapshot as `AppSynced`.
    Sync(Arc<ApplicationState>),
}

/// Per-slice monotonic request counters.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    issued: [u64; SliceKey::ALL.len()],
}

impl RequestSequencer {
    /// Issues the next ticket for `slice`.
    pub fn issue(&mut self, slice: SliceKey) -> FetchTicket {
        let counter = &mut self.issued[slice.index()];
        *counter += 1;
        FetchTicket {
            slice,
            seq: *counter,
        }
    }

    /// Whether `ticket` answers the newest request issued for its slice.
    #[must_use]
    pub const fn is_latest(&self, ticket: FetchTicket) -> bool {
        self.issued[ticket.slice.index()] == ticket.seq
    }

    /// Sequence number of the newest request for `slice` (0 if none).
    #[must_use]
    pub const fn latest(&self, slice: SliceKey) -> u64 {
        self.issued[slice.index()]
    }
}
