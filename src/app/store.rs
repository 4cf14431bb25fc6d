//! The application store.
//!
//! [`Store`] owns the current [`ApplicationState`] and is the only thing that
//! ever replaces it. It is a pure state machine: bus messages go in through
//! [`Store::handle_message`], fetch results through [`Store::complete`], and
//! both return the [`Effect`]s the runtime must carry out.
//!
//! # Request flow
//!
//! ```text
//! JournalEntryRequested ─> handle_message ─> Effect::Fetch ─┐
//!                                                           │ runtime awaits
//!                        AppSynced <─ Effect::Sync <─ complete(FetchOutcome)
//! ```
//!
//! Each handled request produces exactly one sync. A `UrlChanged` for a page
//! without data syncs immediately; for the journal page the sync is deferred
//! until the entry fetch it triggers completes.
//!
//! # Out-of-order completions
//!
//! Every fetch carries a [`FetchTicket`] with a per-slice sequence number.
//! Under [`ConflictPolicy::LatestRequestWins`] a completion whose ticket is no
//! longer the newest for its slice is discarded without publishing. Under
//! [`ConflictPolicy::LastCompletionWins`] every completion is applied in
//! arrival order.

use super::effects::{
    Effect, FetchOutcome, FetchPayload, FetchRequest, RequestSequencer, SliceKey,
};
use super::state::{ApplicationState, Slice};
use crate::bus::Message;
use crate::config::{ConflictPolicy, SiteConfig};
use crate::domain::{PhotoAlbum, Result};
use crate::router::{IntervalId, PageRoute};
use std::sync::Arc;

/// Owner of the application state.
#[derive(Debug)]
pub struct Store {
    config: Arc<SiteConfig>,
    state: Arc<ApplicationState>,
    sequencer: RequestSequencer,
}

impl Store {
    /// Creates a store holding a fresh tree with every slice empty.
    #[must_use]
    pub fn new(config: Arc<SiteConfig>) -> Self {
        Self {
            config,
            state: Arc::new(ApplicationState::default()),
            sequencer: RequestSequencer::default(),
        }
    }

    /// The current snapshot.
    #[must_use]
    pub fn state(&self) -> Arc<ApplicationState> {
        Arc::clone(&self.state)
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Processes one bus message and returns the effects to execute.
    ///
    /// `AppSynced` is the store's own output and is ignored.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` keeps the handler signature uniform
    /// with bus subscribers.
    pub fn handle_message(&mut self, message: &Message) -> Result<Vec<Effect>> {
        let _span = tracing::debug_span!("handle_message", signal = %message.signal()).entered();

        let effects = match message {
            Message::AppSynced(_) => Vec::new(),
            Message::JournalEntryRequested { id } => {
                vec![self.request(FetchRequest::JournalEntry { id: id.clone() })]
            }
            Message::JournalNavigationRequested => {
                vec![self.request(FetchRequest::JournalNavigation)]
            }
            Message::PhotosRequested { category } => {
                let request = match category.as_deref().filter(|c| !c.is_empty()) {
                    Some(category) => FetchRequest::PhotoAlbum {
                        category: category.to_string(),
                    },
                    None => FetchRequest::PhotoCategories,
                };
                vec![self.request(request)]
            }
            Message::UrlChanged(route) => self.route_changed(route),
        };

        Ok(effects)
    }

    fn route_changed(&mut self, route: &PageRoute) -> Vec<Effect> {
        let mut next = ApplicationState::clone(&self.state);
        next.user.selected_page = Some(route.name.clone());
        next.user.route = Some(route.clone());
        self.state = Arc::new(next);

        tracing::debug!(page = %route.name, "selected page changed");

        if self.config.journal_page_id() == Some(route.name.as_str()) {
            let id = route
                .param
                .as_value()
                .filter(|id| !id.is_empty())
                .map(str::to_string);
            return vec![self.request(FetchRequest::JournalEntry { id })];
        }

        vec![Effect::Sync(self.state())]
    }

    /// Marks the target slice as loading and issues a ticket for `request`.
    fn request(&mut self, request: FetchRequest) -> Effect {
        let ticket = self.sequencer.issue(request.slice());
        tracing::debug!(slice = %ticket.slice, seq = ticket.seq, "fetch requested");

        let current = &self.state;
        self.state = Arc::new(match &request {
            FetchRequest::JournalEntry { .. } => {
                current.with_journal(|journal| journal.entry = journal.entry.loading())
            }
            FetchRequest::JournalNavigation => {
                current.with_journal(|journal| journal.navigation = journal.navigation.loading())
            }
            FetchRequest::PhotoCategories => {
                current.with_photos(|photos| photos.categories = photos.categories.loading())
            }
            FetchRequest::PhotoAlbum { .. } => {
                current.with_photos(|photos| photos.album = photos.album.loading())
            }
        });

        Effect::Fetch { ticket, request }
    }

    /// Applies a finished fetch.
    ///
    /// Returns the sync to publish, or `None` when the outcome was discarded.
    pub fn complete(&mut self, outcome: FetchOutcome) -> Option<Effect> {
        let FetchOutcome { ticket, result } = outcome;
        let _span =
            tracing::debug_span!("complete", slice = %ticket.slice, seq = ticket.seq).entered();

        if self.config.conflict_policy == ConflictPolicy::LatestRequestWins
            && !self.sequencer.is_latest(ticket)
        {
            tracing::debug!(
                latest = self.sequencer.latest(ticket.slice),
                "discarding stale completion"
            );
            return None;
        }

        let current = &self.state;
        let next = match result {
            Ok(payload) => {
                if payload.slice() != ticket.slice {
                    tracing::warn!(
                        payload = %payload.slice(),
                        "completion payload does not match its ticket"
                    );
                    return None;
                }
                match payload {
                    FetchPayload::JournalEntry(entry) => current
                        .with_journal(|journal| journal.entry = Slice::populated(entry)),
                    FetchPayload::JournalNavigation(list) => current
                        .with_journal(|journal| journal.navigation = Slice::populated(list)),
                    FetchPayload::PhotoCategories(covers) => current
                        .with_photos(|photos| photos.categories = Slice::populated(covers)),
                    FetchPayload::PhotoAlbum { category, photos: records } => {
                        current.with_photos(|photos| {
                            photos.album = Slice::populated(PhotoAlbum {
                                category,
                                photos: records,
                            });
                        })
                    }
                }
            }
            Err(error) => {
                tracing::warn!(error = %error, "fetch failed");
                let message = error.to_string();
                match ticket.slice {
                    SliceKey::JournalEntry => current
                        .with_journal(|journal| journal.entry = journal.entry.failed(message)),
                    SliceKey::JournalNavigation => current.with_journal(|journal| {
                        journal.navigation = journal.navigation.failed(message);
                    }),
                    SliceKey::PhotoCategories => current.with_photos(|photos| {
                        photos.categories = photos.categories.failed(message);
                    }),
                    SliceKey::PhotoAlbum => current
                        .with_photos(|photos| photos.album = photos.album.failed(message)),
                }
            }
        };

        self.state = Arc::new(next);
        tracing::debug!("state replaced");
        Some(Effect::Sync(self.state()))
    }

    /// Records the router's watch task handle. Does not publish.
    pub fn set_navigation_interval(&mut self, id: Option<IntervalId>) {
        let mut next = ApplicationState::clone(&self.state);
        next.interval_ids.navigation = id;
        self.state = Arc::new(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{FetchTicket, SliceStatus};
    use crate::domain::{JournalEntry, PhotoRecord, SiteError};

    fn store(policy: ConflictPolicy) -> Store {
        Store::new(Arc::new(SiteConfig {
            conflict_policy: policy,
            ..SiteConfig::default()
        }))
    }

    fn fetch_ticket(effects: &[Effect]) -> FetchTicket {
        match effects {
            [Effect::Fetch { ticket, .. }] => *ticket,
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    fn album(category: &str) -> FetchPayload {
        FetchPayload::PhotoAlbum {
            category: category.to_string(),
            photos: vec![PhotoRecord {
                id: format!("{category}-1"),
                category: category.to_string(),
                ..PhotoRecord::default()
            }],
        }
    }

    fn entry(id: &str) -> FetchPayload {
        FetchPayload::JournalEntry(JournalEntry {
            id: id.to_string(),
            ..JournalEntry::default()
        })
    }

    #[test]
    fn every_handled_message_replaces_the_tree() {
        let mut store = store(ConflictPolicy::default());
        let messages = [
            Message::JournalNavigationRequested,
            Message::journal_entry(Some("1")),
            Message::photos(None::<String>),
            Message::UrlChanged(PageRoute::new("junk", "")),
        ];

        for message in &messages {
            let before = store.state();
            store.handle_message(message).unwrap();
            assert!(!Arc::ptr_eq(&before, &store.state()), "{message:?}");
        }
    }

    #[test]
    fn one_sync_per_request() {
        let mut store = store(ConflictPolicy::default());

        let effects = store.handle_message(&Message::journal_entry(Some("42"))).unwrap();
        let ticket = fetch_ticket(&effects);
        assert!(store.state().pages.journal.entry.is_loading());

        let sync = store.complete(FetchOutcome {
            ticket,
            result: Ok(entry("42")),
        });

        let Some(Effect::Sync(state)) = sync else {
            panic!("expected a sync");
        };
        assert_eq!(state.journal_entry().map(|e| e.id.as_str()), Some("42"));
        assert_eq!(state.pages.journal.entry.status, SliceStatus::Populated);
        assert!(Arc::ptr_eq(&state, &store.state()));
    }

    #[test]
    fn journal_route_defers_sync_until_entry_arrives() {
        let mut store = store(ConflictPolicy::default());

        let effects = store
            .handle_message(&Message::UrlChanged(PageRoute::new("journal", "42")))
            .unwrap();
        assert_eq!(store.state().selected_page(), Some("journal"));

        let [Effect::Fetch { ticket, request }] = effects.as_slice() else {
            panic!("expected a fetch, got {effects:?}");
        };
        assert_eq!(
            *request,
            FetchRequest::JournalEntry {
                id: Some("42".to_string())
            }
        );

        let sync = store.complete(FetchOutcome {
            ticket: *ticket,
            result: Ok(entry("42")),
        });
        assert!(matches!(sync, Some(Effect::Sync(_))));
    }

    #[test]
    fn bare_journal_route_asks_for_latest_entry() {
        let mut store = store(ConflictPolicy::default());
        let effects = store
            .handle_message(&Message::UrlChanged(PageRoute::new("journal", "")))
            .unwrap();
        assert!(matches!(
            effects.as_slice(),
            [Effect::Fetch {
                request: FetchRequest::JournalEntry { id: None },
                ..
            }]
        ));
    }

    #[test]
    fn other_routes_sync_immediately() {
        let mut store = store(ConflictPolicy::default());
        let effects = store
            .handle_message(&Message::UrlChanged(PageRoute::new("photos", "Beach")))
            .unwrap();

        let [Effect::Sync(state)] = effects.as_slice() else {
            panic!("expected a sync, got {effects:?}");
        };
        assert_eq!(state.selected_page(), Some("photos"));
        assert_eq!(state.route_value(), Some("Beach"));
    }

    #[test]
    fn photos_request_targets_album_or_covers() {
        let mut store = store(ConflictPolicy::default());

        let covers = store.handle_message(&Message::photos(None::<String>)).unwrap();
        assert_eq!(fetch_ticket(&covers).slice, SliceKey::PhotoCategories);

        let blank = store.handle_message(&Message::photos(Some(""))).unwrap();
        assert_eq!(fetch_ticket(&blank).slice, SliceKey::PhotoCategories);

        let album = store.handle_message(&Message::photos(Some("Beach"))).unwrap();
        assert_eq!(fetch_ticket(&album).slice, SliceKey::PhotoAlbum);
    }

    #[test]
    fn latest_request_wins_discards_late_stale_result() {
        let mut store = store(ConflictPolicy::LatestRequestWins);
        let a = fetch_ticket(&store.handle_message(&Message::photos(Some("a"))).unwrap());
        let b = fetch_ticket(&store.handle_message(&Message::photos(Some("b"))).unwrap());

        let fresh = FetchOutcome {
            ticket: b,
            result: Ok(album("b")),
        };
        assert!(store.complete(fresh).is_some());
        let stale = FetchOutcome {
            ticket: a,
            result: Ok(album("a")),
        };
        assert!(store.complete(stale).is_none());

        let state = store.state();
        let current = state.pages.photos.album.value().unwrap();
        assert!(current.is_for("b"));
    }

    #[test]
    fn last_completion_wins_lets_late_result_overwrite() {
        let mut store = store(ConflictPolicy::LastCompletionWins);
        let a = fetch_ticket(&store.handle_message(&Message::photos(Some("a"))).unwrap());
        let b = fetch_ticket(&store.handle_message(&Message::photos(Some("b"))).unwrap());

        store.complete(FetchOutcome {
            ticket: b,
            result: Ok(album("b")),
        });
        let late = store.complete(FetchOutcome {
            ticket: a,
            result: Ok(album("a")),
        });

        assert!(late.is_some());
        let state = store.state();
        assert!(state.pages.photos.album.value().unwrap().is_for("a"));
    }

    #[test]
    fn failure_marks_slice_and_still_syncs() {
        let mut store = store(ConflictPolicy::default());
        let first = store
            .handle_message(&Message::journal_entry(Some("1")))
            .unwrap();
        store.complete(FetchOutcome {
            ticket: fetch_ticket(&first),
            result: Ok(entry("1")),
        });

        let second = store
            .handle_message(&Message::journal_entry(Some("2")))
            .unwrap();
        let second = fetch_ticket(&second);
        let sync = store.complete(FetchOutcome {
            ticket: second,
            result: Err(SiteError::Fetch("offline".to_string())),
        });

        assert!(matches!(sync, Some(Effect::Sync(_))));
        let state = store.state();
        let slice = &state.pages.journal.entry;
        assert_eq!(slice.status, SliceStatus::Failed);
        assert_eq!(slice.value().map(|e| e.id.as_str()), Some("1"));
        assert_eq!(slice.error.as_deref(), Some("Fetch error: offline"));
    }

    #[test]
    fn mismatched_payload_is_discarded() {
        let mut store = store(ConflictPolicy::default());
        let effects = store
            .handle_message(&Message::JournalNavigationRequested)
            .unwrap();
        let outcome = FetchOutcome {
            ticket: fetch_ticket(&effects),
            result: Ok(entry("1")),
        };
        assert!(store.complete(outcome).is_none());
    }

    #[test]
    fn navigation_interval_is_recorded_quietly() {
        let mut store = store(ConflictPolicy::default());
        let before = store.state();
        store.set_navigation_interval(None);
        assert!(!Arc::ptr_eq(&before, &store.state()));
        assert!(store.state().interval_ids.navigation.is_none());
    }
}
