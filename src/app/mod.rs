//! Application layer: the state tree and the store that owns it.
//!
//! This module sits between the event bus and the display components. The
//! store consumes request signals, asks the runtime to fetch data, and
//! republishes the whole tree once the data lands.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Bus Message → Store::handle_message → Effects → Runtime → Data Source
//!                                                              ↓
//!      AppSynced ← Effect::Sync ← Store::complete ← FetchOutcome
//! ```
//!
//! # Modules
//!
//! - [`effects`]: Fetch requests, tickets and outcomes exchanged with the runtime
//! - [`state`]: The application state tree and per-slice fetch status
//! - [`store`]: The state machine that replaces the tree
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use vanillabeach::app::{Effect, Store};
//! use vanillabeach::bus::Message;
//! use vanillabeach::router::PageRoute;
//! use vanillabeach::SiteConfig;
//!
//! let mut store = Store::new(Arc::new(SiteConfig::default()));
//! let effects = store.handle_message(&Message::UrlChanged(PageRoute::new("junk", "")))?;
//! assert!(matches!(effects.as_slice(), [Effect::Sync(_)]));
//! assert_eq!(store.state().selected_page(), Some("junk"));
//! # Ok::<(), vanillabeach::SiteError>(())
//! ```

pub mod effects;
pub mod state;
pub mod store;

pub use effects::{
    Effect, FetchOutcome, FetchPayload, FetchRequest, FetchTicket, RequestSequencer, SliceKey,
};
pub use state::{
    ApplicationState, IntervalIds, JournalPage, Pages, PhotosPage, Slice, SliceStatus, UserState,
};
pub use store::Store;
