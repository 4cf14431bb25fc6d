//! Vanilla Beach: the client-side core of a personal site.
//!
//! The site is a single page split into a journal, photo albums and a few
//! static pages. This crate provides everything behind the markup:
//! - A hash router that watches the location fragment and announces changes
//! - A typed publish/subscribe bus decoupling every part from the others
//! - An application store that owns the state tree and talks to data sources
//! - Display components that repaint their element with fade transitions

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime/)                                 │  ← Assembly
//! │  - Site: wires bus, store, router, components       │
//! │  - ComponentHost: fades, repaints, detaching        │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Router        │   │ Application   │   │ UI Layer      │
//! │ (router/)     │   │ (app/)        │   │ (ui/)         │
//! │ - Fragments   │   │ - State tree  │   │ - Components  │
//! │ - Polling     │   │ - Store       │   │ - View models │
//! │ - Location    │   │ - Effects     │   │ - Surfaces    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Event Bus (bus/)                                   │  ← Signals
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Data & Configuration                       │
//! │  - Journal and photo records (domain/)              │
//! │  - DataAccess collaborator (data/)                  │
//! │  - Navigation configuration (config)                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: State tree, store and fetch effects
//! - [`bus`]: Signals, messages and the event bus
//! - [`config`]: Navigation, timing and media configuration
//! - [`data`]: Data-access collaborator and an in-memory implementation
//! - [`domain`]: Journal and photo records, errors
//! - [`observability`]: Tracing subscriber setup
//! - [`router`]: Route parsing, location abstraction and the watch loop
//! - [`runtime`]: Component host and site assembly
//! - [`ui`]: Display components, view models and paint surfaces
//!
//! # Configuration
//!
//! The site reads an optional TOML file (see [`config`] for the format):
//!
//! ```toml
//! default_page = "journal"
//! conflict_policy = "latest-request-wins"
//!
//! [timing]
//! fade_duration_ms = 500
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Load**: [`initialize`] reads the configuration and installs tracing.
//!
//! 2. **Assemble**: [`Site::new`] validates the configuration, creates the bus,
//!    subscribes the store to request signals and builds the router.
//!
//! 3. **Attach**: components subscribe to `AppSynced` and publish their
//!    initial requests (the latest journal entry, the entry list).
//!
//! 4. **Start**: the router defaults an empty fragment, publishes the first
//!    `UrlChanged` and keeps watching the location.
//!
//! 5. **Run**: every request turns into a fetch, every completion into a new
//!    immutable state snapshot, and every snapshot into component repaints.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use std::time::Duration;
//! use vanillabeach::data::InMemorySource;
//! use vanillabeach::router::{Location, MemoryLocation};
//! use vanillabeach::ui::RecordingSurface;
//! use vanillabeach::{Site, SiteConfig, SiteError};
//!
//! let runtime = tokio::runtime::Builder::new_current_thread()
//!     .enable_time()
//!     .build()?;
//! let local = tokio::task::LocalSet::new();
//!
//! local.block_on(&runtime, async {
//!     let location = Rc::new(MemoryLocation::with_notifications("http://localhost/"));
//!     let source = InMemorySource::from_json(
//!         r#"{ "journals": [{ "id": "42", "title": "Hello" }] }"#,
//!     )?;
//!
//!     let site = Site::new(
//!         SiteConfig::default(),
//!         location.clone(),
//!         Rc::new(source),
//!         Rc::new(RecordingSurface::new()),
//!     )?;
//!     site.attach_defaults();
//!     site.start();
//!
//!     location.set_fragment("#journal/42");
//!     tokio::time::sleep(Duration::from_millis(20)).await;
//!
//!     let state = site.state();
//!     assert_eq!(state.selected_page(), Some("journal"));
//!     assert_eq!(state.journal_entry().map(|e| e.id.as_str()), Some("42"));
//!     site.shutdown();
//!     Ok::<(), SiteError>(())
//! })?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Single-threaded core
//!
//! The browser runs everything on one thread, and so does this crate: shared
//! parts live in `Rc<RefCell<_>>`, asynchronous work runs on a tokio
//! `LocalSet`. No borrow is held while a message is published.
//!
//! ## Immutable snapshots
//!
//! The store never mutates a published state. Each handled message produces
//! a new tree that shares untouched page branches with the previous one.
//!
//! ## Effects instead of callbacks
//!
//! The store is a plain state machine returning [`app::Effect`]s. The runtime
//! executes fetches and publishes syncs, which keeps the store testable
//! without a runtime.

pub mod app;
pub mod bus;
pub mod config;
pub mod data;
pub mod domain;
pub mod observability;
pub mod router;
pub mod runtime;
pub mod ui;

pub use app::{ApplicationState, Store};
pub use bus::{EventBus, Message, Signal};
pub use config::{ConflictPolicy, PageConfig, SiteConfig};
pub use domain::{Result, SiteError};
pub use router::{PageRoute, RouteParam, Router};
pub use runtime::Site;

use std::path::Path;

/// Loads the site configuration and installs tracing.
///
/// Without a path the built-in defaults are used.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or fails
/// validation.
///
/// # Example
///
/// ```rust
/// use vanillabeach::initialize;
///
/// let config = initialize(None)?;
/// assert_eq!(config.default_page, "journal");
/// # Ok::<(), vanillabeach::SiteError>(())
/// ```
pub fn initialize(config_path: Option<&Path>) -> Result<SiteConfig> {
    let config = match config_path {
        Some(path) => SiteConfig::from_file(path)?,
        None => SiteConfig::default(),
    };

    observability::init_tracing(&config);
    tracing::debug!(
        default_page = %config.default_page,
        conflict_policy = ?config.conflict_policy,
        "initializing vanillabeach"
    );

    Ok(config)
}
