//! Site assembly.
//!
//! [`Site`] wires the bus, the store, the data source, the router and the
//! component host together:
//!
//! ```text
//!            ┌──────────── UrlChanged ────────────┐
//!  Router ───┘                                    ▼
//!                        request signals ──> Coordinator ──> Store
//!  Components ─────────────────────────────────┘    │  ▲
//!      ▲                                   Effect::Fetch│  │FetchOutcome
//!      │                                            ▼  │
//!      └────────── AppSynced <── Effect::Sync    DataAccess (spawn_local)
//! ```
//!
//! Everything runs on one thread inside a `tokio::task::LocalSet`.

use super::host::{ComponentHost, Mounted};
use crate::app::{ApplicationState, Effect, FetchOutcome, FetchRequest, FetchTicket, Store};
use crate::bus::{EventBus, Message, Signal, Subscription};
use crate::config::SiteConfig;
use crate::data::{self, DataAccess};
use crate::domain::{Result, SiteError};
use crate::router::{IntervalId, Location, PollHandle, Router};
use crate::ui::{
    Background, Component, Interaction, JournalNavigation, JournalView, NavBar, PageFrame,
    PhotoAlbum, SiteHeader, Surface, Title,
};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Signals the store consumes.
const STORE_SIGNALS: [Signal; 4] = [
    Signal::JournalEntryRequested,
    Signal::JournalNavigationRequested,
    Signal::PhotosRequested,
    Signal::UrlChanged,
];

/// Drives the store: feeds it bus messages, runs its fetches, publishes its
/// syncs.
struct Coordinator {
    store: RefCell<Store>,
    data: Rc<dyn DataAccess>,
    bus: EventBus,
    fetches: RefCell<Vec<JoinHandle<()>>>,
}

impl Coordinator {
    fn handle(self: &Rc<Self>, message: &Message) -> Result<()> {
        let effects = self
            .store
            .try_borrow_mut()
            .map_err(|_| SiteError::Subscriber("store is busy".to_string()))?
            .handle_message(message)?;
        self.run(effects);
        Ok(())
    }

    fn run(self: &Rc<Self>, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch { ticket, request } => self.execute_fetch(ticket, request),
                Effect::Sync(state) => {
                    tracing::debug!("publishing state");
                    self.bus.publish(Message::AppSynced(state));
                }
            }
        }
    }

    fn execute_fetch(self: &Rc<Self>, ticket: FetchTicket, request: FetchRequest) {
        let weak: Weak<Self> = Rc::downgrade(self);
        let source = Rc::clone(&self.data);

        let task = tokio::task::spawn_local(async move {
            let result = data::fetch(&*source, &request).await;
            let Some(coordinator) = weak.upgrade() else {
                return;
            };

            let effect = match coordinator.store.try_borrow_mut() {
                Ok(mut store) => store.complete(FetchOutcome { ticket, result }),
                Err(_) => {
                    tracing::warn!(slice = %ticket.slice, "store busy, completion dropped");
                    None
                }
            };
            if let Some(effect) = effect {
                coordinator.run(vec![effect]);
            }
        });

        let mut fetches = self.fetches.borrow_mut();
        fetches.retain(|fetch| !fetch.is_finished());
        fetches.push(task);
    }

    fn abort_fetches(&self) {
        for fetch in self.fetches.borrow_mut().drain(..) {
            fetch.abort();
        }
    }
}

/// The assembled site.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use vanillabeach::data::InMemorySource;
/// use vanillabeach::router::MemoryLocation;
/// use vanillabeach::runtime::Site;
/// use vanillabeach::ui::TracingSurface;
/// use vanillabeach::SiteConfig;
///
/// let runtime = tokio::runtime::Builder::new_current_thread()
///     .enable_time()
///     .build()?;
/// let local = tokio::task::LocalSet::new();
///
/// local.block_on(&runtime, async {
///     let site = Site::new(
///         SiteConfig::default(),
///         Rc::new(MemoryLocation::new("http://localhost/")),
///         Rc::new(InMemorySource::default()),
///         Rc::new(TracingSurface),
///     )?;
///     site.attach_defaults();
///     site.start();
///     tokio::time::sleep(std::time::Duration::from_millis(10)).await;
///     assert_eq!(site.state().selected_page(), Some("journal"));
///     site.shutdown();
///     Ok::<(), vanillabeach::SiteError>(())
/// })?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Site {
    config: Arc<SiteConfig>,
    bus: EventBus,
    router: Router,
    coordinator: Rc<Coordinator>,
    host: ComponentHost,
    subscriptions: RefCell<Vec<Subscription>>,
    mounted: RefCell<Vec<Mounted>>,
    poll: RefCell<Option<PollHandle>>,
    shut_down: Cell<bool>,
}

impl std::fmt::Debug for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Site")
            .field("bus", &self.bus)
            .field("router", &self.router)
            .field("mounted", &self.mounted.borrow().len())
            .field("started", &self.poll.borrow().is_some())
            .finish_non_exhaustive()
    }
}

impl Site {
    /// Validates `config` and wires a site around the given collaborators.
    ///
    /// Nothing is attached or started yet.
    pub fn new(
        config: SiteConfig,
        location: Rc<dyn Location>,
        data: Rc<dyn DataAccess>,
        surface: Rc<dyn Surface>,
    ) -> Result<Self> {
        config.validate()?;
        let config = Arc::new(config);

        let bus = EventBus::new();
        let router = Router::new(location, bus.clone(), config.default_page.clone());
        let host = ComponentHost::new(bus.clone(), surface, config.fade_duration());
        let coordinator = Rc::new(Coordinator {
            store: RefCell::new(Store::new(Arc::clone(&config))),
            data,
            bus: bus.clone(),
            fetches: RefCell::new(Vec::new()),
        });

        let subscriptions = STORE_SIGNALS
            .into_iter()
            .map(|signal| {
                let weak = Rc::downgrade(&coordinator);
                bus.subscribe(signal, move |message| match weak.upgrade() {
                    Some(coordinator) => coordinator.handle(message),
                    None => Ok(()),
                })
            })
            .collect();

        tracing::debug!(
            default_page = %config.default_page,
            pages = config.pages.len(),
            "site assembled"
        );

        Ok(Self {
            config,
            bus,
            router,
            coordinator,
            host,
            subscriptions: RefCell::new(subscriptions),
            mounted: RefCell::new(Vec::new()),
            poll: RefCell::new(None),
            shut_down: Cell::new(false),
        })
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    #[must_use]
    pub const fn bus(&self) -> &EventBus {
        &self.bus
    }

    #[must_use]
    pub const fn router(&self) -> &Router {
        &self.router
    }

    /// The store's current snapshot.
    #[must_use]
    pub fn state(&self) -> Arc<ApplicationState> {
        self.coordinator.store.borrow().state()
    }

    /// Attaches a component for the lifetime of the site.
    pub fn attach(&self, component: impl Component + 'static) {
        let mounted = self.host.attach(component);
        self.mounted.borrow_mut().push(mounted);
    }

    /// Attaches the site's standard components: header, title, navigation,
    /// background, one frame per page, and the page contents.
    pub fn attach_defaults(&self) {
        let config = &self.config;

        self.attach(SiteHeader::new(config.site_title.clone()));
        self.attach(Title::new("title", config.site_title.clone()));
        self.attach(NavBar::new(Arc::clone(config)));
        self.attach(Background::new(Arc::clone(config)));
        for page in &config.pages {
            self.attach(PageFrame::new(page.page_id.clone()));
        }
        self.attach(JournalView::new(Arc::clone(config)));
        self.attach(JournalNavigation::new());
        self.attach(PhotoAlbum::new(Arc::clone(config)));
    }

    /// Routes an interaction to the attached component painting `element`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::NotFound`] if no attached component paints
    /// `element`.
    pub fn dispatch(&self, element: &str, interaction: &Interaction) -> Result<()> {
        let mounted = self.mounted.borrow();
        let target = mounted
            .iter()
            .find(|m| m.element() == element && m.is_attached())
            .ok_or_else(|| SiteError::NotFound(format!("component {element}")))?;
        target.dispatch(interaction);
        Ok(())
    }

    /// Starts the router and records its watch task in the state tree.
    ///
    /// Calling it again returns the running watch's id.
    pub fn start(&self) -> IntervalId {
        if let Some(running) = self.poll.borrow().as_ref() {
            return running.id();
        }

        let handle = self.router.start(self.config.poll_interval());
        let id = handle.id();
        self.coordinator
            .store
            .borrow_mut()
            .set_navigation_interval(Some(id));
        self.poll.replace(Some(handle));

        tracing::debug!("site started");
        id
    }

    /// Stops the router, detaches every component, aborts in-flight fetches
    /// and unsubscribes the store. Safe to call more than once.
    pub fn shutdown(&self) {
        if self.shut_down.replace(true) {
            return;
        }

        if let Some(handle) = self.poll.take() {
            handle.cancel();
            if let Ok(mut store) = self.coordinator.store.try_borrow_mut() {
                store.set_navigation_interval(None);
            }
        }

        for mounted in self.mounted.take() {
            mounted.detach();
        }
        self.coordinator.abort_fetches();
        self.subscriptions.take();

        tracing::debug!("site shut down");
    }
}

impl Drop for Site {
    fn drop(&mut self) {
        self.shutdown();
    }
}
