//! The router and its location watch task.
//!
//! # Change detection
//!
//! ```text
//! location.set_fragment ─┬─> change notification ─┐
//!                        └─> (next poll tick) ────┴─> check_for_change ─> UrlChanged
//! ```
//!
//! When the [`Location`] offers native change notifications the watch task
//! reacts to them immediately; the poll tick keeps running as the fallback
//! for platforms (or fragment edits) that do not notify. Either way every
//! check goes through [`Router::check_for_change`], which publishes only when
//! the full location string differs from the last one observed.
//!
//! Detection is asynchronous by contract: `navigate_to` never publishes.

use super::location::Location;
use super::route::{build_fragment, parse_route, PageRoute, RouteParam};
use crate::bus::{EventBus, Message};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

static NEXT_INTERVAL_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of a running background timer, as recorded in the state tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntervalId(u64);

impl IntervalId {
    fn next() -> Self {
        Self(NEXT_INTERVAL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Cancellable handle to the router's watch task.
///
/// Dropping the handle cancels the task.
#[derive(Debug)]
pub struct PollHandle {
    id: IntervalId,
    task: JoinHandle<()>,
}

impl PollHandle {
    #[must_use]
    pub const fn id(&self) -> IntervalId {
        self.id
    }

    /// Stops the watch task. Safe to call more than once.
    pub fn cancel(&self) {
        if !self.task.is_finished() {
            tracing::debug!(interval = self.id.0, "cancelling navigation watch");
        }
        self.task.abort();
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct RouterInner {
    location: Rc<dyn Location>,
    bus: EventBus,
    default_page: String,
    last_observed: RefCell<Option<String>>,
}

/// Translates the location fragment into routes on the bus.
///
/// Cloning yields another handle to the same router (and the same dedup
/// memory).
#[derive(Clone)]
pub struct Router {
    inner: Rc<RouterInner>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("default_page", &self.inner.default_page)
            .field("last_observed", &self.inner.last_observed.borrow())
            .finish_non_exhaustive()
    }
}

impl Router {
    #[must_use]
    pub fn new(location: Rc<dyn Location>, bus: EventBus, default_page: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RouterInner {
                location,
                bus,
                default_page: default_page.into(),
                last_observed: RefCell::new(None),
            }),
        }
    }

    /// Rewrites an empty fragment to the default page.
    ///
    /// Returns `true` when the fragment was rewritten.
    pub fn ensure_fragment(&self) -> bool {
        if !self.inner.location.fragment().is_empty() {
            return false;
        }
        tracing::debug!(
            default_page = %self.inner.default_page,
            "empty fragment, applying default page"
        );
        self.inner.location.set_fragment(&self.inner.default_page);
        true
    }

    /// Compares the location with the last observed one and publishes
    /// `UrlChanged` if it moved.
    ///
    /// Returns the published route, or `None` when nothing changed.
    pub fn check_for_change(&self) -> Option<PageRoute> {
        self.ensure_fragment();

        let href = self.inner.location.href();
        {
            let mut last = self.inner.last_observed.borrow_mut();
            if last.as_deref() == Some(href.as_str()) {
                return None;
            }
            *last = Some(href);
        }

        let route = parse_route(&self.inner.location.fragment(), &self.inner.default_page);
        tracing::debug!(page = %route.name, param = %route.param, "location changed");

        self.inner.bus.publish(Message::UrlChanged(route.clone()));
        Some(route)
    }

    /// Assigns a new fragment built from `page` and `param`.
    ///
    /// The change is picked up by the watch task; nothing is published here.
    pub fn navigate_to(&self, page: &str, param: impl Into<RouteParam>) {
        let fragment = build_fragment(page, &param.into());
        tracing::debug!(fragment = %fragment, "navigating");
        self.inner.location.set_fragment(&fragment);
    }

    /// The route the current fragment parses to, without publishing.
    #[must_use]
    pub fn current_route(&self) -> PageRoute {
        parse_route(&self.inner.location.fragment(), &self.inner.default_page)
    }

    /// Starts watching the location.
    ///
    /// The fragment is defaulted first, so there is always a current route.
    /// The first check runs on the task's first poll.
    ///
    /// # Panics
    ///
    /// Must be called from within a `tokio::task::LocalSet`.
    #[must_use = "dropping the PollHandle stops the router"]
    pub fn start(&self, poll_interval: Duration) -> PollHandle {
        self.ensure_fragment();

        let id = IntervalId::next();
        let changes = self.inner.location.changes();
        tracing::debug!(
            interval = id.0,
            poll_ms = poll_interval.as_millis() as u64,
            native_notifications = changes.is_some(),
            "starting navigation watch"
        );

        let router = self.clone();
        let task = tokio::task::spawn_local(router.watch(poll_interval, changes));

        PollHandle { id, task }
    }

    async fn watch(self, poll_interval: Duration, mut changes: Option<watch::Receiver<u64>>) {
        let mut ticker = tokio::time::interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let notifier_closed = match changes.as_mut() {
                Some(receiver) => {
                    tokio::select! {
                        _ = ticker.tick() => false,
                        changed = receiver.changed() => changed.is_err(),
                    }
                }
                None => {
                    ticker.tick().await;
                    false
                }
            };

            if notifier_closed {
                tracing::debug!("location notifier closed, falling back to polling");
                changes = None;
            }

            self.check_for_change();
        }
    }
}
