//! Named-topic publish/subscribe.
//!
//! The bus is an explicitly constructed value; cloning an [`EventBus`] yields
//! another handle to the same registry. Delivery is synchronous: `publish`
//! calls every handler registered for the signal, in registration order,
//! before it returns. Handlers that need asynchronous work spawn it
//! themselves.
//!
//! No registry borrow is held while a handler runs, so handlers may publish,
//! subscribe or dispose subscriptions re-entrantly.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use vanillabeach::bus::{EventBus, Message, Signal};
//!
//! let bus = EventBus::new();
//! let seen = Rc::new(Cell::new(0));
//!
//! let counter = Rc::clone(&seen);
//! let subscription = bus.subscribe(Signal::JournalNavigationRequested, move |_| {
//!     counter.set(counter.get() + 1);
//!     Ok(())
//! });
//!
//! bus.publish(Message::JournalNavigationRequested);
//! subscription.dispose();
//! bus.publish(Message::JournalNavigationRequested);
//!
//! assert_eq!(seen.get(), 1);
//! ```

use super::signal::{Message, Signal};
use crate::domain::{Result, SiteError};
use std::cell::RefCell;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::{Rc, Weak};

type Handler = Rc<dyn Fn(&Message) -> Result<()>>;

/// Identifier of one registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

struct Registration {
    id: SubscriptionId,
    signal: Signal,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    registrations: Vec<Registration>,
}

impl Registry {
    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.id != id);
        self.registrations.len() != before
    }

    fn contains(&self, id: SubscriptionId) -> bool {
        self.registrations.iter().any(|r| r.id == id)
    }
}

/// Outcome of one [`EventBus::publish`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub signal: Option<Signal>,
    /// Handlers that returned `Ok`.
    pub delivered: usize,
    /// Handlers that returned `Err` or panicked.
    pub failed: Vec<SubscriptionId>,
}

impl PublishReport {
    /// Total number of handlers invoked.
    #[must_use]
    pub fn invoked(&self) -> usize {
        self.delivered + self.failed.len()
    }
}

/// Handle to a shared subscriber registry.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subscribers = self.registry.borrow().registrations.len();
        f.debug_struct("EventBus")
            .field("subscribers", &subscribers)
            .finish_non_exhaustive()
    }
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `signal`.
    ///
    /// The returned [`Subscription`] owns the registration: disposing or
    /// dropping it removes this handler and no other.
    pub fn subscribe<F>(&self, signal: Signal, handler: F) -> Subscription
    where
        F: Fn(&Message) -> Result<()> + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = SubscriptionId(registry.next_id);
        registry.registrations.push(Registration {
            id,
            signal,
            handler: Rc::new(handler),
        });
        drop(registry);

        tracing::trace!(signal = %signal, subscription = id.0, "subscribed");

        Subscription {
            id,
            signal,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Delivers `message` to every handler currently registered for its signal.
    ///
    /// The handler list is snapshotted before delivery; a handler disposed by
    /// an earlier sibling during the same publish is skipped. A failing or
    /// panicking handler is logged and recorded in the report, and delivery
    /// continues with the next one.
    pub fn publish(&self, message: Message) -> PublishReport {
        let signal = message.signal();
        let handlers: Vec<(SubscriptionId, Handler)> = self
            .registry
            .borrow()
            .registrations
            .iter()
            .filter(|r| r.signal == signal)
            .map(|r| (r.id, Rc::clone(&r.handler)))
            .collect();

        tracing::trace!(signal = %signal, handlers = handlers.len(), "publishing");

        let mut report = PublishReport {
            signal: Some(signal),
            ..PublishReport::default()
        };

        for (id, handler) in handlers {
            if !self.registry.borrow().contains(id) {
                continue;
            }

            let outcome = catch_unwind(AssertUnwindSafe(|| handler(&message)))
                .unwrap_or_else(|_| Err(SiteError::Subscriber("handler panicked".to_string())));

            match outcome {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!(
                        signal = %signal,
                        subscription = id.0,
                        error = %e,
                        "subscriber failed"
                    );
                    report.failed.push(id);
                }
            }
        }

        report
    }

    /// Removes every handler registered for `signal`.
    ///
    /// Outstanding [`Subscription`] handles for that signal become inactive.
    /// Returns the number of handlers removed.
    pub fn unsubscribe_all(&self, signal: Signal) -> usize {
        let mut registry = self.registry.borrow_mut();
        let before = registry.registrations.len();
        registry.registrations.retain(|r| r.signal != signal);
        let removed = before - registry.registrations.len();
        drop(registry);

        tracing::debug!(signal = %signal, removed, "unsubscribed all handlers");
        removed
    }

    /// Number of handlers registered for `signal`.
    #[must_use]
    pub fn subscriber_count(&self, signal: Signal) -> usize {
        self.registry
            .borrow()
            .registrations
            .iter()
            .filter(|r| r.signal == signal)
            .count()
    }
}

/// Ownership of one registered handler.
///
/// Dropping the subscription unsubscribes the handler; [`dispose`] does the
/// same explicitly. Both are no-ops once the handler is gone or the bus has
/// been dropped.
///
/// [`dispose`]: Subscription::dispose
#[must_use = "dropping a Subscription unsubscribes its handler"]
pub struct Subscription {
    id: SubscriptionId,
    signal: Signal,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    #[must_use]
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }

    #[must_use]
    pub const fn signal(&self) -> Signal {
        self.signal
    }

    /// Whether the handler is still registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let active = registry.borrow().contains(self.id);
        active
    }

    /// Unsubscribes the handler.
    pub fn dispose(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let removed = registry.borrow_mut().remove(self.id);
        if removed {
            tracing::trace!(signal = %self.signal, subscription = self.id.0, "unsubscribed");
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("signal", &self.signal)
            .finish_non_exhaustive()
    }
}
