//! Event bus: named signals with synchronous fan-out.
//!
//! Producers (the router, user-interaction handlers, display components
//! asking for data) and consumers (the store, display components reacting to
//! state) only know each other through the bus.
//!
//! # Modules
//!
//! - [`signal`]: Signal names and typed message payloads
//! - [`event_bus`]: The registry, publish loop and subscription handles

pub mod event_bus;
pub mod signal;

pub use event_bus::{EventBus, PublishReport, Subscription, SubscriptionId};
pub use signal::{Message, Signal};
