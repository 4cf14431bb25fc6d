//! Hash-based routing.
//!
//! The router turns the location fragment into a [`PageRoute`] and publishes
//! [`Message::UrlChanged`](crate::bus::Message::UrlChanged) once per distinct
//! location.
//!
//! # Modules
//!
//! - [`route`]: Fragment grammar (parse and build)
//! - [`location`]: Location abstraction and in-memory implementation
//! - [`navigation`]: The router and its watch task

pub mod location;
pub mod navigation;
pub mod route;

pub use location::{Location, MemoryLocation};
pub use navigation::{IntervalId, PollHandle, Router};
pub use route::{build_fragment, parse_route, PageRoute, QueryPair, RouteParam};
