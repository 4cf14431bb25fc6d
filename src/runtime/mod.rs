//! Single-threaded runtime wiring.
//!
//! The core runs on a tokio current-thread runtime inside a
//! `tokio::task::LocalSet`: fetches, fade timers and the router's watch task
//! are `spawn_local` tasks sharing `Rc` state with the bus handlers.
//!
//! # Modules
//!
//! - [`host`]: Attaches components and carries out their reactions
//! - [`site`]: Assembles the bus, store, data source, router and components

pub mod host;
pub mod site;

pub use host::{ComponentHost, Mounted};
pub use site::Site;
