//! Structured logging setup.
//!
//! The core logs through `tracing` macros everywhere: `debug!` for state
//! transitions, `trace!` for per-message dispatch and `warn!` for handler or
//! fetch failures. This module installs the subscriber that prints them.
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in the site configuration
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! Initialize tracing once, early:
//!
//! ```
//! use vanillabeach::observability::init_tracing;
//! use vanillabeach::SiteConfig;
//!
//! let config = SiteConfig::default();
//! init_tracing(&config);
//!
//! tracing::debug!("site initialized");
//! ```
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup

mod init;

pub use init::init_tracing;
