//! Error types for the Vanilla Beach client core.
//!
//! This module defines the centralized error type [`SiteError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for site operations.
///
/// Consolidates every failure the core can observe: data-access failures
/// reported by the fetch collaborator, configuration problems, and subscriber
/// failures raised inside bus handlers. Variants wrapping errors from external
/// crates use `#[from]` for automatic conversion.
///
/// # Examples
///
/// ```
/// use vanillabeach::SiteError;
///
/// fn load_entry(id: &str) -> Result<(), SiteError> {
///     Err(SiteError::NotFound(format!("journal entry {id}")))
/// }
///
/// assert!(load_entry("42").is_err());
/// ```
#[derive(Debug, Error)]
pub enum SiteError {
    /// A data-access call failed.
    ///
    /// Raised by the data-access collaborator when a remote resource could not
    /// be fetched or decoded. The store turns it into a failed slice.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when the navigation configuration references unknown pages or
    /// carries unusable timing values.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A bus subscriber failed while handling a message.
    #[error("Subscriber error: {0}")]
    Subscriber(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON fixture or payload could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A specialized `Result` type for site operations.
pub type Result<T> = std::result::Result<T, SiteError>;
