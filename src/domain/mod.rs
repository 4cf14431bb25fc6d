//! Domain layer for the Vanilla Beach client core.
//!
//! Domain records are produced by the data-access collaborator and only ever
//! placed into the application state; the core never validates or rewrites
//! their contents.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`journal`]: Journal entries and list summaries
//! - [`photo`]: Photo records and category albums

pub mod error;
pub mod journal;
pub mod photo;

pub use error::{Result, SiteError};
pub use journal::{JournalEntry, JournalSummary};
pub use photo::{PhotoAlbum, PhotoRecord};
