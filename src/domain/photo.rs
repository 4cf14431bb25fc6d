//! Photo domain records.

use serde::{Deserialize, Serialize};

/// A single photo as delivered by the photo server.
///
/// Photos are grouped by `category`; the category cover list is made of one
/// record per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhotoRecord {
    pub id: String,
    pub date: String,
    pub title: String,
    pub entry: String,
    pub comment: String,
    pub category: String,
    pub filename: String,
    pub legacy_id: String,
    pub security_clearance: u32,
    pub status: String,
}

/// The photos of one category, as held in the album slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoAlbum {
    /// Category the album was requested for.
    pub category: String,
    pub photos: Vec<PhotoRecord>,
}

impl PhotoAlbum {
    /// Whether this album belongs to `category`, ignoring ASCII case.
    ///
    /// Category links are lower-cased while records keep their display
    /// casing, so comparisons must not be case sensitive.
    #[must_use]
    pub fn is_for(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category)
    }
}
