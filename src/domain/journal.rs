//! Journal domain records.
//!
//! Journal entries and their summaries are supplied by the data-access
//! collaborator and are read-only from the core's point of view. Field names
//! follow the camelCase JSON emitted by the journal server.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Display format for entry timestamps, e.g. `07:30 PM · 14 March 2021`.
const ENTRY_DATE_FORMAT: &str = "%I:%M %p · %d %B %Y";

/// A single journal entry.
///
/// `date` is the entry timestamp in epoch milliseconds, transported as a
/// string. `entry` holds the body markup and `pic_url` the header image file
/// name relative to the journal media location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JournalEntry {
    pub id: String,
    pub date: String,
    pub title: String,
    pub entry: String,
    pub pic_url: String,
    pub security_clearance: u32,
    pub mind: i32,
    pub body: i32,
    pub soul: i32,
}

impl JournalEntry {
    /// Parses `date` as epoch milliseconds.
    ///
    /// Returns `None` when the server sent something that is not a number.
    #[must_use]
    pub fn timestamp_millis(&self) -> Option<i64> {
        self.date.trim().parse::<i64>().ok()
    }

    /// Formats the entry timestamp for display (UTC).
    ///
    /// # Example
    ///
    /// ```
    /// use vanillabeach::domain::JournalEntry;
    ///
    /// let entry = JournalEntry { date: "0".to_string(), ..Default::default() };
    /// assert_eq!(entry.formatted_date().as_deref(), Some("12:00 AM · 01 January 1970"));
    /// ```
    #[must_use]
    pub fn formatted_date(&self) -> Option<String> {
        let millis = self.timestamp_millis()?;
        let date = DateTime::from_timestamp_millis(millis)?;
        Some(date.format(ENTRY_DATE_FORMAT).to_string())
    }

    /// Projects the entry onto the summary shape used by the entry list.
    #[must_use]
    pub fn summary(&self) -> JournalSummary {
        JournalSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            date: self.date.clone(),
        }
    }
}

/// Summary row of the journal list, used for previous/next navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JournalSummary {
    pub id: String,
    pub title: String,
    pub date: String,
}
