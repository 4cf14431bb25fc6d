//! Navigation and site configuration.
//!
//! The configuration is read-only for the whole core: the router takes the
//! default page from it, the store uses it to recognise the journal page, and
//! display components read page labels, background flags and the shared fade
//! duration from it.
//!
//! # TOML Format
//!
//! ```toml
//! default_page = "journal"
//! conflict_policy = "latest-request-wins"
//! trace_level = "debug"
//!
//! [timing]
//! fade_duration_ms = 500
//! poll_interval_ms = 500
//!
//! [media]
//! journal = "http://localhost:4040/server/journal/media"
//! photos = "http://localhost:4040/server/photos/media"
//! backgrounds = "http://localhost:4040/server/backgrounds"
//!
//! [[pages]]
//! key = "journal"
//! page_id = "journal"
//! label = "Journal"
//! has_bright_background = false
//!
//! [[pages]]
//! key = "photosAndVideos"
//! page_id = "photos"
//! label = "Photos & Videos"
//! ```
//!
//! Every field is optional; missing fields fall back to [`SiteConfig::default`].

use crate::domain::{Result, SiteError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// Page key of the journal page.
pub const JOURNAL_PAGE_KEY: &str = "journal";

/// Page key of the photo albums page.
pub const PHOTOS_PAGE_KEY: &str = "photosAndVideos";

const SERVER_URL: &str = "http://localhost:4040/server";

/// Complete site configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Page id the router falls back to when the fragment is empty.
    pub default_page: String,

    /// Title painted by the site header.
    pub site_title: String,

    /// Navigation pages, in display order.
    pub pages: Vec<PageConfig>,

    pub timing: Timing,

    pub media: MediaUrls,

    /// How the store resolves fetch completions that arrive out of order.
    pub conflict_policy: ConflictPolicy,

    /// Tracing filter directive. Options: `trace`, `debug`, `info`, `warn`,
    /// `error`, or any `EnvFilter` directive. Default: `"info"`
    pub trace_level: Option<String>,
}

/// One navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Stable logical key (`journal`, `photosAndVideos`, ...).
    pub key: String,
    /// Identifier used in the URL fragment.
    pub page_id: String,
    pub label: String,
    #[serde(default)]
    pub has_bright_background: bool,
    #[serde(default = "default_true")]
    pub show_in_navigation: bool,
}

const fn default_true() -> bool {
    true
}

/// Process-wide timing constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Duration of every fade transition, shared by all components.
    pub fade_duration_ms: u64,
    /// Cadence of the router's location check.
    pub poll_interval_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            fade_duration_ms: 500,
            poll_interval_ms: 500,
        }
    }
}

/// Base URLs of media served next to the data endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaUrls {
    pub journal: String,
    pub photos: String,
    pub backgrounds: String,
}

impl Default for MediaUrls {
    fn default() -> Self {
        Self {
            journal: format!("{SERVER_URL}/journal/media"),
            photos: format!("{SERVER_URL}/photos/media"),
            backgrounds: format!("{SERVER_URL}/backgrounds"),
        }
    }
}

/// Resolution of fetch completions for the same slice that finish out of
/// request order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictPolicy {
    /// Apply a completion only if it answers the newest request for its slice.
    #[default]
    LatestRequestWins,
    /// Apply every completion; whichever lands last wins.
    LastCompletionWins,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let page = |key: &str, page_id: &str, label: &str, bright: bool| PageConfig {
            key: key.to_string(),
            page_id: page_id.to_string(),
            label: label.to_string(),
            has_bright_background: bright,
            show_in_navigation: true,
        };

        Self {
            default_page: "journal".to_string(),
            site_title: "Vanilla Beach".to_string(),
            pages: vec![
                page(JOURNAL_PAGE_KEY, "journal", "Journal", false),
                page(PHOTOS_PAGE_KEY, "photos", "Photos & Videos", true),
                page("magazine", "magazine", "Magazine", true),
                page("junk", "junk", "Junk", false),
            ],
            timing: Timing::default(),
            media: MediaUrls::default(),
            conflict_policy: ConflictPolicy::default(),
            trace_level: None,
        }
    }
}

impl SiteConfig {
    /// Parses and validates a TOML configuration document.
    ///
    /// # Example
    ///
    /// ```
    /// use vanillabeach::SiteConfig;
    ///
    /// let config = SiteConfig::from_toml_str("[timing]\nfade_duration_ms = 250\n")?;
    /// assert_eq!(config.timing.fade_duration_ms, 250);
    /// assert_eq!(config.default_page, "journal");
    /// # Ok::<(), vanillabeach::SiteError>(())
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded site configuration");
        Self::from_toml_str(&contents)
    }

    /// Checks cross-field consistency.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Config`] when a page id is empty or duplicated,
    /// the default page is not a configured page id, or a timing value is zero.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for page in &self.pages {
            if page.page_id.is_empty() {
                return Err(SiteError::Config(format!(
                    "page '{}' has an empty page_id",
                    page.key
                )));
            }
            if page.page_id.contains('/') {
                return Err(SiteError::Config(format!(
                    "page_id '{}' must not contain '/'",
                    page.page_id
                )));
            }
            if !seen.insert(page.page_id.as_str()) {
                return Err(SiteError::Config(format!(
                    "duplicate page_id '{}'",
                    page.page_id
                )));
            }
        }

        if self.page_by_id(&self.default_page).is_none() {
            return Err(SiteError::Config(format!(
                "default_page '{}' is not a configured page",
                self.default_page
            )));
        }

        if self.timing.fade_duration_ms == 0 || self.timing.poll_interval_ms == 0 {
            return Err(SiteError::Config(
                "timing values must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Looks up a page by its logical key.
    #[must_use]
    pub fn page(&self, key: &str) -> Option<&PageConfig> {
        self.pages.iter().find(|p| p.key == key)
    }

    /// Looks up a page by the id used in the URL fragment.
    #[must_use]
    pub fn page_by_id(&self, page_id: &str) -> Option<&PageConfig> {
        self.pages.iter().find(|p| p.page_id == page_id)
    }

    /// Fragment id of the journal page, if one is configured.
    #[must_use]
    pub fn journal_page_id(&self) -> Option<&str> {
        self.page(JOURNAL_PAGE_KEY).map(|p| p.page_id.as_str())
    }

    /// Fragment id of the photos page, if one is configured.
    #[must_use]
    pub fn photos_page_id(&self) -> Option<&str> {
        self.page(PHOTOS_PAGE_KEY).map(|p| p.page_id.as_str())
    }

    #[must_use]
    pub const fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.timing.fade_duration_ms)
    }

    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.timing.poll_interval_ms)
    }
}
