//! Browser location abstraction.
//!
//! The router never touches a browser API directly; it talks to a
//! [`Location`]. A wasm shim implements it over `window.location`, while
//! [`MemoryLocation`] backs headless runs and tests.

use std::cell::RefCell;
use tokio::sync::watch;

/// The subset of the browser location the router depends on.
pub trait Location {
    /// Full location string, including the fragment.
    fn href(&self) -> String;

    /// Current fragment without the leading `#`.
    fn fragment(&self) -> String;

    /// Replaces the fragment. A leading `#` is accepted and ignored.
    fn set_fragment(&self, fragment: &str);

    /// Native change notification, when the platform has one.
    ///
    /// The receiver's value is bumped on every fragment assignment. Returning
    /// `None` leaves the router on polling alone.
    fn changes(&self) -> Option<watch::Receiver<u64>> {
        None
    }
}

/// In-memory location.
///
/// # Example
///
/// ```
/// use vanillabeach::router::{Location, MemoryLocation};
///
/// let location = MemoryLocation::new("http://localhost/");
/// location.set_fragment("#journal/42");
/// assert_eq!(location.fragment(), "journal/42");
/// assert_eq!(location.href(), "http://localhost/#journal/42");
/// ```
#[derive(Debug)]
pub struct MemoryLocation {
    base: String,
    fragment: RefCell<String>,
    notifier: Option<watch::Sender<u64>>,
}

impl MemoryLocation {
    /// Creates a polling-only location with an empty fragment.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            fragment: RefCell::new(String::new()),
            notifier: None,
        }
    }

    /// Creates a location that also publishes change notifications.
    #[must_use]
    pub fn with_notifications(base: impl Into<String>) -> Self {
        let (notifier, _) = watch::channel(0);
        Self {
            notifier: Some(notifier),
            ..Self::new(base)
        }
    }
}

impl Location for MemoryLocation {
    fn href(&self) -> String {
        let fragment = self.fragment.borrow();
        if fragment.is_empty() {
            self.base.clone()
        } else {
            format!("{}#{}", self.base, fragment)
        }
    }

    fn fragment(&self) -> String {
        self.fragment.borrow().clone()
    }

    fn set_fragment(&self, fragment: &str) {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        self.fragment.replace(fragment.to_string());

        if let Some(notifier) = &self.notifier {
            notifier.send_modify(|version| *version += 1);
        }
    }

    fn changes(&self) -> Option<watch::Receiver<u64>> {
        self.notifier.as_ref().map(watch::Sender::subscribe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fragment_keeps_base_href() {
        let location = MemoryLocation::new("http://localhost/");
        assert_eq!(location.href(), "http://localhost/");
        assert_eq!(location.fragment(), "");
    }

    #[test]
    fn polling_only_location_has_no_changes() {
        assert!(MemoryLocation::new("http://localhost/").changes().is_none());
    }

    #[test]
    fn notifies_on_assignment() {
        let location = MemoryLocation::with_notifications("http://localhost/");
        let changes = location.changes().unwrap();
        location.set_fragment("photos");
        assert!(changes.has_changed().unwrap());
        assert_eq!(*changes.borrow(), 1);
    }
}
