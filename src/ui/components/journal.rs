//! Journal entry view.

use super::{Component, Reaction};
use crate::app::ApplicationState;
use crate::bus::Message;
use crate::config::SiteConfig;
use crate::domain::JournalEntry;
use crate::ui::viewmodel::{EntryView, View};
use std::sync::Arc;

/// Shows the current journal entry.
///
/// Requests the most recent entry when attached and fades each newly loaded
/// entry in. A failed fetch with nothing loaded yet renders an unavailable
/// notice instead.
#[derive(Debug)]
pub struct JournalView {
    config: Arc<SiteConfig>,
    shown: Option<Shown>,
}

#[derive(Debug, PartialEq, Eq)]
enum Shown {
    Entry(String),
    Unavailable,
}

impl JournalView {
    pub const ELEMENT: &'static str = "journal";

    #[must_use]
    pub fn new(config: Arc<SiteConfig>) -> Self {
        Self {
            config,
            shown: None,
        }
    }

    fn entry_view(&self, entry: &JournalEntry) -> EntryView {
        EntryView {
            id: entry.id.clone(),
            title: entry.title.clone(),
            date: entry.formatted_date(),
            body: entry.entry.clone(),
            header_image: format!("{}/{}", self.config.media.journal, entry.pic_url),
        }
    }
}

impl Component for JournalView {
    fn element(&self) -> &str {
        Self::ELEMENT
    }

    fn on_attach(&mut self) -> Reaction {
        Reaction::none().publish(Message::journal_entry(None::<String>))
    }

    fn on_detach(&mut self) {
        self.shown = None;
    }

    fn on_state_changed(&mut self, state: &ApplicationState) -> Reaction {
        let slice = &state.pages.journal.entry;

        if let Some(entry) = slice.value() {
            let next = Shown::Entry(entry.id.clone());
            if self.shown.as_ref() == Some(&next) {
                return Reaction::none();
            }
            tracing::debug!(entry = %entry.id, "showing journal entry");
            self.shown = Some(next);
            return Reaction::none().fade_to(View::Journal(self.entry_view(entry)));
        }

        if slice.is_failed() && self.shown.is_none() {
            self.shown = Some(Shown::Unavailable);
            let message = slice
                .error
                .clone()
                .unwrap_or_else(|| "journal unavailable".to_string());
            return Reaction::none().fade_to(View::Unavailable { message });
        }

        Reaction::none()
    }

    fn scrolls_on_show(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Slice;

    fn with_entry(state: &ApplicationState, entry: Slice<JournalEntry>) -> ApplicationState {
        state.with_journal(|journal| journal.entry = entry)
    }

    fn entry(id: &str) -> JournalEntry {
        JournalEntry {
            id: id.to_string(),
            title: format!("Entry {id}"),
            date: "1615750200000".to_string(),
            pic_url: format!("{id}.jpg"),
            ..JournalEntry::default()
        }
    }

    #[test]
    fn requests_latest_entry_on_attach() {
        let mut view = JournalView::new(Arc::new(SiteConfig::default()));
        let reaction = view.on_attach();
        assert!(matches!(
            reaction.publish.as_slice(),
            [Message::JournalEntryRequested { id: None }]
        ));
    }

    #[test]
    fn missing_entry_renders_nothing() {
        let mut view = JournalView::new(Arc::new(SiteConfig::default()));
        assert!(view.on_state_changed(&ApplicationState::default()).is_empty());
    }

    #[test]
    fn fades_in_new_entries_only() {
        let mut view = JournalView::new(Arc::new(SiteConfig::default()));
        let base = ApplicationState::default();
        let state = with_entry(&base, Slice::populated(entry("42")));

        let reaction = view.on_state_changed(&state);
        let Some(View::Journal(shown)) = reaction.transition else {
            panic!("expected a journal view");
        };
        assert_eq!(shown.id, "42");
        assert_eq!(shown.date.as_deref(), Some("07:30 PM · 14 March 2021"));
        assert_eq!(
            shown.header_image,
            "http://localhost:4040/server/journal/media/42.jpg"
        );

        assert!(view.on_state_changed(&state).is_empty());

        let next = with_entry(&state, Slice::populated(entry("43")));
        assert!(view.on_state_changed(&next).transition.is_some());
    }

    #[test]
    fn failure_without_content_shows_notice_once() {
        let mut view = JournalView::new(Arc::new(SiteConfig::default()));
        let base = ApplicationState::default();
        let failed = with_entry(&base, Slice::<JournalEntry>::default().failed("offline"));

        let reaction = view.on_state_changed(&failed);
        assert_eq!(
            reaction.transition,
            Some(View::Unavailable {
                message: "offline".to_string()
            })
        );
        assert!(view.on_state_changed(&failed).is_empty());

        let recovered = with_entry(&failed, Slice::populated(entry("1")));
        assert!(view.on_state_changed(&recovered).transition.is_some());
    }

    #[test]
    fn failure_keeps_the_shown_entry() {
        let mut view = JournalView::new(Arc::new(SiteConfig::default()));
        let base = ApplicationState::default();
        let loaded = with_entry(&base, Slice::populated(entry("1")));
        let _ = view.on_state_changed(&loaded);

        let failed = with_entry(&loaded, loaded.pages.journal.entry.failed("offline"));
        assert!(view.on_state_changed(&failed).is_empty());
    }
}
