//! Previous/next links between journal entries.

use super::{Component, Interaction, Reaction};
use crate::app::ApplicationState;
use crate::bus::Message;
use crate::domain::JournalSummary;
use crate::ui::surface::PaintOp;
use crate::ui::viewmodel::{NavLink, NavigationLinks, View};

/// Click target of the link to the previous entry.
pub const PREVIOUS_JOURNAL: &str = "previous-journal";

/// Click target of the link to the next entry.
pub const NEXT_JOURNAL: &str = "next-journal";

/// Links to the entries around the current one.
///
/// The journal list is walked newest first: "previous" is the entry listed
/// before the current one in that order, "next" the one after it.
#[derive(Debug, Default)]
pub struct JournalNavigation {
    links: Option<NavigationLinks>,
}

impl JournalNavigation {
    pub const ELEMENT: &'static str = "journal-navigation";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the links around `current` in `list`.
    ///
    /// `list` is in served order; it is reversed before the lookup. An entry
    /// missing from the list gets no links.
    #[must_use]
    pub fn links_for(list: &[JournalSummary], current: &str) -> NavigationLinks {
        let newest_first: Vec<&JournalSummary> = list.iter().rev().collect();
        let Some(index) = newest_first.iter().position(|entry| entry.id == current) else {
            return NavigationLinks::default();
        };

        let previous = index
            .checked_sub(1)
            .and_then(|i| newest_first.get(i))
            .map(|entry| NavLink {
                id: entry.id.clone(),
                label: format!("« {}", entry.title),
            });
        let next = newest_first.get(index + 1).map(|entry| NavLink {
            id: entry.id.clone(),
            label: format!("{} »", entry.title),
        });

        NavigationLinks { previous, next }
    }
}

impl Component for JournalNavigation {
    fn element(&self) -> &str {
        Self::ELEMENT
    }

    fn on_attach(&mut self) -> Reaction {
        Reaction::none().publish(Message::JournalNavigationRequested)
    }

    fn on_detach(&mut self) {
        self.links = None;
    }

    fn on_state_changed(&mut self, state: &ApplicationState) -> Reaction {
        let journal = &state.pages.journal;
        let (Some(list), Some(entry)) = (journal.navigation.value(), journal.entry.value()) else {
            return Reaction::none();
        };

        let links = Self::links_for(list, &entry.id);
        if self.links.as_ref() == Some(&links) {
            return Reaction::none();
        }
        self.links = Some(links.clone());

        Reaction::none().paint(PaintOp::render(Self::ELEMENT, View::JournalNavigation(links)))
    }

    fn on_interaction(&mut self, interaction: &Interaction) -> Reaction {
        let Interaction::Click { target } = interaction;
        let Some(links) = &self.links else {
            return Reaction::none();
        };

        let link = match target.as_str() {
            PREVIOUS_JOURNAL => links.previous.as_ref(),
            NEXT_JOURNAL => links.next.as_ref(),
            _ => None,
        };

        match link {
            Some(link) => {
                tracing::debug!(entry = %link.id, target = %target, "journal link clicked");
                Reaction::none().publish(Message::journal_entry(Some(link.id.clone())))
            }
            None => Reaction::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Slice;
    use crate::domain::JournalEntry;

    fn summary(id: &str) -> JournalSummary {
        JournalSummary {
            id: id.to_string(),
            title: format!("T{id}"),
            date: String::new(),
        }
    }

    fn list() -> Vec<JournalSummary> {
        ["1", "2", "3"].into_iter().map(summary).collect()
    }

    fn state_at(current: &str) -> ApplicationState {
        ApplicationState::default().with_journal(|journal| {
            journal.navigation = Slice::populated(list());
            journal.entry = Slice::populated(JournalEntry {
                id: current.to_string(),
                ..JournalEntry::default()
            });
        })
    }

    #[test]
    fn links_walk_the_reversed_list() {
        let links = JournalNavigation::links_for(&list(), "2");
        assert_eq!(links.previous.as_ref().map(|l| l.id.as_str()), Some("3"));
        assert_eq!(links.next.as_ref().map(|l| l.id.as_str()), Some("1"));
        assert_eq!(links.previous.unwrap().label, "« T3");
        assert_eq!(links.next.unwrap().label, "T1 »");
    }

    #[test]
    fn ends_of_the_list_have_one_link() {
        let newest = JournalNavigation::links_for(&list(), "3");
        assert!(newest.previous.is_none());
        assert!(newest.next.is_some());

        let oldest = JournalNavigation::links_for(&list(), "1");
        assert!(oldest.previous.is_some());
        assert!(oldest.next.is_none());

        assert_eq!(
            JournalNavigation::links_for(&list(), "missing"),
            NavigationLinks::default()
        );
    }

    #[test]
    fn requests_list_on_attach() {
        let mut nav = JournalNavigation::new();
        assert!(matches!(
            nav.on_attach().publish.as_slice(),
            [Message::JournalNavigationRequested]
        ));
    }

    #[test]
    fn waits_for_both_slices() {
        let mut nav = JournalNavigation::new();
        let only_list = ApplicationState::default()
            .with_journal(|journal| journal.navigation = Slice::populated(list()));
        assert!(nav.on_state_changed(&only_list).is_empty());
    }

    #[test]
    fn click_requests_linked_entry() {
        let mut nav = JournalNavigation::new();
        let reaction = nav.on_state_changed(&state_at("2"));
        assert_eq!(reaction.paint.len(), 1);

        let reaction = nav.on_interaction(&Interaction::click(NEXT_JOURNAL));
        assert!(matches!(
            reaction.publish.as_slice(),
            [Message::JournalEntryRequested { id: Some(id) }] if id == "1"
        ));

        assert!(nav.on_interaction(&Interaction::click("elsewhere")).is_empty());
    }

    #[test]
    fn missing_link_click_is_ignored() {
        let mut nav = JournalNavigation::new();
        let _ = nav.on_state_changed(&state_at("3"));
        assert!(nav.on_interaction(&Interaction::click(PREVIOUS_JOURNAL)).is_empty());
    }
}
