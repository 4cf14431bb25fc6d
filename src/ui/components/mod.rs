//! Display components.
//!
//! Every component implements [`Component`]: it reacts to lifecycle hooks,
//! state snapshots and user interactions by returning a [`Reaction`]. It never
//! paints, publishes or sleeps itself; the
//! [`ComponentHost`](crate::runtime::ComponentHost) carries the reaction out.
//!
//! # Components
//!
//! - [`PageFrame`]: Shows its page when that page is selected
//! - [`JournalView`]: The current journal entry
//! - [`JournalNavigation`]: Previous/next links around the current entry
//! - [`PhotoAlbum`]: Category covers or the photos of one category
//! - [`SiteHeader`]: The site title, faded in once
//! - [`NavBar`]: Links to the navigable pages
//! - [`Background`]: The mural, brightened for some pages
//! - [`Title`]: Decorated page title
//!
//! # Example
//!
//! ```
//! use vanillabeach::app::ApplicationState;
//! use vanillabeach::ui::{Component, PageFrame};
//!
//! let mut frame = PageFrame::new("photos");
//! let mut state = ApplicationState::default();
//! state.user.selected_page = Some("photos".to_string());
//!
//! let reaction = frame.on_state_changed(&state);
//! assert!(reaction.transition.is_some());
//! ```

mod background;
mod journal;
mod journal_navigation;
mod nav;
mod page;
mod photos;
mod site_header;
mod title;

pub use background::{Background, BRIGHT_CLASS};
pub use journal::JournalView;
pub use journal_navigation::{JournalNavigation, NEXT_JOURNAL, PREVIOUS_JOURNAL};
pub use nav::NavBar;
pub use page::PageFrame;
pub use photos::PhotoAlbum;
pub use site_header::SiteHeader;
pub use title::Title;

use super::surface::PaintOp;
use super::viewmodel::View;
use crate::app::ApplicationState;
use crate::bus::Message;

/// A user interaction routed to a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// A click on the part of the component tagged `target`.
    Click { target: String },
}

impl Interaction {
    #[must_use]
    pub fn click(target: impl Into<String>) -> Self {
        Self::Click {
            target: target.into(),
        }
    }
}

/// What a component wants done in response to a hook.
#[derive(Debug, Default)]
pub struct Reaction {
    /// Painted immediately, in order.
    pub paint: Vec<PaintOp>,
    /// View swapped in through a fade.
    pub transition: Option<View>,
    /// Published on the bus after painting.
    pub publish: Vec<Message>,
}

impl Reaction {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn paint(mut self, op: PaintOp) -> Self {
        self.paint.push(op);
        self
    }

    #[must_use]
    pub fn fade_to(mut self, view: View) -> Self {
        self.transition = Some(view);
        self
    }

    #[must_use]
    pub fn publish(mut self, message: Message) -> Self {
        self.publish.push(message);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paint.is_empty() && self.transition.is_none() && self.publish.is_empty()
    }
}

/// A display component.
///
/// Hooks run on the event loop thread and must not block. A component that
/// finds the slice it renders missing returns [`Reaction::none`].
pub trait Component {
    /// Name of the element the component paints into.
    fn element(&self) -> &str;

    /// Runs once when the component is attached.
    fn on_attach(&mut self) -> Reaction {
        Reaction::none()
    }

    /// Runs once when the component is detached.
    fn on_detach(&mut self) {}

    /// Runs for every published state snapshot.
    fn on_state_changed(&mut self, state: &ApplicationState) -> Reaction;

    fn on_interaction(&mut self, _interaction: &Interaction) -> Reaction {
        Reaction::none()
    }

    /// Whether the page scrolls to the top when a fade into this component
    /// completes.
    fn scrolls_on_show(&self) -> bool {
        false
    }
}
