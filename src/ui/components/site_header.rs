//! Site header.

use super::{Component, Reaction};
use crate::app::ApplicationState;
use crate::ui::viewmodel::View;

/// The site title, faded in once on attach and left alone afterwards.
#[derive(Debug)]
pub struct SiteHeader {
    title: String,
}

impl SiteHeader {
    pub const ELEMENT: &'static str = "site-header";

    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Component for SiteHeader {
    fn element(&self) -> &str {
        Self::ELEMENT
    }

    fn on_attach(&mut self) -> Reaction {
        Reaction::none().fade_to(View::Header {
            title: self.title.clone(),
        })
    }

    fn on_state_changed(&mut self, _state: &ApplicationState) -> Reaction {
        Reaction::none()
    }
}
