//! Background mural.

use super::{Component, Reaction};
use crate::app::ApplicationState;
use crate::config::SiteConfig;
use crate::ui::surface::PaintOp;
use crate::ui::viewmodel::View;
use std::sync::Arc;

/// Class set on the mural while a bright page is selected.
pub const BRIGHT_CLASS: &str = "bright";

/// The mural behind every page.
#[derive(Debug)]
pub struct Background {
    config: Arc<SiteConfig>,
    bright: Option<bool>,
}

impl Background {
    pub const ELEMENT: &'static str = "background";

    #[must_use]
    pub fn new(config: Arc<SiteConfig>) -> Self {
        Self {
            config,
            bright: None,
        }
    }
}

impl Component for Background {
    fn element(&self) -> &str {
        Self::ELEMENT
    }

    fn on_attach(&mut self) -> Reaction {
        Reaction::none().paint(PaintOp::render(
            Self::ELEMENT,
            View::Background {
                image: format!("{}/mural.jpg", self.config.media.backgrounds),
                bright: false,
            },
        ))
    }

    fn on_state_changed(&mut self, state: &ApplicationState) -> Reaction {
        let Some(selected) = state.selected_page() else {
            return Reaction::none();
        };

        let bright = self
            .config
            .page_by_id(selected)
            .is_some_and(|page| page.has_bright_background);
        if self.bright == Some(bright) {
            return Reaction::none();
        }
        self.bright = Some(bright);

        let op = if bright {
            PaintOp::add_class(Self::ELEMENT, BRIGHT_CLASS)
        } else {
            PaintOp::remove_class(Self::ELEMENT, BRIGHT_CLASS)
        };
        Reaction::none().paint(op)
    }
}
