//! Navigation bar.

use super::{Component, Reaction};
use crate::app::ApplicationState;
use crate::config::SiteConfig;
use crate::ui::surface::PaintOp;
use crate::ui::viewmodel::{NavItem, View};
use std::sync::Arc;

/// Links to every page configured with `show_in_navigation`, in declaration
/// order, with the selected page marked active.
#[derive(Debug)]
pub struct NavBar {
    config: Arc<SiteConfig>,
    active: Option<String>,
}

impl NavBar {
    pub const ELEMENT: &'static str = "nav";

    #[must_use]
    pub fn new(config: Arc<SiteConfig>) -> Self {
        Self {
            config,
            active: None,
        }
    }

    fn items(&self) -> Vec<NavItem> {
        self.config
            .pages
            .iter()
            .filter(|page| page.show_in_navigation)
            .map(|page| NavItem {
                label: page.label.clone(),
                href: format!("#{}", page.page_id),
                active: self.active.as_deref() == Some(page.page_id.as_str()),
            })
            .collect()
    }

    fn render(&self) -> Reaction {
        Reaction::none().paint(PaintOp::render(
            Self::ELEMENT,
            View::NavBar {
                items: self.items(),
            },
        ))
    }
}

impl Component for NavBar {
    fn element(&self) -> &str {
        Self::ELEMENT
    }

    fn on_attach(&mut self) -> Reaction {
        self.render()
    }

    fn on_state_changed(&mut self, state: &ApplicationState) -> Reaction {
        let selected = state.selected_page().map(str::to_string);
        if selected.is_none() || selected == self.active {
            return Reaction::none();
        }
        self.active = selected;
        self.render()
    }
}
