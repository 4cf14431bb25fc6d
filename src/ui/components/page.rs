//! Page frame.

use super::{Component, Reaction};
use crate::app::ApplicationState;
use crate::ui::surface::{PaintOp, SHOW_CLASS};
use crate::ui::viewmodel::View;

/// Frame around one page's content. Fades in when its page becomes the
/// selected page and hides as soon as another page is selected.
#[derive(Debug)]
pub struct PageFrame {
    page_id: String,
    element: String,
    visible: Option<bool>,
}

impl PageFrame {
    #[must_use]
    pub fn new(page_id: impl Into<String>) -> Self {
        let page_id = page_id.into();
        Self {
            element: format!("page-{page_id}"),
            page_id,
            visible: None,
        }
    }

    fn view(&self, visible: bool) -> View {
        View::Page {
            page_id: self.page_id.clone(),
            visible,
        }
    }
}

impl Component for PageFrame {
    fn element(&self) -> &str {
        &self.element
    }

    fn on_state_changed(&mut self, state: &ApplicationState) -> Reaction {
        let Some(selected) = state.selected_page() else {
            return Reaction::none();
        };

        let visible = selected == self.page_id;
        if self.visible == Some(visible) {
            return Reaction::none();
        }
        self.visible = Some(visible);

        if visible {
            tracing::trace!(page = %self.page_id, "page shown");
            Reaction::none().fade_to(self.view(true))
        } else {
            Reaction::none()
                .paint(PaintOp::remove_class(&self.element, SHOW_CLASS))
                .paint(PaintOp::render(&self.element, self.view(false)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selecting(page: &str) -> ApplicationState {
        let mut state = ApplicationState::default();
        state.user.selected_page = Some(page.to_string());
        state
    }

    #[test]
    fn no_selection_renders_nothing() {
        let mut frame = PageFrame::new("journal");
        assert!(frame.on_state_changed(&ApplicationState::default()).is_empty());
    }

    #[test]
    fn fades_in_once_when_selected() {
        let mut frame = PageFrame::new("journal");

        let reaction = frame.on_state_changed(&selecting("journal"));
        assert_eq!(
            reaction.transition,
            Some(View::Page {
                page_id: "journal".to_string(),
                visible: true
            })
        );

        assert!(frame.on_state_changed(&selecting("journal")).is_empty());
    }

    #[test]
    fn hides_immediately_when_deselected() {
        let mut frame = PageFrame::new("journal");
        let _ = frame.on_state_changed(&selecting("journal"));

        let reaction = frame.on_state_changed(&selecting("photos"));
        assert!(reaction.transition.is_none());
        assert_eq!(
            reaction.paint.first(),
            Some(&PaintOp::remove_class("page-journal", SHOW_CLASS))
        );
    }
}
