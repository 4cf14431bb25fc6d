//! Decorated title.

use super::{Component, Reaction};
use crate::app::ApplicationState;
use crate::ui::surface::PaintOp;
use crate::ui::viewmodel::{TitleLetter, View};

/// A title rendered letter by letter with alternating classes.
#[derive(Debug)]
pub struct Title {
    element: String,
    text: String,
}

impl Title {
    #[must_use]
    pub fn new(element: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            text: text.into(),
        }
    }

    /// Splits the trimmed text into letters; even positions get `odd`.
    #[must_use]
    pub fn letters(&self) -> Vec<TitleLetter> {
        self.text
            .trim()
            .chars()
            .enumerate()
            .map(|(index, letter)| TitleLetter {
                letter,
                class: if index % 2 == 0 { "odd" } else { "even" },
            })
            .collect()
    }
}

impl Component for Title {
    fn element(&self) -> &str {
        &self.element
    }

    fn on_attach(&mut self) -> Reaction {
        Reaction::none().paint(PaintOp::render(
            &self.element,
            View::Title {
                letters: self.letters(),
            },
        ))
    }

    fn on_state_changed(&mut self, _state: &ApplicationState) -> Reaction {
        Reaction::none()
    }
}
