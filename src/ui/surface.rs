//! Paint surfaces.
//!
//! Components never touch a document. They describe changes as [`PaintOp`]s
//! and the host forwards them to a [`Surface`]. In a browser the surface is a
//! DOM shim; headless runs use [`TracingSurface`], and tests use
//! [`RecordingSurface`] to assert on what was painted and when.

use super::viewmodel::View;
use std::cell::RefCell;
use std::collections::HashSet;
use tokio::time::Instant;

/// CSS class toggled by fade transitions.
pub const SHOW_CLASS: &str = "show";

/// One visual change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaintOp {
    AddClass { element: String, class: String },
    RemoveClass { element: String, class: String },
    /// Replaces the content of `element` with `view`.
    Render { element: String, view: View },
    ScrollToTop,
}

impl PaintOp {
    #[must_use]
    pub fn add_class(element: &str, class: &str) -> Self {
        Self::AddClass {
            element: element.to_string(),
            class: class.to_string(),
        }
    }

    #[must_use]
    pub fn remove_class(element: &str, class: &str) -> Self {
        Self::RemoveClass {
            element: element.to_string(),
            class: class.to_string(),
        }
    }

    #[must_use]
    pub fn render(element: &str, view: View) -> Self {
        Self::Render {
            element: element.to_string(),
            view,
        }
    }

    /// Element the op applies to, `None` for document-wide ops.
    #[must_use]
    pub fn element(&self) -> Option<&str> {
        match self {
            Self::AddClass { element, .. }
            | Self::RemoveClass { element, .. }
            | Self::Render { element, .. } => Some(element),
            Self::ScrollToTop => None,
        }
    }
}

/// Receives paint operations.
pub trait Surface {
    fn paint(&self, op: PaintOp);
}

/// Logs every operation at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSurface;

impl Surface for TracingSurface {
    fn paint(&self, op: PaintOp) {
        match &op {
            PaintOp::AddClass { element, class } => {
                tracing::debug!(element = %element, class = %class, "add class");
            }
            PaintOp::RemoveClass { element, class } => {
                tracing::debug!(element = %element, class = %class, "remove class");
            }
            PaintOp::Render { element, view } => {
                tracing::debug!(element = %element, view = ?view, "render");
            }
            PaintOp::ScrollToTop => tracing::debug!("scroll to top"),
        }
    }
}

/// Keeps every operation together with the tokio instant it was painted at.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: RefCell<Vec<(Instant, PaintOp)>>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded op, oldest first.
    #[must_use]
    pub fn ops(&self) -> Vec<(Instant, PaintOp)> {
        self.ops.borrow().clone()
    }

    /// Ops painted on `element`, oldest first.
    #[must_use]
    pub fn ops_for(&self, element: &str) -> Vec<(Instant, PaintOp)> {
        self.ops
            .borrow()
            .iter()
            .filter(|(_, op)| op.element() == Some(element))
            .cloned()
            .collect()
    }

    /// The last view rendered into `element`.
    #[must_use]
    pub fn last_view(&self, element: &str) -> Option<View> {
        self.ops.borrow().iter().rev().find_map(|(_, op)| match op {
            PaintOp::Render { element: target, view } if target == element => Some(view.clone()),
            _ => None,
        })
    }

    /// Classes currently set on `element`, replayed from the recorded ops.
    #[must_use]
    pub fn classes(&self, element: &str) -> HashSet<String> {
        let mut classes = HashSet::new();
        for (_, op) in self.ops.borrow().iter() {
            match op {
                PaintOp::AddClass { element: target, class } if target == element => {
                    classes.insert(class.clone());
                }
                PaintOp::RemoveClass { element: target, class } if target == element => {
                    classes.remove(class);
                }
                _ => {}
            }
        }
        classes
    }

    #[must_use]
    pub fn has_class(&self, element: &str, class: &str) -> bool {
        self.classes(element).contains(class)
    }

    pub fn clear(&self) {
        self.ops.borrow_mut().clear();
    }
}

impl Surface for RecordingSurface {
    fn paint(&self, op: PaintOp) {
        self.ops.borrow_mut().push((Instant::now(), op));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_class_changes() {
        let surface = RecordingSurface::new();
        surface.paint(PaintOp::add_class("journal", SHOW_CLASS));
        surface.paint(PaintOp::add_class("journal", "bright"));
        surface.paint(PaintOp::remove_class("journal", SHOW_CLASS));
        surface.paint(PaintOp::add_class("photos", SHOW_CLASS));

        assert!(!surface.has_class("journal", SHOW_CLASS));
        assert!(surface.has_class("journal", "bright"));
        assert!(surface.has_class("photos", SHOW_CLASS));
    }

    #[test]
    fn filters_by_element() {
        let surface = RecordingSurface::new();
        surface.paint(PaintOp::render("journal", View::Empty));
        surface.paint(PaintOp::ScrollToTop);
        surface.paint(PaintOp::render("photos", View::Empty));

        assert_eq!(surface.ops().len(), 3);
        assert_eq!(surface.ops_for("journal").len(), 1);
        assert_eq!(surface.last_view("photos"), Some(View::Empty));
        assert_eq!(surface.last_view("nav"), None);
    }
}
