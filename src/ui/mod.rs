//! Display layer: components, their views and the surfaces they paint on.
//!
//! Components are plain state machines. They turn lifecycle hooks, state
//! snapshots and interactions into [`Reaction`]s; the runtime's component
//! host paints, fades and publishes on their behalf.
//!
//! # Architecture
//!
//! ```text
//! AppSynced → Component::on_state_changed → Reaction ─┬→ PaintOp → Surface
//!                                                     ├→ fade (FadeTransition) → PaintOp → Surface
//!                                                     └→ Message → EventBus
//! ```
//!
//! # Modules
//!
//! - [`components`]: The site's display components and the [`Component`] trait
//! - [`surface`]: Paint operations and surfaces (recording, tracing)
//! - [`transition`]: Fade transition tickets
//! - [`viewmodel`]: Display-ready view types

pub mod components;
pub mod surface;
pub mod transition;
pub mod viewmodel;

pub use components::{
    Background, Component, Interaction, JournalNavigation, JournalView, NavBar, PageFrame,
    PhotoAlbum, Reaction, SiteHeader, Title, BRIGHT_CLASS, NEXT_JOURNAL, PREVIOUS_JOURNAL,
};
pub use surface::{PaintOp, RecordingSurface, Surface, TracingSurface, SHOW_CLASS};
pub use transition::{FadeTicket, FadeTransition};
pub use viewmodel::View;
