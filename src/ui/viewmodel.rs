//! View model types representing renderable component output.
//!
//! Views are immutable, display-ready values computed by components from an
//! [`ApplicationState`](crate::app::ApplicationState) snapshot. They carry no
//! behaviour; a [`Surface`](super::Surface) turns them into markup, DOM
//! updates or log lines.
//!
//! All URLs in a view are final: media paths are joined and URI-encoded by
//! the component that built the view.

use serde::Serialize;

/// What a component renders into its element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum View {
    /// Nothing to show yet.
    Empty,
    /// A page frame; `visible` when its page is selected.
    Page { page_id: String, visible: bool },
    Journal(EntryView),
    JournalNavigation(NavigationLinks),
    Photos(AlbumView),
    Header { title: String },
    NavBar { items: Vec<NavItem> },
    Background { image: String, bright: bool },
    Title { letters: Vec<TitleLetter> },
    /// Shown in place of content whose fetch failed with nothing cached.
    Unavailable { message: String },
}

/// A rendered journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    pub id: String,
    pub title: String,
    /// Display date, `None` when the record carries no usable timestamp.
    pub date: Option<String>,
    /// Entry body markup, passed through untouched.
    pub body: String,
    pub header_image: String,
}

/// Previous/next links around the current journal entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavigationLinks {
    pub previous: Option<NavLink>,
    pub next: Option<NavLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    /// Entry id requested when the link is clicked.
    pub id: String,
    /// Link text, including its `«`/`»` marker.
    pub label: String,
}

/// A grid of photo tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumView {
    /// `Albums` for the cover grid, otherwise the category name.
    pub title: String,
    /// `true` for a single category's photos, `false` for category covers.
    pub is_album: bool,
    pub rows: Vec<Vec<PhotoTile>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoTile {
    pub name: String,
    pub src: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: String,
    pub href: String,
    pub active: bool,
}

/// One letter of the decorated title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleLetter {
    pub letter: char,
    /// `odd` for even indices, `even` for odd ones, as the stylesheet expects.
    pub class: &'static str,
}
