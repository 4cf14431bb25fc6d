//! Photo albums.
//!
//! Without a category the component shows one cover tile per category, two
//! per row. With a category (taken from the photos route parameter) it shows
//! that category's photos, four per row.

use super::{Component, Reaction};
use crate::app::ApplicationState;
use crate::bus::Message;
use crate::config::SiteConfig;
use crate::domain::PhotoRecord;
use crate::ui::viewmodel::{AlbumView, PhotoTile, View};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::sync::Arc;

/// Characters `encodeURI` leaves alone: unreserved plus URI delimiters.
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b';')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b',')
    .remove(b'#');

/// Characters `encodeURIComponent` leaves alone: unreserved only.
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const COVER_COLUMNS: usize = 2;
const ALBUM_COLUMNS: usize = 4;

/// Category covers or one category's photos.
#[derive(Debug)]
pub struct PhotoAlbum {
    config: Arc<SiteConfig>,
    page_id: String,
    category: Option<String>,
    rendered: Option<View>,
}

impl PhotoAlbum {
    pub const ELEMENT: &'static str = "photos";

    #[must_use]
    pub fn new(config: Arc<SiteConfig>) -> Self {
        let page_id = config.photos_page_id().unwrap_or("photos").to_string();
        Self {
            config,
            page_id,
            category: None,
            rendered: None,
        }
    }

    /// The category currently followed, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Thumbnail URL of a photo, URI-encoded.
    #[must_use]
    pub fn thumbnail_path(&self, category: &str, id: &str) -> String {
        let path = format!("{}/{category}/{id}/{id}_small.jpg", self.config.media.photos);
        utf8_percent_encode(&path, URI_ENCODE_SET).to_string()
    }

    /// Fragment link to a category's album.
    #[must_use]
    pub fn category_link(&self, category: &str) -> String {
        let category = category.to_lowercase();
        format!(
            "#{}/{}",
            self.page_id,
            utf8_percent_encode(&category, COMPONENT_ENCODE_SET)
        )
    }

    fn album_view(&self, photos: &[PhotoRecord]) -> AlbumView {
        let columns = if self.category.is_some() {
            ALBUM_COLUMNS
        } else {
            COVER_COLUMNS
        };

        let rows = photos
            .chunks(columns)
            .map(|row| {
                row.iter()
                    .map(|photo| PhotoTile {
                        name: photo.category.clone(),
                        src: self.thumbnail_path(&photo.category, &photo.id),
                        href: self.category_link(&photo.category),
                    })
                    .collect()
            })
            .collect();

        AlbumView {
            title: self
                .category
                .clone()
                .unwrap_or_else(|| "Albums".to_string()),
            is_album: self.category.is_some(),
            rows,
        }
    }

    /// Follows the route's category while the photos page is selected.
    ///
    /// Returns the request for a newly followed category.
    fn follow_route(&mut self, state: &ApplicationState) -> Option<Message> {
        if state.selected_page() != Some(self.page_id.as_str()) {
            return None;
        }

        let category = state.route_value().map(str::to_string);
        if category == self.category {
            return None;
        }

        tracing::debug!(category = ?category, "photo category changed");
        self.category = category;
        Some(Message::PhotosRequested {
            category: self.category.clone(),
        })
    }

    fn current_view(&self, state: &ApplicationState) -> Option<View> {
        let photos = &state.pages.photos;

        let (records, failure) = match &self.category {
            Some(category) => (
                photos
                    .album
                    .value()
                    .filter(|album| album.is_for(category))
                    .map(|album| album.photos.as_slice()),
                photos.album.is_failed().then(|| photos.album.error.clone()),
            ),
            None => (
                photos.categories.value().map(Vec::as_slice),
                photos
                    .categories
                    .is_failed()
                    .then(|| photos.categories.error.clone()),
            ),
        };

        match (records, failure) {
            (Some(records), _) => Some(View::Photos(self.album_view(records))),
            (None, Some(error)) => Some(View::Unavailable {
                message: error.unwrap_or_else(|| "photos unavailable".to_string()),
            }),
            (None, None) => None,
        }
    }
}

impl Component for PhotoAlbum {
    fn element(&self) -> &str {
        Self::ELEMENT
    }

    fn on_attach(&mut self) -> Reaction {
        Reaction::none().publish(Message::photos(None::<String>))
    }

    fn on_detach(&mut self) {
        self.category = None;
        self.rendered = None;
    }

    fn on_state_changed(&mut self, state: &ApplicationState) -> Reaction {
        let mut reaction = Reaction::none();
        if let Some(request) = self.follow_route(state) {
            reaction = reaction.publish(request);
        }

        let Some(view) = self.current_view(state) else {
            return reaction;
        };
        if self.rendered.as_ref() == Some(&view) {
            return reaction;
        }

        self.rendered = Some(view.clone());
        reaction.fade_to(view)
    }

    fn scrolls_on_show(&self) -> bool {
        true
    }
}
