//! Browsing state: the current listing, thumbnails that failed for it, the last load
//! error, and the viewer opened from it.

use std::collections::HashSet;

use super::prefetch::ImageFetcher;
use super::state::{Viewer, ViewerEnvironment};
use super::{ImageSet, ViewerError};
use crate::client::ApiClient;
use crate::file_system::{DirectoryEntry, DirectoryListing};

/// What activating an entry led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// A directory: load this path next.
    Navigate(String),
    /// An image: the viewer is now open at this index.
    Opened(usize),
    /// Anything else (or an index past the listing).
    Ignored,
}

/// Where a grid cell gets its thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailSource {
    /// Fetch the thumbnail for this path.
    Fetch(String),
    /// A thumbnail for this path already failed in the current listing.
    Placeholder,
    /// Not an image.
    None,
}

/// A listing load that failed, kept so the user can retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    pub path: String,
    pub message: String,
}

pub struct Browser<E: ViewerEnvironment, F: ImageFetcher> {
    listing: Option<DirectoryListing>,
    image_set: ImageSet,
    failed_thumbnails: HashSet<String>,
    load_error: Option<LoadError>,
    viewer: Viewer<E, F>,
}

impl<E: ViewerEnvironment, F: ImageFetcher> Browser<E, F> {
    pub fn new(viewer: Viewer<E, F>) -> Self {
        Self {
            listing: None,
            image_set: ImageSet::default(),
            failed_thumbnails: HashSet::new(),
            load_error: None,
            viewer,
        }
    }

    /// Fetches `path` and shows it, or records the failure for a retry.
    pub async fn load(&mut self, client: &ApiClient, path: &str) {
        match client.list(path).await {
            Ok(listing) => self.show_listing(listing),
            Err(e) => {
                log::warn!("browser: loading {} failed: {}", path, e);
                self.listing_failed(path, e.to_string());
            }
        }
    }

    /// Replaces the current listing. Per-listing state starts over, any open viewer closes
    /// and prefetch forgets the old directory.
    pub fn show_listing(&mut self, listing: DirectoryListing) {
        self.viewer.reset_prefetch();
        self.image_set = ImageSet::from_listing(&listing);
        self.failed_thumbnails.clear();
        self.load_error = None;
        self.listing = Some(listing);
    }

    pub fn listing_failed(&mut self, path: &str, message: String) {
        self.load_error = Some(LoadError {
            path: path.to_string(),
            message,
        });
    }

    /// Path to reload when the user asks to retry, if the last load failed.
    pub fn retry_path(&self) -> Option<&str> {
        self.load_error.as_ref().map(|e| e.path.as_str())
    }

    /// Acts on the entry at `index` of the current listing.
    pub fn activate(&mut self, index: usize) -> Result<Activation, ViewerError> {
        let Some(entry) = self.listing.as_ref().and_then(|l| l.entries.get(index)) else {
            return Ok(Activation::Ignored);
        };
        if entry.is_directory() {
            return Ok(Activation::Navigate(entry.relative_path.clone()));
        }
        if !entry.is_image {
            return Ok(Activation::Ignored);
        }
        let image_index = self
            .image_set
            .index_of(&entry.relative_path)
            .ok_or_else(|| ViewerError::NotAnImage(entry.relative_path.clone()))?;
        self.viewer.open(self.image_set.clone(), image_index)?;
        Ok(Activation::Opened(image_index))
    }

    /// Remembers that `path`'s thumbnail failed, until the listing changes.
    pub fn thumbnail_failed(&mut self, path: &str) {
        self.failed_thumbnails.insert(path.to_string());
    }

    pub fn thumbnail_source(&self, entry: &DirectoryEntry) -> ThumbnailSource {
        if entry.is_directory() || !entry.is_image {
            ThumbnailSource::None
        } else if self.failed_thumbnails.contains(&entry.relative_path) {
            ThumbnailSource::Placeholder
        } else {
            ThumbnailSource::Fetch(entry.relative_path.clone())
        }
    }

    pub fn listing(&self) -> Option<&DirectoryListing> {
        self.listing.as_ref()
    }

    pub fn image_set(&self) -> &ImageSet {
        &self.image_set
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        self.load_error.as_ref()
    }

    pub fn viewer(&self) -> &Viewer<E, F> {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut Viewer<E, F> {
        &mut self.viewer
    }
}
