//! Viewer side: the full-screen image viewer, its prefetch scheduler, and the browsing
//! state that feeds them.
//!
//! - `Browser` holds the current listing and turns entry activations into navigation
//!   or viewer sessions.
//! - `Viewer` is the Closed/Open state machine. It owns the full-screen capability and
//!   drives the `PrefetchScheduler` on open and on every move.
//! - `PrefetchScheduler` warms a sliding window of image bytes through an `ImageFetcher`.

mod browser;
mod image_set;
mod prefetch;
mod state;

#[cfg(test)]
mod state_test;
#[cfg(test)]
mod test_support;

pub use browser::{Activation, Browser, LoadError, ThumbnailSource};
pub use image_set::ImageSet;
pub use prefetch::{ImageFetcher, PREFETCH_BATCH_SIZE, PREFETCH_TRIGGER_DISTANCE, PrefetchScheduler, PreloadState};
pub use state::{CloseReason, Key, Viewer, ViewerEnvironment, ViewerEvent, ViewerSession, ViewerState};

/// Invalid viewer requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerError {
    EmptyImageSet,
    IndexOutOfRange { index: usize, len: usize },
    NotAnImage(String),
}

impl std::fmt::Display for ViewerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyImageSet => write!(f, "No images to show"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "Image index {} is out of range for {} images", index, len)
            }
            Self::NotAnImage(path) => write!(f, "Not an image: {}", path),
        }
    }
}

impl std::error::Error for ViewerError {}
