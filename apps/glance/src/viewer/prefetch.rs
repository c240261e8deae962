//! Sliding-window image prefetch.
//!
//! Opening a session warms a batch of images starting at the opened one. Moving within
//! `PREFETCH_TRIGGER_DISTANCE` of the furthest warmed index warms the next batch. Nothing
//! is evicted until the next session or an explicit `reset`.
// TODO: Cap warmed entries (LRU by bytes) for directories with thousands of images.

use std::collections::HashSet;

use super::ImageSet;

/// Images warmed per batch.
pub const PREFETCH_BATCH_SIZE: usize = 20;

/// How close to the high-water mark the cursor must get before the next batch is warmed.
pub const PREFETCH_TRIGGER_DISTANCE: usize = 10;

/// Something that can fetch image bytes in the background.
///
/// `warm` must return immediately; completion is never awaited.
pub trait ImageFetcher {
    /// Starts a background fetch of `path`.
    fn warm(&self, path: &str);

    /// Drops whatever previous sessions cached. In-flight fetches may still complete;
    /// they must not land in the new session's cache.
    fn reset(&self);
}

/// Bookkeeping for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreloadState {
    pub warmed: HashSet<String>,
    /// Highest index warmed so far. `None` before the first batch.
    pub high_water_mark: Option<usize>,
}

pub struct PrefetchScheduler<F: ImageFetcher> {
    fetcher: F,
    image_set: ImageSet,
    state: PreloadState,
}

impl<F: ImageFetcher> PrefetchScheduler<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            image_set: ImageSet::default(),
            state: PreloadState::default(),
        }
    }

    /// Resets all bookkeeping, then warms a batch starting at `initial_index`.
    pub fn start_session(&mut self, image_set: ImageSet, initial_index: usize) {
        self.reset();
        self.image_set = image_set;
        log::debug!(
            "prefetch: new session, images={}, initial_index={}",
            self.image_set.len(),
            initial_index
        );
        self.warm_batch(initial_index);
    }

    /// Forgets the current image set and everything warmed for it, including the fetcher's cache.
    pub fn reset(&mut self) {
        self.state = PreloadState::default();
        self.image_set = ImageSet::default();
        self.fetcher.reset();
    }

    /// Warms the next batch when `new_index` gets close to the high-water mark.
    pub fn on_navigate(&mut self, new_index: usize) {
        let Some(high_water_mark) = self.state.high_water_mark else {
            return;
        };
        let last_index = self.image_set.len().saturating_sub(1);
        if high_water_mark >= last_index {
            return;
        }
        if new_index + PREFETCH_TRIGGER_DISTANCE >= high_water_mark {
            self.warm_batch(high_water_mark + 1);
        }
    }

    /// Warms up to `PREFETCH_BATCH_SIZE` images from `start`, in ascending order.
    fn warm_batch(&mut self, start: usize) {
        let end = (start + PREFETCH_BATCH_SIZE).min(self.image_set.len());
        if start >= end {
            return;
        }
        for index in start..end {
            let Some(path) = self.image_set.get(index) else {
                break;
            };
            // insert() is false for already-warmed paths, which keeps warming idempotent
            if self.state.warmed.insert(path.to_string()) {
                self.fetcher.warm(path);
            }
        }
        let high_water_mark = self.state.high_water_mark.map_or(end - 1, |m| m.max(end - 1));
        self.state.high_water_mark = Some(high_water_mark);
        log::debug!("prefetch: warmed {}..{}, high_water_mark={}", start, end, high_water_mark);
    }

    pub fn state(&self) -> &PreloadState {
        &self.state
    }

    pub fn high_water_mark(&self) -> Option<usize> {
        self.state.high_water_mark
    }

    pub fn is_warmed(&self, path: &str) -> bool {
        self.state.warmed.contains(path)
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}
