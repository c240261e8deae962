//! Viewer state machine: Closed or Open on an image set at some index.
//!
//! Every way out (dismiss, Escape, the platform leaving full screen on its own) goes
//! through `close`, which is a no-op once already Closed.

use super::prefetch::{ImageFetcher, PrefetchScheduler};
use super::{ImageSet, ViewerError};

/// Host capabilities the viewer drives. Full screen is requested on open and released
/// on close; key listeners are live only while Open.
pub trait ViewerEnvironment {
    fn request_fullscreen(&mut self);
    fn exit_fullscreen(&mut self);
    fn is_fullscreen(&self) -> bool;
    fn attach_key_listeners(&mut self);
    fn detach_key_listeners(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Other(String),
}

/// Input the host feeds into the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    Key(Key),
    /// Close button or a click outside the image.
    Dismiss,
    /// The platform left full screen by itself.
    FullscreenExited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Dismissed,
    Escape,
    FullscreenExited,
}

/// An open viewer. `current_index` is always a valid index into `image_set`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerSession {
    image_set: ImageSet,
    current_index: usize,
}

impl ViewerSession {
    pub fn image_set(&self) -> &ImageSet {
        &self.image_set
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_path(&self) -> &str {
        self.image_set.get(self.current_index).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerState {
    Closed,
    Open(ViewerSession),
}

pub struct Viewer<E: ViewerEnvironment, F: ImageFetcher> {
    env: E,
    prefetch: PrefetchScheduler<F>,
    state: ViewerState,
}

impl<E: ViewerEnvironment, F: ImageFetcher> Viewer<E, F> {
    pub fn new(env: E, fetcher: F) -> Self {
        Self {
            env,
            prefetch: PrefetchScheduler::new(fetcher),
            state: ViewerState::Closed,
        }
    }

    /// Opens (or re-targets) the viewer at `index` and starts a fresh prefetch session.
    pub fn open(&mut self, image_set: ImageSet, index: usize) -> Result<(), ViewerError> {
        if image_set.is_empty() {
            return Err(ViewerError::EmptyImageSet);
        }
        if index >= image_set.len() {
            return Err(ViewerError::IndexOutOfRange {
                index,
                len: image_set.len(),
            });
        }

        let was_open = self.is_open();
        self.prefetch.start_session(image_set.clone(), index);
        self.state = ViewerState::Open(ViewerSession {
            image_set,
            current_index: index,
        });

        if !was_open {
            self.env.attach_key_listeners();
        }
        if !self.env.is_fullscreen() {
            self.env.request_fullscreen();
        }
        log::debug!("viewer: open at index {}", index);
        Ok(())
    }

    /// Moves to the next image, wrapping to the first. Returns the new index.
    pub fn next(&mut self) -> Option<usize> {
        self.step(true)
    }

    /// Moves to the previous image, wrapping to the last. Returns the new index.
    pub fn prev(&mut self) -> Option<usize> {
        self.step(false)
    }

    fn step(&mut self, forward: bool) -> Option<usize> {
        let ViewerState::Open(session) = &mut self.state else {
            return None;
        };
        let len = session.image_set.len();
        session.current_index = if forward {
            (session.current_index + 1) % len
        } else {
            (session.current_index + len - 1) % len
        };
        let index = session.current_index;
        self.prefetch.on_navigate(index);
        Some(index)
    }

    /// Feeds a host event. Returns whether the viewer acted on it.
    pub fn handle(&mut self, event: ViewerEvent) -> bool {
        if !self.is_open() {
            return false;
        }
        match event {
            ViewerEvent::Key(Key::ArrowRight) => self.next().is_some(),
            ViewerEvent::Key(Key::ArrowLeft) => self.prev().is_some(),
            ViewerEvent::Key(Key::Escape) => self.close(CloseReason::Escape),
            ViewerEvent::Key(Key::Other(_)) => false,
            ViewerEvent::Dismiss => self.close(CloseReason::Dismissed),
            ViewerEvent::FullscreenExited => self.close(CloseReason::FullscreenExited),
        }
    }

    /// Closes the viewer. Returns false if it was already closed.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        if !self.is_open() {
            return false;
        }
        self.state = ViewerState::Closed;
        self.env.detach_key_listeners();
        if self.env.is_fullscreen() {
            self.env.exit_fullscreen();
        }
        log::debug!("viewer: closed ({:?})", reason);
        true
    }

    /// Drops prefetch state for the previous image set. Closes first if still open.
    pub fn reset_prefetch(&mut self) {
        self.close(CloseReason::Dismissed);
        self.prefetch.reset();
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ViewerState::Open(_))
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn current_index(&self) -> Option<usize> {
        match &self.state {
            ViewerState::Open(session) => Some(session.current_index),
            ViewerState::Closed => None,
        }
    }

    pub fn current_path(&self) -> Option<&str> {
        match &self.state {
            ViewerState::Open(session) => Some(session.current_path()),
            ViewerState::Closed => None,
        }
    }

    /// Whether the host is currently in full screen. The environment owns this flag.
    pub fn is_fullscreen(&self) -> bool {
        self.env.is_fullscreen()
    }

    pub fn prefetch(&self) -> &PrefetchScheduler<F> {
        &self.prefetch
    }

    pub fn environment(&self) -> &E {
        &self.env
    }

    pub fn environment_mut(&mut self) -> &mut E {
        &mut self.env
    }
}
