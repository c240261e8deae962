//! Recording fakes for the viewer's capability traits.

use std::cell::{Cell, RefCell};

use super::{ImageFetcher, ImageSet, ViewerEnvironment};

/// Records every warm request in issue order.
#[derive(Default)]
pub(super) struct RecordingFetcher {
    pub warmed: RefCell<Vec<String>>,
    pub resets: Cell<usize>,
}

impl ImageFetcher for RecordingFetcher {
    fn warm(&self, path: &str) {
        self.warmed.borrow_mut().push(path.to_string());
    }

    fn reset(&self) {
        self.resets.set(self.resets.get() + 1);
    }
}

impl RecordingFetcher {
    pub fn warm_count(&self) -> usize {
        self.warmed.borrow().len()
    }
}

#[derive(Debug, Default)]
pub(super) struct FakeEnvironment {
    pub fullscreen: bool,
    pub listeners_attached: bool,
    pub fullscreen_requests: usize,
    pub fullscreen_exits: usize,
}

impl ViewerEnvironment for FakeEnvironment {
    fn request_fullscreen(&mut self) {
        self.fullscreen_requests += 1;
        self.fullscreen = true;
    }

    fn exit_fullscreen(&mut self) {
        self.fullscreen_exits += 1;
        self.fullscreen = false;
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn attach_key_listeners(&mut self) {
        assert!(!self.listeners_attached, "key listeners attached twice");
        self.listeners_attached = true;
    }

    fn detach_key_listeners(&mut self) {
        self.listeners_attached = false;
    }
}

/// An image set of `count` paths named `img_0.jpg`, `img_1.jpg`, ...
pub(super) fn image_set(count: usize) -> ImageSet {
    (0..count).map(|i| format!("img_{}.jpg", i)).collect::<Vec<_>>().into()
}
