//! Tests for the viewer state machine.

use super::test_support::{FakeEnvironment, RecordingFetcher, image_set};
use super::{CloseReason, Key, Viewer, ViewerError, ViewerEvent, ViewerState};

fn viewer() -> Viewer<FakeEnvironment, RecordingFetcher> {
    Viewer::new(FakeEnvironment::default(), RecordingFetcher::default())
}

#[test]
fn starts_closed() {
    let v = viewer();
    assert_eq!(*v.state(), ViewerState::Closed);
    assert_eq!(v.current_index(), None);
    assert!(!v.environment().fullscreen);
}

#[test]
fn open_enters_fullscreen_attaches_keys_and_starts_prefetch() {
    let mut v = viewer();
    v.open(image_set(25), 10).unwrap();

    assert!(v.is_open());
    assert_eq!(v.current_index(), Some(10));
    assert_eq!(v.current_path(), Some("img_10.jpg"));
    assert!(v.environment().fullscreen);
    assert!(v.is_fullscreen());
    assert!(v.environment().listeners_attached);
    assert_eq!(v.prefetch().high_water_mark(), Some(24));
}

#[test]
fn open_rejects_empty_set_and_bad_index() {
    let mut v = viewer();
    assert_eq!(v.open(image_set(0), 0), Err(ViewerError::EmptyImageSet));
    assert_eq!(
        v.open(image_set(3), 3),
        Err(ViewerError::IndexOutOfRange { index: 3, len: 3 })
    );
    assert!(!v.is_open());
    assert_eq!(v.environment().fullscreen_requests, 0);
}

#[test]
fn next_wraps_from_last_to_first() {
    let mut v = viewer();
    v.open(image_set(5), 4).unwrap();
    assert_eq!(v.next(), Some(0));
}

#[test]
fn prev_wraps_from_first_to_last() {
    let mut v = viewer();
    v.open(image_set(5), 0).unwrap();
    assert_eq!(v.prev(), Some(4));
}

#[test]
fn single_image_wraps_onto_itself() {
    let mut v = viewer();
    v.open(image_set(1), 0).unwrap();
    assert_eq!(v.next(), Some(0));
    assert_eq!(v.prev(), Some(0));
}

#[test]
fn arrow_keys_navigate() {
    let mut v = viewer();
    v.open(image_set(5), 2).unwrap();
    assert!(v.handle(ViewerEvent::Key(Key::ArrowRight)));
    assert_eq!(v.current_index(), Some(3));
    assert!(v.handle(ViewerEvent::Key(Key::ArrowLeft)));
    assert!(v.handle(ViewerEvent::Key(Key::ArrowLeft)));
    assert_eq!(v.current_index(), Some(1));
    assert!(!v.handle(ViewerEvent::Key(Key::Other("a".to_string()))));
    assert_eq!(v.current_index(), Some(1));
}

#[test]
fn navigation_drives_prefetch() {
    let mut v = viewer();
    v.open(image_set(100), 0).unwrap();
    for _ in 0..9 {
        v.next();
    }
    assert_eq!(v.prefetch().high_water_mark(), Some(39));
}

#[test]
fn escape_closes_and_releases_fullscreen() {
    let mut v = viewer();
    v.open(image_set(5), 0).unwrap();
    assert!(v.handle(ViewerEvent::Key(Key::Escape)));

    assert_eq!(*v.state(), ViewerState::Closed);
    assert!(!v.environment().fullscreen);
    assert!(!v.environment().listeners_attached);
    assert_eq!(v.environment().fullscreen_exits, 1);
}

#[test]
fn dismiss_closes_and_releases_fullscreen() {
    let mut v = viewer();
    v.open(image_set(5), 0).unwrap();
    assert!(v.handle(ViewerEvent::Dismiss));

    assert!(!v.is_open());
    assert!(!v.environment().fullscreen);
    assert_eq!(v.environment().fullscreen_exits, 1);
}

#[test]
fn platform_fullscreen_exit_closes_without_exiting_again() {
    let mut v = viewer();
    v.open(image_set(5), 0).unwrap();
    // The platform already left full screen before telling us
    v.environment_mut().fullscreen = false;
    assert!(v.handle(ViewerEvent::FullscreenExited));

    assert!(!v.is_open());
    assert!(!v.environment().listeners_attached);
    assert_eq!(v.environment().fullscreen_exits, 0);
}

#[test]
fn escape_then_platform_exit_converge_on_one_close() {
    let mut v = viewer();
    v.open(image_set(5), 0).unwrap();
    assert!(v.handle(ViewerEvent::Key(Key::Escape)));
    // Releasing full screen makes the platform report an exit, which must be a no-op
    assert!(!v.handle(ViewerEvent::FullscreenExited));
    assert!(!v.close(CloseReason::Dismissed));
    assert_eq!(v.environment().fullscreen_exits, 1);
}

#[test]
fn events_are_ignored_while_closed() {
    let mut v = viewer();
    assert!(!v.handle(ViewerEvent::Key(Key::ArrowRight)));
    assert!(!v.handle(ViewerEvent::Key(Key::Escape)));
    assert_eq!(v.next(), None);
    assert_eq!(v.prefetch().fetcher().warm_count(), 0);
}

#[test]
fn closing_does_not_trigger_prefetch() {
    let mut v = viewer();
    v.open(image_set(100), 0).unwrap();
    let before = v.prefetch().fetcher().warm_count();
    v.close(CloseReason::Dismissed);
    assert_eq!(v.prefetch().fetcher().warm_count(), before);
}

#[test]
fn reopening_starts_a_fresh_prefetch_session() {
    let mut v = viewer();
    v.open(image_set(100), 0).unwrap();
    v.close(CloseReason::Escape);
    v.open(image_set(100), 50).unwrap();

    assert!(!v.prefetch().is_warmed("img_0.jpg"));
    assert!(v.prefetch().is_warmed("img_50.jpg"));
    assert_eq!(v.environment().fullscreen_requests, 2);
    assert!(v.environment().listeners_attached);
}

#[test]
fn retargeting_an_open_viewer_keeps_one_set_of_listeners() {
    let mut v = viewer();
    v.open(image_set(10), 0).unwrap();
    // FakeEnvironment panics if listeners get attached twice
    v.open(image_set(10), 5).unwrap();
    assert_eq!(v.current_index(), Some(5));
    assert_eq!(v.environment().fullscreen_requests, 1);
}

#[test]
fn fullscreen_follows_the_environment() {
    let mut v = viewer();
    assert!(!v.is_fullscreen());
    v.open(image_set(3), 0).unwrap();
    assert!(v.is_fullscreen());
    v.handle(ViewerEvent::Dismiss);
    assert!(!v.is_fullscreen());
}

#[test]
fn reset_prefetch_closes_and_clears_warmed_images() {
    let mut v = viewer();
    v.open(image_set(30), 0).unwrap();
    v.reset_prefetch();

    assert!(!v.is_open());
    assert!(!v.is_fullscreen());
    assert!(v.prefetch().state().warmed.is_empty());
    assert_eq!(v.prefetch().fetcher().resets.get(), 2);
}
