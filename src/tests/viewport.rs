use super::Viewport;
use crate::navigator::ScrollHost;
use std::cell::RefCell;
use std::rc::Rc;

fn recorder(viewport: &Viewport) -> (Rc<RefCell<Vec<usize>>>, super::ScrollSubscription) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let subscription = viewport.subscribe(move |offset| sink.borrow_mut().push(offset));
    (seen, subscription)
}

#[test]
fn test_scroll_is_clamped_to_content() {
    let mut viewport = Viewport::new(50, 10, 4);

    viewport.scroll_by(-5);
    assert_eq!(viewport.offset(), 0);

    viewport.scroll_by(200);
    assert_eq!(viewport.offset(), 49);
    assert_eq!(viewport.max_offset(), 49);
}

#[test]
fn test_listeners_see_every_offset_change() {
    let mut viewport = Viewport::new(100, 10, 4);
    let (seen, _subscription) = recorder(&viewport);

    viewport.scroll_by(3);
    viewport.scroll_by(0);
    viewport.scroll_to(10);

    assert_eq!(*seen.borrow(), vec![3, 10]);
}

#[test]
fn test_smooth_scroll_returns_immediately_and_converges() {
    let mut viewport = Viewport::new(200, 10, 4);
    let (seen, _subscription) = recorder(&viewport);

    viewport.smooth_scroll_to(100);
    assert_eq!(viewport.offset(), 0);
    assert!(viewport.is_animating());

    let mut ticks = 0;
    while viewport.tick() {
        ticks += 1;
        assert!(ticks < 100, "animation did not converge");
    }

    assert_eq!(viewport.offset(), 100);
    assert!(!viewport.is_animating());
    assert!(ticks > 1);
    assert_eq!(seen.borrow().last(), Some(&100));
    let steps = seen.borrow();
    assert!(steps.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_smooth_scroll_upwards() {
    let mut viewport = Viewport::new(200, 10, 2);
    viewport.scroll_to(80);

    viewport.smooth_scroll_to(20);
    while viewport.tick() {}

    assert_eq!(viewport.offset(), 20);
}

#[test]
fn test_smoothing_of_one_finishes_in_one_tick() {
    let mut viewport = Viewport::new(200, 10, 1);

    viewport.smooth_scroll_to(42);

    assert!(viewport.tick());
    assert_eq!(viewport.offset(), 42);
    assert!(!viewport.tick());
}

#[test]
fn test_manual_scroll_cancels_animation() {
    let mut viewport = Viewport::new(200, 10, 4);

    viewport.smooth_scroll_to(150);
    viewport.tick();
    viewport.scroll_by(1);

    assert!(!viewport.is_animating());
    assert!(!viewport.tick());
}

#[test]
fn test_dropping_subscription_removes_listener() {
    let mut viewport = Viewport::new(100, 10, 4);
    let (seen, subscription) = recorder(&viewport);
    assert_eq!(viewport.listener_count(), 1);

    drop(subscription);
    viewport.scroll_by(5);

    assert_eq!(viewport.listener_count(), 0);
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_unsubscribe_is_idempotent() {
    let viewport = Viewport::new(100, 10, 4);
    let (_seen, mut subscription) = recorder(&viewport);
    let (_other, _keep) = recorder(&viewport);

    subscription.unsubscribe();
    subscription.unsubscribe();
    drop(subscription);

    assert_eq!(viewport.listener_count(), 1);
}

#[test]
fn test_subscription_outliving_viewport_is_harmless() {
    let viewport = Viewport::new(100, 10, 4);
    let (_seen, subscription) = recorder(&viewport);

    drop(viewport);
    drop(subscription);
}

#[test]
fn test_shrinking_content_clamps_offset() {
    let mut viewport = Viewport::new(100, 10, 4);
    viewport.scroll_to(90);

    viewport.set_content_len(40);

    assert_eq!(viewport.offset(), 39);
}
