use instant::Instant;
use std::time::Duration;
use vending_core::constants::{NOTIFICATION_HOLD, NOTIFICATION_TEXT};
use vending_core::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn default_banner_text_and_hold() {
    let n = Notification::default();
    assert_eq!(n.text(), NOTIFICATION_TEXT);
    assert_eq!(n.hold(), NOTIFICATION_HOLD);
    assert_eq!(NOTIFICATION_TEXT, "Enjoy your soda!");
}

#[test]
fn idle_banner_reports_nothing() {
    let mut n = Notification::default();
    let t0 = Instant::now();
    assert!(!n.is_visible(t0));
    assert_eq!(n.poll(t0), None);
    assert_eq!(n.poll(t0 + ms(5000)), None);
}

#[test]
fn trigger_shows_then_hides_after_hold() {
    let mut n = Notification::new("hello", ms(1500));
    let t0 = Instant::now();
    n.trigger(t0);
    assert!(n.is_visible(t0));
    assert_eq!(n.poll(t0), Some(NotificationChange::Show));
    assert_eq!(n.poll(t0 + ms(1499)), None);
    assert_eq!(n.poll(t0 + ms(1500)), Some(NotificationChange::Hide));
    assert_eq!(n.poll(t0 + ms(1600)), None);
    assert!(!n.is_visible(t0 + ms(1600)));
}

#[test]
fn retrigger_replaces_deadline() {
    let mut n = Notification::new("hello", ms(1500));
    let t0 = Instant::now();
    n.trigger(t0);
    assert_eq!(n.poll(t0), Some(NotificationChange::Show));
    n.trigger(t0 + ms(1000));
    // Already showing: no second Show
    assert_eq!(n.poll(t0 + ms(1000)), None);
    assert_eq!(n.poll(t0 + ms(2000)), None);
    assert_eq!(n.poll(t0 + ms(2500)), Some(NotificationChange::Hide));
}

#[test]
fn missed_frames_still_announce_the_trigger() {
    let mut n = Notification::new("hello", ms(100));
    let t0 = Instant::now();
    n.trigger(t0);
    // First poll happens after the hold already elapsed
    assert_eq!(n.poll(t0 + ms(500)), Some(NotificationChange::Show));
    assert_eq!(n.poll(t0 + ms(516)), Some(NotificationChange::Hide));
}

#[test]
fn trigger_after_hide_shows_again() {
    let mut n = Notification::new("hello", ms(100));
    let t0 = Instant::now();
    n.trigger(t0);
    n.poll(t0);
    assert_eq!(n.poll(t0 + ms(200)), Some(NotificationChange::Hide));
    n.trigger(t0 + ms(300));
    assert_eq!(n.poll(t0 + ms(300)), Some(NotificationChange::Show));
}
