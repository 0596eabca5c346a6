use std::time::Duration;

use ejection_lens::playback::{
    DEFAULT_BASE_TICK_PERIOD, PlaybackState, TickOutcome, TimeCursor,
};
use proptest::prelude::*;

fn cursor(samples: usize) -> TimeCursor {
    TimeCursor::new(samples, DEFAULT_BASE_TICK_PERIOD).expect("cursor")
}

#[test]
fn new_cursor_starts_paused_at_zero() {
    let cursor = cursor(5);
    assert_eq!(cursor.index(), 0);
    assert_eq!(cursor.last_index(), 4);
    assert_eq!(cursor.state(), PlaybackState::Paused);
    assert_eq!(cursor.tick_period(), Duration::from_millis(100));
}

#[test]
fn playback_advances_then_pauses_on_last_sample() {
    let mut cursor = cursor(4);
    assert!(cursor.play());

    assert_eq!(cursor.tick(), TickOutcome::Advanced(1));
    assert_eq!(cursor.tick(), TickOutcome::Advanced(2));
    assert_eq!(cursor.tick(), TickOutcome::Advanced(3));
    assert!(cursor.is_playing());

    assert_eq!(cursor.tick(), TickOutcome::ReachedEnd);
    assert_eq!(cursor.index(), 3);
    assert_eq!(cursor.state(), PlaybackState::Paused);
    assert_eq!(cursor.tick(), TickOutcome::Idle);
}

#[test]
fn play_is_idempotent_and_refused_at_end() {
    let mut cursor = cursor(3);
    assert!(cursor.play());
    assert!(!cursor.play());
    assert!(cursor.pause());
    assert!(!cursor.pause());

    cursor.seek_index(2);
    assert!(!cursor.play());
    assert_eq!(cursor.state(), PlaybackState::Paused);
}

#[test]
fn seek_clamps_out_of_range_requests() {
    let mut cursor = cursor(10);
    assert_eq!(cursor.seek(-5.0).expect("seek"), 0);
    assert_eq!(cursor.seek(1.0e12).expect("seek"), 9);
    assert_eq!(cursor.seek(4.0).expect("seek"), 4);
    assert_eq!(cursor.seek_index(usize::MAX), 9);
}

#[test]
fn seek_always_leaves_cursor_paused() {
    let mut cursor = cursor(10);
    cursor.play();
    cursor.tick();

    assert_eq!(cursor.seek(6.0).expect("seek"), 6);
    assert_eq!(cursor.state(), PlaybackState::Paused);
    assert_eq!(cursor.tick(), TickOutcome::Idle);
}

#[test]
fn tick_period_scales_inversely_with_speed() {
    let mut cursor = cursor(10);
    cursor.set_speed(0.5).expect("half speed");
    assert_eq!(cursor.tick_period(), Duration::from_millis(200));
    cursor.set_speed(10.0).expect("ten times");
    assert_eq!(cursor.tick_period(), Duration::from_millis(10));
    assert!(cursor.set_speed(0.0).is_err());
    assert_eq!(cursor.speed_factor(), 10.0);
}

#[derive(Debug, Clone)]
enum Control {
    Play,
    Pause,
    Tick,
    Seek(f64),
    Speed(f64),
}

fn control_strategy() -> impl Strategy<Value = Control> {
    prop_oneof![
        1 => Just(Control::Play),
        1 => Just(Control::Pause),
        4 => Just(Control::Tick),
        1 => (-50i32..250).prop_map(|index| Control::Seek(f64::from(index))),
        1 => (0.1f64..8.0).prop_map(Control::Speed),
    ]
}

proptest! {
    #[test]
    fn index_stays_in_range_under_any_control_sequence(
        samples in 1usize..200,
        controls in prop::collection::vec(control_strategy(), 0..256),
    ) {
        let mut cursor = cursor(samples);
        for control in controls {
            let before = cursor.index();
            match control {
                Control::Play => {
                    cursor.play();
                }
                Control::Pause => {
                    cursor.pause();
                    prop_assert_eq!(cursor.index(), before);
                }
                Control::Tick => match cursor.tick() {
                    TickOutcome::Advanced(index) => {
                        prop_assert_eq!(index, before + 1);
                    }
                    TickOutcome::ReachedEnd => {
                        prop_assert_eq!(cursor.index(), samples - 1);
                        prop_assert!(!cursor.is_playing());
                    }
                    TickOutcome::Idle => {
                        prop_assert_eq!(cursor.index(), before);
                    }
                },
                Control::Seek(index) => {
                    cursor.seek(index).expect("integral seek");
                    prop_assert!(!cursor.is_playing());
                }
                Control::Speed(factor) => {
                    let playing = cursor.is_playing();
                    cursor.set_speed(factor).expect("positive speed");
                    prop_assert_eq!(cursor.index(), before);
                    prop_assert_eq!(cursor.is_playing(), playing);
                }
            }
            prop_assert!(cursor.index() < samples);
        }
    }
}
