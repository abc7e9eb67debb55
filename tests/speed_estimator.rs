use std::time::Duration;
use wpm_overlay::key_monitor::KeyActivity;
use wpm_overlay::speed::{words_per_minute, SpeedEstimator, HISTORY_CAPACITY};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn wpm_is_floor_of_words_over_minutes() {
    let cases = [
        (5u64, 30_000u64, 10u32),
        (0, 1_000, 0),
        (17, 7_300, 139),
        (120, 60_000, 120),
        (1, 250, 240),
        (999, 600_000, 99),
        (7, 40_000, 10),
        (3, 59_999, 3),
    ];
    for (words, elapsed_ms, expected) in cases {
        assert_eq!(
            words_per_minute(words, ms(elapsed_ms)),
            expected,
            "words={words} elapsed={elapsed_ms}ms"
        );
    }
}

#[test]
fn four_seconds_without_keys_reports_zero_and_resets() {
    let activity = KeyActivity::new();
    let mut estimator = SpeedEstimator::new(Duration::ZERO);
    for t in 1..=10u64 {
        activity.record_key_at(true, ms(t * 500));
    }
    let busy = estimator.tick(&activity, ms(5_000));
    assert_eq!(busy.wpm, 120);

    let idle = estimator.tick(&activity, ms(9_000));
    assert_eq!(idle.wpm, 0);
    assert!(idle.idle_reset);
    assert_eq!(activity.words(), 0);
    assert_eq!(estimator.window_start(), ms(9_000));

    // Typing again measures from the reset point.
    activity.record_key_at(true, ms(9_500));
    activity.record_key_at(true, ms(11_000));
    let resumed = estimator.tick(&activity, ms(12_000));
    assert_eq!(resumed.wpm, 40);
}

#[test]
fn sixty_one_ticks_keep_the_latest_sixty() {
    let activity = KeyActivity::new();
    let mut estimator = SpeedEstimator::new(Duration::ZERO);
    for t in 1..=61u64 {
        // t words during second t: cumulative t(t+1)/2 words over t seconds.
        for _ in 0..t {
            activity.record_key_at(true, Duration::from_secs(t));
        }
        estimator.tick(&activity, Duration::from_secs(t));
        assert!(estimator.history().len() <= HISTORY_CAPACITY);
    }
    let history = estimator.history().to_vec();
    assert_eq!(history.len(), HISTORY_CAPACITY);
    assert_eq!(history[0], 90);
    assert_eq!(history[59], 1860);
    assert!(!history.contains(&60));
}

#[test]
fn stats_track_average_and_max() {
    let activity = KeyActivity::new();
    let mut estimator = SpeedEstimator::new(Duration::ZERO);

    activity.record_key_at(true, ms(500));
    estimator.tick(&activity, ms(1_000)); // 60
    estimator.tick(&activity, ms(2_000)); // 30
    estimator.tick(&activity, ms(5_000)); // idle -> 0

    let stats = estimator.stats();
    assert_eq!(stats.max_speed, 60);
    assert!((stats.average_speed - 30.0).abs() < f64::EPSILON);

    activity.record_key_at(true, ms(5_500));
    estimator.tick(&activity, ms(6_000)); // 1 word in 1s
    assert_eq!(estimator.stats().max_speed, 60);
}
