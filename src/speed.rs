use crate::key_monitor::KeyActivity;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Number of samples kept, one per tick.
pub const HISTORY_CAPACITY: usize = 60;
/// Inactivity after which the measurement window is abandoned.
pub const IDLE_RESET: Duration = Duration::from_secs(3);
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Words per minute for `words` typed over `elapsed`, rounded down.
/// Zero elapsed time gives 0.
pub fn words_per_minute(words: u64, elapsed: Duration) -> u32 {
    let millis = elapsed.as_millis();
    if millis == 0 {
        return 0;
    }
    let wpm = (words as u128 * 60_000) / millis;
    wpm.min(u32::MAX as u128) as u32
}

/// Bounded FIFO of WPM samples.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleHistory {
    samples: VecDeque<u32>,
    capacity: usize,
}

impl Default for SampleHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl SampleHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, wpm: u32) {
        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(wpm);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = u32> + '_ {
        self.samples.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<u32> {
        self.iter().collect()
    }

    pub fn latest(&self) -> Option<u32> {
        self.samples.back().copied()
    }

    pub fn max(&self) -> Option<u32> {
        self.iter().max()
    }

    /// Arithmetic mean, 0 when empty.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.iter().map(f64::from).sum::<f64>() / self.samples.len() as f64
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProfileStats {
    pub average_speed: f64,
    pub max_speed: u32,
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub wpm: u32,
    /// The window was abandoned because of inactivity.
    pub idle_reset: bool,
}

/// Turns keyboard activity into one WPM sample per tick.
#[derive(Debug, Clone)]
pub struct SpeedEstimator {
    window_start: Duration,
    idle_threshold: Duration,
    history: SampleHistory,
    stats: ProfileStats,
}

impl Default for SpeedEstimator {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl SpeedEstimator {
    /// `window_start` is measured on the same clock as [`KeyActivity`].
    pub fn new(window_start: Duration) -> Self {
        Self {
            window_start,
            idle_threshold: IDLE_RESET,
            history: SampleHistory::default(),
            stats: ProfileStats::default(),
        }
    }

    pub fn tick(&mut self, activity: &KeyActivity, now: Duration) -> TickOutcome {
        let elapsed = now.saturating_sub(self.window_start);
        let idle = now.saturating_sub(activity.last_key());
        let idle_reset = idle > self.idle_threshold;

        if idle_reset {
            activity.reset_words();
            self.window_start = now;
        }

        let wpm = if idle_reset {
            0
        } else {
            words_per_minute(activity.words(), elapsed)
        };

        self.history.push(wpm);
        self.stats.average_speed = self.history.average();
        self.stats.max_speed = self.stats.max_speed.max(wpm);

        tracing::debug!(
            wpm,
            idle_reset,
            words = activity.words(),
            elapsed_ms = elapsed.as_millis() as u64,
            "tick"
        );
        TickOutcome { wpm, idle_reset }
    }

    pub fn history(&self) -> &SampleHistory {
        &self.history
    }

    pub fn stats(&self) -> ProfileStats {
        self.stats
    }

    pub fn window_start(&self) -> Duration {
        self.window_start
    }
}

/// Fixed-interval tick scheduler driven from the GUI loop.
///
/// The first tick is due at `start`. A late poll fires once and re-arms one
/// interval from that moment.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Instant,
}

impl Ticker {
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            next_due: start,
        }
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due = now + self.interval;
        true
    }

    /// Time left until the next tick is due.
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn five_words_in_thirty_seconds_is_ten_wpm() {
        assert_eq!(words_per_minute(5, secs(30.0)), 10);
    }

    #[test]
    fn wpm_rounds_down_and_handles_zero_elapsed() {
        assert_eq!(words_per_minute(7, Duration::ZERO), 0);
        assert_eq!(words_per_minute(0, secs(12.0)), 0);
        // 7 words in 40s is 10.5 wpm
        assert_eq!(words_per_minute(7, secs(40.0)), 10);
        assert_eq!(words_per_minute(1, Duration::from_millis(1)), 60_000);
    }

    #[test]
    fn history_evicts_oldest_first() {
        let mut history = SampleHistory::default();
        for wpm in 0..61 {
            history.push(wpm);
        }
        assert_eq!(history.capacity(), HISTORY_CAPACITY);
        assert_eq!(history.len(), history.capacity());
        assert_eq!(history.iter().next(), Some(1));
        assert_eq!(history.latest(), Some(60));
    }

    #[test]
    fn average_of_empty_history_is_zero() {
        let history = SampleHistory::default();
        assert_eq!(history.average(), 0.0);
        assert_eq!(history.max(), None);
    }

    #[test]
    fn first_tick_reports_zero() {
        let activity = KeyActivity::new();
        activity.record_key_at(true, Duration::ZERO);
        let mut estimator = SpeedEstimator::new(Duration::ZERO);
        let outcome = estimator.tick(&activity, Duration::ZERO);
        assert_eq!(outcome.wpm, 0);
        assert!(!outcome.idle_reset);
    }

    #[test]
    fn active_typing_is_measured_over_the_window() {
        let activity = KeyActivity::new();
        let mut estimator = SpeedEstimator::new(Duration::ZERO);
        for i in 0..5 {
            activity.record_key_at(true, secs(26.0 + i as f64 * 0.5));
        }
        let outcome = estimator.tick(&activity, secs(30.0));
        assert_eq!(outcome, TickOutcome { wpm: 10, idle_reset: false });
        assert_eq!(estimator.stats().max_speed, 10);
    }

    #[test]
    fn idle_resets_window_and_counter() {
        let activity = KeyActivity::new();
        let mut estimator = SpeedEstimator::new(Duration::ZERO);
        activity.record_key_at(true, secs(1.0));
        activity.record_key_at(true, secs(2.0));
        assert!(estimator.tick(&activity, secs(3.0)).wpm > 0);

        let outcome = estimator.tick(&activity, secs(6.0));
        assert_eq!(outcome, TickOutcome { wpm: 0, idle_reset: true });
        assert_eq!(activity.words(), 0);
        assert_eq!(estimator.window_start(), secs(6.0));
    }

    #[test]
    fn exactly_three_seconds_idle_is_not_a_reset() {
        let activity = KeyActivity::new();
        let mut estimator = SpeedEstimator::new(Duration::ZERO);
        activity.record_key_at(true, secs(2.0));
        let outcome = estimator.tick(&activity, secs(5.0));
        assert!(!outcome.idle_reset);
        assert_eq!(outcome.wpm, 12);
    }

    #[test]
    fn max_speed_never_decreases() {
        let activity = KeyActivity::new();
        let mut estimator = SpeedEstimator::new(Duration::ZERO);
        let mut last_max = 0;
        for t in 1..=20u64 {
            if t <= 8 {
                activity.record_key_at(true, Duration::from_secs(t));
            }
            estimator.tick(&activity, Duration::from_secs(t));
            let max = estimator.stats().max_speed;
            assert!(max >= last_max);
            last_max = max;
        }
        assert!(last_max > 0);
        assert_eq!(estimator.history().latest(), Some(0));
    }

    #[test]
    fn ticker_fires_once_per_interval_without_catch_up() {
        let start = Instant::now();
        let mut ticker = Ticker::new(TICK_INTERVAL, start);
        assert!(ticker.poll(start));
        assert!(!ticker.poll(start + Duration::from_millis(999)));
        assert!(ticker.poll(start + Duration::from_millis(3500)));
        assert!(!ticker.poll(start + Duration::from_millis(3600)));
        assert_eq!(
            ticker.until_next(start + Duration::from_millis(4000)),
            Duration::from_millis(500)
        );
    }
}
