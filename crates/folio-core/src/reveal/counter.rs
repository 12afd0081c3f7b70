//! Stat counter: counts a displayed integer up from zero to a target

use std::time::{Duration, Instant};

use crate::config::CounterConfig;

/// Upper bound on increments applied by a single `advance`
///
/// Large targets floor the step to zero; the remaining increments are then
/// spread over the following ticks instead of blocking one.
const MAX_STEPS_PER_ADVANCE: u64 = 1024;

/// Timed integer increment from 0 to a target, displayed as `"{n}+"`
#[derive(Debug, Clone)]
pub struct Counter {
    target: u64,
    current: u64,
    step: Duration,
    /// When the next increment is due, `None` once complete
    next_due: Option<Instant>,
}

impl Counter {
    /// Start counting towards `target` at `now`
    ///
    /// Targets of zero or below are complete immediately and never schedule
    /// a step. Otherwise the first increment lands after the initial delay
    /// and the rest follow every `duration / target` (floored to whole
    /// milliseconds).
    pub fn start(target: i64, now: Instant, config: &CounterConfig) -> Self {
        if target <= 0 {
            return Self {
                target: 0,
                current: 0,
                step: Duration::ZERO,
                next_due: None,
            };
        }

        let target = target.unsigned_abs();
        let step = Duration::from_millis(config.duration_ms / target);
        Self {
            target,
            current: 0,
            step,
            next_due: Some(now + Duration::from_millis(config.initial_delay_ms)),
        }
    }

    /// Apply every increment due at `now`, returns how many were applied
    ///
    /// A late tick applies missed increments one at a time, so the value
    /// still passes through every integer. At most
    /// [`MAX_STEPS_PER_ADVANCE`] are applied per call; the rest stay due.
    pub fn advance(&mut self, now: Instant) -> u64 {
        let mut steps = 0;
        while let Some(due) = self.next_due {
            if due > now || steps == MAX_STEPS_PER_ADVANCE {
                break;
            }
            self.current += 1;
            steps += 1;
            self.next_due = if self.current >= self.target {
                None
            } else {
                Some(due + self.step)
            };
        }
        steps
    }

    pub fn value(&self) -> u64 {
        self.current
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Interval between increments
    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn is_complete(&self) -> bool {
        self.next_due.is_none()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    pub fn display(&self) -> String {
        format!("{}+", self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_target_42_takes_exactly_42_steps() {
        let start = Instant::now();
        let config = CounterConfig::default();
        let mut counter = Counter::start(42, start, &config);
        assert_eq!(counter.step(), ms(47));
        assert_eq!(counter.display(), "0+");

        // Tick every 5 ms well past the end, recording every increment
        let mut seen = vec![counter.value()];
        let mut total = 0;
        let mut t = start;
        while t < start + ms(3000) {
            t += ms(5);
            let before = counter.value();
            let steps = counter.advance(t);
            total += steps;
            if steps > 0 {
                assert_eq!(counter.value(), before + steps);
                seen.push(counter.value());
            }
        }

        assert_eq!(total, 42);
        assert_eq!(counter.display(), "42+");
        assert!(counter.is_complete());
        assert!(seen.windows(2).all(|w| w[1] == w[0] + 1));
        assert_eq!(seen.first(), Some(&0));
        assert_eq!(seen.last(), Some(&42));
    }

    #[test]
    fn test_first_step_waits_for_initial_delay() {
        let start = Instant::now();
        let mut counter = Counter::start(10, start, &CounterConfig::default());
        assert_eq!(counter.advance(start + ms(99)), 0);
        assert_eq!(counter.advance(start + ms(100)), 1);
        // step is 200 ms for a target of 10
        assert_eq!(counter.advance(start + ms(299)), 0);
        assert_eq!(counter.advance(start + ms(300)), 1);
    }

    #[test]
    fn test_late_tick_catches_up_without_overshoot() {
        let start = Instant::now();
        let mut counter = Counter::start(5, start, &CounterConfig::default());
        assert_eq!(counter.advance(start + ms(60_000)), 5);
        assert_eq!(counter.value(), 5);
        assert_eq!(counter.advance(start + ms(120_000)), 0);
    }

    #[test]
    fn test_zero_and_negative_targets_are_already_complete() {
        let start = Instant::now();
        for target in [0, -3] {
            let mut counter = Counter::start(target, start, &CounterConfig::default());
            assert!(counter.is_complete());
            assert_eq!(counter.next_due(), None);
            assert_eq!(counter.advance(start + ms(10_000)), 0);
            assert_eq!(counter.display(), "0+");
        }
    }

    #[test]
    fn test_huge_target_spreads_over_ticks() {
        let start = Instant::now();
        let mut counter = Counter::start(5000, start, &CounterConfig::default());
        assert_eq!(counter.step(), Duration::ZERO);

        let mut t = start + ms(100);
        let mut total = 0;
        while !counter.is_complete() {
            let steps = counter.advance(t);
            assert!(steps > 0 && steps <= MAX_STEPS_PER_ADVANCE);
            total += steps;
            t += ms(16);
        }
        assert_eq!(total, 5000);
        assert_eq!(counter.display(), "5000+");
    }

    #[test]
    fn test_target_beyond_u32_is_kept_and_advance_stays_bounded() {
        let start = Instant::now();
        let target = u32::MAX as i64 + 10;
        let mut counter = Counter::start(target, start, &CounterConfig::default());
        assert_eq!(counter.target(), target as u64);
        assert_eq!(counter.advance(start + ms(100)), MAX_STEPS_PER_ADVANCE);
        assert_eq!(counter.value(), MAX_STEPS_PER_ADVANCE);
        assert!(!counter.is_complete());
    }
}
