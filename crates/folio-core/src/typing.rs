//! Typewriter effect for the hero tagline
//!
//! Types a phrase one character at a time, holds it, deletes it faster than
//! it was typed, then moves on to the next phrase, forever.

use std::time::{Duration, Instant};

use crate::config::TypingConfig;

/// Upper bound on steps replayed by a single late `advance`
const MAX_CATCH_UP_STEPS: usize = 64;

#[derive(Debug, Clone)]
pub struct TypingAnimation {
    phrases: Vec<Vec<char>>,
    phrase_index: usize,
    char_index: usize,
    deleting: bool,
    next_due: Option<Instant>,
    text: String,
    type_delay: Duration,
    delete_delay: Duration,
    hold_delay: Duration,
}

impl TypingAnimation {
    /// Create the effect; empty phrases are dropped and with none left the
    /// effect stays inactive with empty text
    pub fn new<I, S>(phrases: I, config: &TypingConfig, now: Instant) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: Vec<Vec<char>> = phrases
            .into_iter()
            .map(|p| p.as_ref().chars().collect::<Vec<_>>())
            .filter(|p| !p.is_empty())
            .collect();

        let next_due = if phrases.is_empty() {
            None
        } else {
            Some(now + Duration::from_millis(config.start_delay_ms))
        };

        Self {
            phrases,
            phrase_index: 0,
            char_index: 0,
            deleting: false,
            next_due,
            text: String::new(),
            type_delay: Duration::from_millis(config.type_delay_ms),
            delete_delay: Duration::from_millis(config.delete_delay_ms),
            hold_delay: Duration::from_millis(config.hold_delay_ms),
        }
    }

    /// Run every step due at `now`, returns whether the text changed
    pub fn advance(&mut self, now: Instant) -> bool {
        let mut changed = false;
        let mut steps = 0;
        while let Some(due) = self.next_due {
            if due > now {
                break;
            }
            if steps == MAX_CATCH_UP_STEPS {
                // Too far behind, continue from the present instead
                self.next_due = Some(now);
                break;
            }
            let delay = self.step();
            self.next_due = Some(due + delay);
            steps += 1;
            changed = true;
        }
        changed
    }

    fn step(&mut self) -> Duration {
        let phrase = &self.phrases[self.phrase_index];

        if !self.deleting {
            self.char_index += 1;
            self.text = phrase[..self.char_index].iter().collect();
            if self.char_index == phrase.len() {
                self.deleting = true;
                return self.hold_delay;
            }
        } else {
            self.char_index -= 1;
            self.text = phrase[..self.char_index].iter().collect();
            if self.char_index == 0 {
                self.deleting = false;
                self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
            }
        }

        if self.deleting {
            self.delete_delay
        } else {
            self.type_delay
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_types_holds_deletes_and_cycles() {
        let start = Instant::now();
        let mut typing = TypingAnimation::new(["ab", "xyz"], &TypingConfig::default(), start);

        assert!(!typing.advance(start + ms(1199)));
        assert_eq!(typing.text(), "");

        assert!(typing.advance(start + ms(1200)));
        assert_eq!(typing.text(), "a");
        typing.advance(start + ms(1300));
        assert_eq!(typing.text(), "ab");

        // Held for 2 s before deleting
        assert!(!typing.advance(start + ms(3299)));
        typing.advance(start + ms(3300));
        assert_eq!(typing.text(), "a");
        typing.advance(start + ms(3350));
        assert_eq!(typing.text(), "");
        assert_eq!(typing.phrase_index(), 1);

        // Next phrase starts at typing speed
        typing.advance(start + ms(3450));
        assert_eq!(typing.text(), "x");
    }

    #[test]
    fn test_phrases_wrap_around() {
        let start = Instant::now();
        let mut typing = TypingAnimation::new(["a"], &TypingConfig::default(), start);
        typing.advance(start + ms(1200));
        assert_eq!(typing.text(), "a");
        typing.advance(start + ms(3200));
        assert_eq!(typing.text(), "");
        assert_eq!(typing.phrase_index(), 0);
    }

    #[test]
    fn test_unicode_phrases_step_by_char() {
        let start = Instant::now();
        let mut typing = TypingAnimation::new(["héllo"], &TypingConfig::default(), start);
        typing.advance(start + ms(1400));
        assert_eq!(typing.text(), "hél");
    }

    #[test]
    fn test_empty_phrases_are_inactive() {
        let start = Instant::now();
        let mut typing = TypingAnimation::new(["", ""], &TypingConfig::default(), start);
        assert!(!typing.is_active());
        assert!(!typing.advance(start + ms(60_000)));
        assert_eq!(typing.text(), "");

        let none: [&str; 0] = [];
        assert!(!TypingAnimation::new(none, &TypingConfig::default(), start).is_active());
    }

    #[test]
    fn test_stop_freezes_text() {
        let start = Instant::now();
        let mut typing = TypingAnimation::new(["abc"], &TypingConfig::default(), start);
        typing.advance(start + ms(1300));
        typing.stop();
        assert!(!typing.advance(start + ms(9000)));
        assert_eq!(typing.text(), "ab");
    }

    #[test]
    fn test_long_stall_is_bounded() {
        let start = Instant::now();
        let mut typing = TypingAnimation::new(["abc"], &TypingConfig::default(), start);
        assert!(typing.advance(start + Duration::from_secs(3600)));
        assert_eq!(typing.next_due(), Some(start + Duration::from_secs(3600)));
    }
}
