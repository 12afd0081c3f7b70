//! Visibility-triggered reveal animations
//!
//! Each registered element is revealed the first time it enters the
//! viewport: it fades in while sliding up, and stat elements with a numeric
//! target start a [`Counter`]. Elements are watched by a fire-once observer,
//! so a reveal can never run twice for the same element.

pub mod counter;

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

pub use counter::Counter;

use crate::anim::{progress, EasingType};
use crate::config::{CounterConfig, RevealConfig};
use crate::observer::{
    IntersectionEntry, ObservationPolicy, ObserverOptions, Rect, VisibilityObserver,
};

/// Style of a revealing element at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealFrame {
    /// 0.0 (invisible) to 1.0 (fully shown)
    pub opacity: f64,
    /// Remaining downward offset in pixels, shrinking to 0
    pub offset: f64,
}

impl RevealFrame {
    pub const VISIBLE: RevealFrame = RevealFrame {
        opacity: 1.0,
        offset: 0.0,
    };

    pub fn hidden(distance: f64) -> Self {
        Self {
            opacity: 0.0,
            offset: distance,
        }
    }
}

/// A running (or finished) one-shot reveal transition
#[derive(Debug, Clone, Copy)]
pub struct Reveal {
    start: Instant,
    duration: Duration,
    easing: EasingType,
    distance: f64,
}

impl Reveal {
    pub fn new(start: Instant, duration: Duration, easing: EasingType, distance: f64) -> Self {
        Self {
            start,
            duration,
            easing,
            distance,
        }
    }

    pub fn frame(&self, now: Instant) -> RevealFrame {
        let eased = self.easing.apply(progress(self.start, now, self.duration));
        RevealFrame {
            opacity: eased,
            offset: self.distance * (1.0 - eased),
        }
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }
}

/// An element handed to [`RevealAnimator::observe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservedElement<K> {
    pub key: K,
    /// Numeric target for stat counters
    pub counter_target: Option<i64>,
}

impl<K> ObservedElement<K> {
    pub fn new(key: K) -> Self {
        Self {
            key,
            counter_target: None,
        }
    }

    pub fn with_counter(key: K, target: Option<i64>) -> Self {
        Self {
            key,
            counter_target: target,
        }
    }
}

#[derive(Debug, Clone)]
struct ElementState {
    counter_target: Option<i64>,
    reveal: Option<Reveal>,
    counter: Option<Counter>,
    counted: bool,
}

impl ElementState {
    fn is_revealed(&self) -> bool {
        self.reveal.is_some()
    }
}

/// Drives reveal transitions and stat counters for a set of elements
#[derive(Debug, Clone)]
pub struct RevealAnimator<K> {
    observer: VisibilityObserver<K>,
    elements: HashMap<K, ElementState>,
    reveal: RevealConfig,
    counter: CounterConfig,
}

impl<K: Copy + Eq + Hash> RevealAnimator<K> {
    pub fn new(reveal: RevealConfig, counter: CounterConfig) -> Self {
        let options = ObserverOptions::new(
            reveal.threshold,
            reveal.root_margin,
            ObservationPolicy::Once,
        );
        Self {
            observer: VisibilityObserver::new(options),
            elements: HashMap::new(),
            reveal,
            counter,
        }
    }

    /// Register elements; already registered ones keep their state
    pub fn observe<I>(&mut self, elements: I)
    where
        I: IntoIterator<Item = ObservedElement<K>>,
    {
        for element in elements {
            if self.elements.contains_key(&element.key) {
                continue;
            }
            self.elements.insert(
                element.key,
                ElementState {
                    counter_target: element.counter_target,
                    reveal: None,
                    counter: None,
                    counted: false,
                },
            );
            self.observer.observe(element.key);
        }
    }

    /// Measure elements against the viewport and start any due reveals
    ///
    /// Returns the elements revealed by this call.
    pub fn check<F>(&mut self, viewport: Rect, geometry: F, now: Instant) -> Vec<K>
    where
        F: FnMut(K) -> Option<Rect>,
    {
        if self.observer.is_empty() {
            return Vec::new();
        }
        let entries = self.observer.check(viewport, geometry);
        self.handle_entries(&entries, now)
    }

    /// React to a batch of intersection entries
    pub fn handle_entries(&mut self, entries: &[IntersectionEntry<K>], now: Instant) -> Vec<K> {
        let mut revealed = Vec::new();

        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let Some(state) = self.elements.get_mut(&entry.target) else {
                continue;
            };

            if !state.is_revealed() {
                let duration = if self.reveal.enabled {
                    Duration::from_millis(self.reveal.duration_ms)
                } else {
                    Duration::ZERO
                };
                state.reveal = Some(Reveal::new(
                    now,
                    duration,
                    self.reveal.easing,
                    self.reveal.distance_px,
                ));
                revealed.push(entry.target);
            }

            if let Some(target) = state.counter_target {
                if !state.counted {
                    state.counted = true;
                    state.counter = Some(Counter::start(target, now, &self.counter));
                    tracing::debug!("Starting counter towards {}", target);
                }
            }

            self.observer.unobserve(entry.target);
        }

        revealed
    }

    /// Advance running counters, returns whether any displayed value changed
    pub fn advance(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for counter in self.elements.values_mut().filter_map(|s| s.counter.as_mut()) {
            if counter.advance(now) > 0 {
                changed = true;
            }
        }
        changed
    }

    /// Whether anything is still moving at `now`
    pub fn needs_update(&self, now: Instant) -> bool {
        self.elements.values().any(|s| {
            s.reveal.is_some_and(|r| !r.is_complete(now))
                || s.counter.as_ref().is_some_and(|c| !c.is_complete())
        })
    }

    /// Current style of an element
    ///
    /// Unknown elements are shown as-is.
    pub fn frame(&self, key: K, now: Instant) -> RevealFrame {
        match self.elements.get(&key) {
            Some(ElementState {
                reveal: Some(reveal),
                ..
            }) => reveal.frame(now),
            Some(_) => RevealFrame::hidden(self.reveal.distance_px),
            None => RevealFrame::VISIBLE,
        }
    }

    pub fn is_revealed(&self, key: K) -> bool {
        self.elements.get(&key).is_some_and(ElementState::is_revealed)
    }

    pub fn counter(&self, key: K) -> Option<&Counter> {
        self.elements.get(&key).and_then(|s| s.counter.as_ref())
    }

    /// Number of registered elements still waiting to be revealed
    pub fn pending(&self) -> usize {
        self.observer.len()
    }
}
