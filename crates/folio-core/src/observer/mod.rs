//! Viewport intersection watcher
//!
//! A small, host-independent take on intersection observation. Targets are
//! registered by handle; every call to [`VisibilityObserver::check`] measures
//! them against the (margin-adjusted) viewport and reports the ones whose
//! intersecting state changed since the previous check.
//!
//! Two policies exist and are chosen per observer:
//! - [`ObservationPolicy::Once`]: a target is detached after its first
//!   intersecting entry (reveal animations)
//! - [`ObservationPolicy::Repeating`]: entries keep coming on every
//!   transition (nav active-link tracking)

pub mod geometry;

use std::hash::Hash;

pub use geometry::{Rect, RootMargin};

/// What happens to a target after it first intersects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationPolicy {
    /// Fire once, then stop observing the target
    Once,
    /// Fire on every intersecting/non-intersecting transition
    Repeating,
}

/// Denominator used for the visible ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatioBasis {
    /// Visible area divided by the target's own area
    #[default]
    Target,
    /// Visible area divided by the smaller of target and root areas, so a
    /// target taller than the viewport can still reach the threshold
    Fit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the target that must be visible, in [0, 1]
    pub threshold: f64,
    pub root_margin: RootMargin,
    pub policy: ObservationPolicy,
    pub ratio_basis: RatioBasis,
}

impl ObserverOptions {
    pub fn new(threshold: f64, root_margin: RootMargin, policy: ObservationPolicy) -> Self {
        Self {
            threshold: if threshold.is_nan() { 0.0 } else { threshold.clamp(0.0, 1.0) },
            root_margin,
            policy,
            ratio_basis: RatioBasis::Target,
        }
    }

    pub fn with_ratio_basis(mut self, basis: RatioBasis) -> Self {
        self.ratio_basis = basis;
        self
    }
}

/// One change notification for an observed target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry<K> {
    pub target: K,
    /// Visible fraction, in [0, 1]
    pub ratio: f64,
    pub is_intersecting: bool,
    /// Target bounds at the time of the check
    pub bounds: Rect,
}

#[derive(Debug, Clone)]
struct Tracked<K> {
    key: K,
    /// Intersecting state last reported, `None` before the first report
    last: Option<bool>,
}

/// Watches a set of targets against a viewport
#[derive(Debug, Clone)]
pub struct VisibilityObserver<K> {
    options: ObserverOptions,
    targets: Vec<Tracked<K>>,
}

impl<K: Copy + Eq + Hash> VisibilityObserver<K> {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            targets: Vec::new(),
        }
    }

    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    /// Start observing a target; observing it twice is a no-op
    pub fn observe(&mut self, key: K) {
        if !self.is_observing(key) {
            self.targets.push(Tracked { key, last: None });
        }
    }

    /// Stop observing a target, returns whether it was observed
    pub fn unobserve(&mut self, key: K) -> bool {
        let before = self.targets.len();
        self.targets.retain(|t| t.key != key);
        before != self.targets.len()
    }

    pub fn disconnect(&mut self) {
        self.targets.clear();
    }

    pub fn is_observing(&self, key: K) -> bool {
        self.targets.iter().any(|t| t.key == key)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Measure every target against `viewport` and return the changes
    ///
    /// `geometry` yields the current bounds of a target; targets without
    /// bounds (not laid out yet) are skipped and keep their previous state.
    /// Entries come back in registration order.
    pub fn check<F>(&mut self, viewport: Rect, mut geometry: F) -> Vec<IntersectionEntry<K>>
    where
        F: FnMut(K) -> Option<Rect>,
    {
        let root = viewport.expand(&self.options.root_margin);
        let mut entries = Vec::new();

        for tracked in &mut self.targets {
            let Some(bounds) = geometry(tracked.key) else {
                continue;
            };

            let (ratio, overlaps) = visible_ratio(&bounds, &root, self.options.ratio_basis);
            let is_intersecting = overlaps && ratio >= self.options.threshold;

            if tracked.last != Some(is_intersecting) {
                tracked.last = Some(is_intersecting);
                entries.push(IntersectionEntry {
                    target: tracked.key,
                    ratio,
                    is_intersecting,
                    bounds,
                });
            }
        }

        if self.options.policy == ObservationPolicy::Once {
            let fired: Vec<K> = entries
                .iter()
                .filter(|e| e.is_intersecting)
                .map(|e| e.target)
                .collect();
            if !fired.is_empty() {
                self.targets.retain(|t| !fired.contains(&t.key));
            }
        }

        entries
    }
}

fn visible_ratio(bounds: &Rect, root: &Rect, basis: RatioBasis) -> (f64, bool) {
    let Some(overlap) = bounds.intersection(root) else {
        return (0.0, false);
    };

    let denominator = match basis {
        RatioBasis::Target => bounds.area(),
        RatioBasis::Fit => bounds.area().min(root.area()),
    };

    // A zero-area target that touches the root counts as fully visible
    let ratio = if denominator > 0.0 {
        (overlap.area() / denominator).clamp(0.0, 1.0)
    } else {
        1.0
    };
    (ratio, true)
}
