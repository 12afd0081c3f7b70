//! Active nav link tracking
//!
//! Watches page sections with a repeating observer and keeps exactly one
//! section marked active: the last intersecting section of the most recent
//! batch. Sections leaving the band do not clear the mark.
//!
//! The visible ratio is measured against the smaller of the section and the
//! band ([`RatioBasis::Fit`]), not the section's own area. A section taller
//! than the viewport can still cross the threshold and become active.

use std::hash::Hash;

use crate::config::ScrollSpyConfig;
use crate::observer::{
    IntersectionEntry, ObservationPolicy, ObserverOptions, RatioBasis, Rect, VisibilityObserver,
};

#[derive(Debug, Clone)]
pub struct ScrollSpy<K> {
    observer: VisibilityObserver<K>,
    active: Option<K>,
}

impl<K: Copy + Eq + Hash> ScrollSpy<K> {
    pub fn new(config: &ScrollSpyConfig) -> Self {
        let options = ObserverOptions::new(
            config.threshold,
            config.root_margin,
            ObservationPolicy::Repeating,
        )
        .with_ratio_basis(RatioBasis::Fit);
        Self {
            observer: VisibilityObserver::new(options),
            active: None,
        }
    }

    pub fn observe_sections<I>(&mut self, sections: I)
    where
        I: IntoIterator<Item = K>,
    {
        for section in sections {
            self.observer.observe(section);
        }
    }

    /// Measure sections and update the active mark, returns the active section
    pub fn check<F>(&mut self, viewport: Rect, geometry: F) -> Option<K>
    where
        F: FnMut(K) -> Option<Rect>,
    {
        let entries = self.observer.check(viewport, geometry);
        self.process(&entries)
    }

    /// Apply a batch of entries in order; the last intersecting one wins
    pub fn process(&mut self, entries: &[IntersectionEntry<K>]) -> Option<K> {
        for entry in entries {
            if entry.is_intersecting {
                self.active = Some(entry.target);
            }
        }
        self.active
    }

    pub fn active(&self) -> Option<K> {
        self.active
    }

    pub fn is_active(&self, key: K) -> bool {
        self.active == Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(key: &'static str) -> Option<Rect> {
        match key {
            "about" => Some(Rect::new(0.0, 0.0, 800.0, 700.0)),
            "projects" => Some(Rect::new(0.0, 700.0, 800.0, 900.0)),
            "contact" => Some(Rect::new(0.0, 1600.0, 800.0, 300.0)),
            _ => None,
        }
    }

    fn spy() -> ScrollSpy<&'static str> {
        let mut spy = ScrollSpy::new(&ScrollSpyConfig::default());
        spy.observe_sections(["about", "projects", "contact"]);
        spy
    }

    #[test]
    fn test_tracks_section_in_band() {
        let mut spy = spy();
        assert_eq!(spy.check(Rect::new(0.0, 0.0, 800.0, 600.0), sections), Some("about"));
        assert_eq!(
            spy.check(Rect::new(0.0, 900.0, 800.0, 600.0), sections),
            Some("projects")
        );
        assert!(spy.is_active("projects"));
        assert!(!spy.is_active("about"));
    }

    #[test]
    fn test_active_survives_sections_leaving() {
        let mut spy = spy();
        spy.check(Rect::new(0.0, 0.0, 800.0, 600.0), sections);
        // Nothing is in the band past the end of the page
        assert_eq!(spy.check(Rect::new(0.0, 5000.0, 800.0, 600.0), sections), Some("about"));
    }

    #[test]
    fn test_last_intersecting_entry_wins() {
        let mut spy = spy();
        let bounds = Rect::new(0.0, 0.0, 1.0, 1.0);
        let entry = |target, is_intersecting| IntersectionEntry {
            target,
            ratio: if is_intersecting { 0.5 } else { 0.0 },
            is_intersecting,
            bounds,
        };
        let active = spy.process(&[
            entry("about", true),
            entry("projects", true),
            entry("contact", false),
        ]);
        assert_eq!(active, Some("projects"));
    }

    #[test]
    fn test_tall_section_becomes_active() {
        let mut spy = ScrollSpy::new(&ScrollSpyConfig::default());
        spy.observe_sections(["intro", "long"]);
        let tall = |key: &str| match key {
            "intro" => Some(Rect::new(0.0, 0.0, 800.0, 600.0)),
            "long" => Some(Rect::new(0.0, 600.0, 800.0, 6000.0)),
            _ => None,
        };
        // Only a sliver of the long section's own area is on screen
        assert_eq!(
            spy.check(Rect::new(0.0, 2000.0, 800.0, 600.0), tall),
            Some("long")
        );
    }

    #[test]
    fn test_reactivates_on_return() {
        let mut spy = spy();
        let top = Rect::new(0.0, 0.0, 800.0, 600.0);
        let bottom = Rect::new(0.0, 1450.0, 800.0, 600.0);
        assert_eq!(spy.check(top, sections), Some("about"));
        assert_eq!(spy.check(bottom, sections), Some("contact"));
        assert_eq!(spy.check(top, sections), Some("about"));
    }
}
