//! Scroll animation controller
//!
//! Combines the easing curves and timing helpers from `folio_core::anim` to
//! manage scroll animations. Positions are document rows. Every method that
//! starts or advances an animation takes the current time explicitly.

use std::time::{Duration, Instant};

use folio_core::anim::{is_complete, lerp_u16, progress, EasingType};
use folio_core::ScrollConfig;

/// Upper bound for the animation of a single line or page step; section
/// jumps use the full configured duration
const STEP_DURATION_CAP: Duration = Duration::from_millis(150);

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: u16,
    to: u16,
    duration: Duration,
    easing: EasingType,
}

/// Scroll animation controller
///
/// Call `scroll_to()` or `scroll_by()` to begin an animation, then `update()`
/// each frame to get the current interpolated scroll position.
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    /// Current active animation (if any)
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    /// Current scroll position (always up-to-date)
    current_scroll: u16,
    /// Pending scroll delta for batching multiple scroll events
    pending_delta: i32,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current_scroll: 0,
            pending_delta: 0,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    fn is_smooth(&self) -> bool {
        self.config.smooth_enabled && self.config.animation_duration_ms > 0
    }

    fn jump_duration(&self) -> Duration {
        Duration::from_millis(self.config.animation_duration_ms)
    }

    fn step_duration(&self) -> Duration {
        self.jump_duration().min(STEP_DURATION_CAP)
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Check if there's pending work (animation or pending delta)
    /// Use this to determine if we need high frame rate
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0
    }

    /// Get the target scroll position (final position after animation)
    pub fn target_scroll(&self) -> u16 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current_scroll)
    }

    #[inline]
    pub fn current_scroll(&self) -> u16 {
        self.current_scroll
    }

    /// Set scroll position immediately (no animation)
    pub fn set_scroll(&mut self, scroll: u16) {
        self.animation = None;
        self.current_scroll = scroll;
        self.pending_delta = 0;
    }

    /// Animate to a target position over the full configured duration
    ///
    /// If smooth scrolling is disabled, jumps immediately to target. A jump
    /// issued mid-animation starts from the position currently shown.
    pub fn scroll_to(&mut self, target: u16, max_scroll: u16, now: Instant) {
        let target = target.min(max_scroll);
        self.pending_delta = 0;

        if !self.is_smooth() {
            self.current_scroll = target;
            self.animation = None;
            return;
        }

        if self.current_scroll == target {
            self.animation = None;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.current_scroll,
            to: target,
            duration: self.jump_duration(),
            easing: self.config.easing,
        });
    }

    /// Scroll by a delta amount (positive = down, negative = up)
    ///
    /// Multiple scroll events within the same animation frame are batched
    /// together for smoother handling of rapid key presses.
    pub fn scroll_by(&mut self, delta: i32, max_scroll: u16) {
        if !self.is_smooth() {
            let new_scroll = (self.current_scroll as i32 + delta)
                .clamp(0, max_scroll as i32) as u16;
            self.current_scroll = new_scroll;
            self.animation = None;
            return;
        }

        self.pending_delta += delta;
    }

    /// Scroll down by one step
    pub fn scroll_down(&mut self, max_scroll: u16) {
        let lines = self.step_lines();
        self.scroll_by(lines, max_scroll);
    }

    /// Scroll up by one step
    pub fn scroll_up(&mut self, max_scroll: u16) {
        let lines = self.step_lines();
        self.scroll_by(-lines, max_scroll);
    }

    fn step_lines(&self) -> i32 {
        if self.is_smooth() {
            1 // Smooth scroll moves 1 line at a time for fine control
        } else {
            self.config.scroll_lines.max(1) as i32
        }
    }

    pub fn scroll_half_page_down(&mut self, viewport_height: u16, max_scroll: u16) {
        let half_page = (viewport_height / 2).max(1) as i32;
        self.scroll_by(half_page, max_scroll);
    }

    pub fn scroll_half_page_up(&mut self, viewport_height: u16, max_scroll: u16) {
        let half_page = (viewport_height / 2).max(1) as i32;
        self.scroll_by(-half_page, max_scroll);
    }

    pub fn scroll_full_page_down(&mut self, viewport_height: u16, max_scroll: u16) {
        self.scroll_by(viewport_height.max(1) as i32, max_scroll);
    }

    pub fn scroll_full_page_up(&mut self, viewport_height: u16, max_scroll: u16) {
        self.scroll_by(-(viewport_height.max(1) as i32), max_scroll);
    }

    /// Update animation state and return current scroll position
    ///
    /// Call this every frame to advance the animation.
    pub fn update(&mut self, max_scroll: u16, now: Instant) -> u16 {
        if self.pending_delta != 0 {
            let target = self.target_scroll();
            let new_target = (target as i32 + self.pending_delta)
                .clamp(0, max_scroll as i32) as u16;
            self.pending_delta = 0;

            if new_target != self.current_scroll {
                self.animation = Some(ActiveAnimation {
                    start: now,
                    from: self.current_scroll,
                    to: new_target,
                    duration: self.step_duration(),
                    easing: self.config.easing,
                });
            } else {
                self.animation = None;
            }
        }

        if let Some(ref anim) = self.animation {
            if is_complete(anim.start, now, anim.duration) {
                self.current_scroll = anim.to.min(max_scroll);
                self.animation = None;
            } else {
                let t = progress(anim.start, now, anim.duration);
                let eased_t = anim.easing.apply(t);
                self.current_scroll = lerp_u16(anim.from, anim.to, eased_t).min(max_scroll);
            }
        } else {
            // Content may have shrunk under us
            self.current_scroll = self.current_scroll.min(max_scroll);
        }

        self.current_scroll
    }

    /// Cancel any active animation and stop at current position
    pub fn cancel(&mut self) {
        self.animation = None;
        self.pending_delta = 0;
    }
}
