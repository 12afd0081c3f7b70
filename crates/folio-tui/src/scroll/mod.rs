//! Smooth scrolling for the portfolio document
//!
//! Easing curves and timing helpers live in `folio_core::anim`; this module
//! adds the controller that turns key presses and section jumps into eased
//! movement of the scroll position.
//!
//! # Usage
//!
//! ```ignore
//! use folio_tui::scroll::ScrollAnimator;
//!
//! let mut animator = ScrollAnimator::new(config.scroll.clone());
//!
//! // Jump to a section
//! animator.scroll_to(section_top, max_scroll, Instant::now());
//!
//! // In main loop, update each frame and get current position
//! let scroll = animator.update(max_scroll, Instant::now());
//! ```

pub mod animation;

pub use animation::ScrollAnimator;
