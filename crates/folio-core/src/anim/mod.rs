//! Animation primitives shared by every moving part of the portfolio
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing curves mapping [0, 1] to [0, 1]
//! - `timing` - Clock-explicit progress and interpolation helpers
//!
//! Higher layers (reveals, counters, smooth scrolling, typing) never read the
//! wall clock themselves. They receive `now: Instant` from the event loop so
//! that a delayed or skipped frame only changes how far an animation jumps.

pub mod easing;
pub mod timing;

pub use easing::EasingType;
pub use timing::{is_complete, lerp, lerp_u16, progress};
