//! L4 Atomic Layer: Pure easing functions
//!
//! Provides mathematical easing functions that map input [0, 1] to output [0, 1]
//! with various acceleration curves.

use serde::{Deserialize, Serialize};

/// Easing curve used by reveal transitions and smooth scrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    /// Jump to the end value when the animation completes
    None,
    Linear,
    Cubic,
    Quintic,
    /// Exponential ease-out, the default reveal curve
    #[default]
    EaseOut,
    QuadOut,
    /// Quadratic ease-in-out, used for section jumps
    QuadInOut,
}

impl EasingType {
    /// Apply the easing function to a progress value
    ///
    /// # Arguments
    /// * `t` - Progress value in range [0, 1]
    ///
    /// # Returns
    /// Eased value in range [0, 1]
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            EasingType::None => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            EasingType::Linear => t,
            EasingType::Cubic => cubic_ease_out(t),
            EasingType::Quintic => quintic_ease_out(t),
            EasingType::EaseOut => exponential_ease_out(t),
            EasingType::QuadOut => quad_ease_out(t),
            EasingType::QuadInOut => quad_ease_in_out(t),
        }
    }
}

/// Cubic ease-out: f(t) = 1 - (1-t)³
#[inline]
fn cubic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Quintic ease-out: f(t) = 1 - (1-t)⁵
#[inline]
fn quintic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv * inv
}

/// Exponential ease-out: f(t) = 1 - 2^(-10t)
#[inline]
fn exponential_ease_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

/// Quadratic ease-out: f(t) = 1 - (1-t)²
#[inline]
fn quad_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv
}

/// Quadratic ease-in-out, accelerating over the first half
#[inline]
fn quad_ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = 2.0 * t - 1.0;
        -0.5 * (u * (u - 2.0) - 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingType; 7] = [
        EasingType::None,
        EasingType::Linear,
        EasingType::Cubic,
        EasingType::Quintic,
        EasingType::EaseOut,
        EasingType::QuadOut,
        EasingType::QuadInOut,
    ];

    #[test]
    fn test_easing_boundaries() {
        for easing in ALL {
            if easing != EasingType::None {
                assert!(easing.apply(0.0).abs() < 0.001, "{:?} at t=0", easing);
            }
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in ALL.into_iter().filter(|e| *e != EasingType::None) {
            let mut prev = 0.0;
            for i in 0..=20 {
                let t = i as f64 / 20.0;
                let v = easing.apply(t);
                assert!(v + 1e-12 >= prev, "{:?} not monotonic at t={}", easing, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_quad_in_out_midpoint() {
        assert!((EasingType::QuadInOut.apply(0.5) - 0.5).abs() < 1e-9);
        assert!((EasingType::QuadInOut.apply(0.25) - 0.125).abs() < 1e-9);
        assert!((EasingType::QuadInOut.apply(0.75) - 0.875).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        assert_eq!(EasingType::Linear.apply(-3.0), 0.0);
        assert_eq!(EasingType::Linear.apply(7.0), 1.0);
        assert_eq!(EasingType::Cubic.apply(f64::NAN), 0.0);
    }

    #[test]
    fn test_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            easing: EasingType,
        }
        let w: Wrapper = toml::from_str("easing = \"quad-in-out\"").unwrap();
        assert_eq!(w.easing, EasingType::QuadInOut);
        let w: Wrapper = toml::from_str("easing = \"ease-out\"").unwrap();
        assert_eq!(w.easing, EasingType::EaseOut);
    }
}
