//! Particle state and color palette

use rand::Rng;

/// 8-bit RGB color with a floating point alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

/// Colors a particle can be born with: blue, mint and peach at two strengths
pub const PALETTE: [Rgba; 5] = [
    Rgba::new(79, 140, 255, 0.4),
    Rgba::new(112, 193, 179, 0.4),
    Rgba::new(255, 169, 135, 0.4),
    Rgba::new(79, 140, 255, 0.2),
    Rgba::new(112, 193, 179, 0.2),
];

/// Color of the lines joining nearby particles
pub const LINK_COLOR: Rgba = Rgba::new(79, 140, 255, 1.0);

pub const MIN_OPACITY: f64 = 0.1;
pub const MAX_OPACITY: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    /// Radius in pixels
    pub size: f64,
    /// Always within [MIN_OPACITY, MAX_OPACITY]
    pub opacity: f64,
    /// Picked once from [`PALETTE`]
    pub color: Rgba,
}

impl Particle {
    /// Spawn a particle somewhere inside a `width` x `height` field
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64) -> Self {
        Self {
            x: rng.random::<f64>() * width,
            y: rng.random::<f64>() * height,
            size: rng.random::<f64>() * 2.0 + 1.0,
            speed_x: (rng.random::<f64>() - 0.5) * 0.5,
            speed_y: (rng.random::<f64>() - 0.5) * 0.5,
            opacity: (rng.random::<f64>() * 0.5 + 0.2).clamp(MIN_OPACITY, MAX_OPACITY),
            color: PALETTE[rng.random_range(0..PALETTE.len())],
        }
    }

    #[inline]
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Move back inside the field, reappearing at the opposite edge
    pub fn wrap(&mut self, width: f64, height: f64) {
        self.x = wrap_axis(self.x, width);
        self.y = wrap_axis(self.y, height);
    }

    #[inline]
    pub fn is_within(&self, width: f64, height: f64) -> bool {
        (0.0..=width).contains(&self.x) && (0.0..=height).contains(&self.y)
    }
}

#[inline]
fn wrap_axis(value: f64, max: f64) -> f64 {
    if value < 0.0 {
        max
    } else if value > max {
        0.0
    } else {
        value
    }
}
