use ratatui::style::Color;

use folio_core::particles::Rgba;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub muted: Color,

    // Brand colors
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,

    // Semantic colors
    pub focus: Color,
    pub error: Color,
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        crate::themes::portfolio()
    }
}

impl Theme {
    /// `color` faded toward the page background
    pub fn fade(&self, color: Color, opacity: f64) -> Color {
        blend(color, self.bg0, opacity)
    }

    /// A particle color composited over the page background
    pub fn composite(&self, color: Rgba) -> Color {
        blend(Color::Rgb(color.r, color.g, color.b), self.bg0, color.a)
    }
}

/// Mix `fg` over `bg` with the given opacity
///
/// Only RGB colors can be mixed; for named colors the closer end wins.
pub fn blend(fg: Color, bg: Color, opacity: f64) -> Color {
    let t = if opacity.is_nan() { 0.0 } else { opacity.clamp(0.0, 1.0) };
    match (fg, bg) {
        (Color::Rgb(fr, fg_, fb), Color::Rgb(br, bg_, bb)) => {
            let mix = |f: u8, b: u8| (b as f64 + (f as f64 - b as f64) * t).round() as u8;
            Color::Rgb(mix(fr, br), mix(fg_, bg_), mix(fb, bb))
        }
        _ if t >= 0.5 => fg,
        _ => bg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        let fg = Color::Rgb(200, 100, 0);
        let bg = Color::Rgb(0, 0, 0);
        assert_eq!(blend(fg, bg, 1.0), fg);
        assert_eq!(blend(fg, bg, 0.0), bg);
        assert_eq!(blend(fg, bg, 0.5), Color::Rgb(100, 50, 0));
    }

    #[test]
    fn test_blend_clamps_and_handles_named_colors() {
        let fg = Color::Rgb(10, 10, 10);
        let bg = Color::Rgb(0, 0, 0);
        assert_eq!(blend(fg, bg, 3.0), fg);
        assert_eq!(blend(fg, bg, f64::NAN), bg);
        assert_eq!(blend(Color::Red, Color::Black, 0.8), Color::Red);
        assert_eq!(blend(Color::Red, Color::Black, 0.2), Color::Black);
    }

    #[test]
    fn test_composite_uses_particle_alpha() {
        let theme = Theme {
            bg0: Color::Rgb(0, 0, 0),
            ..Theme::default()
        };
        let color = theme.composite(Rgba::new(100, 200, 50, 0.5));
        assert_eq!(color, Color::Rgb(50, 100, 25));
    }
}
