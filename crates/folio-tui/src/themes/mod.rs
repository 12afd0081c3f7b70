//! Theme registry and loader
//!
//! Provides the built-in themes with user color overrides on top.

mod dracula;
mod gruvbox;
mod nord;
mod portfolio;

use folio_core::config::{ThemeColorOverrides, ThemeConfig};
use ratatui::style::Color;

use crate::theme::Theme;

pub use portfolio::default as portfolio;

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        // Full form: RRGGBB
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Load a theme by name from config
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = match config.name.to_lowercase().as_str() {
        "portfolio" => portfolio::default(),
        "nord" => nord::default(),
        "dracula" => dracula::default(),
        "gruvbox" | "gruvbox-dark" => gruvbox::dark(),
        "gruvbox-light" => gruvbox::light(),
        other => {
            tracing::warn!("Unknown theme '{}', using portfolio", other);
            portfolio::default()
        }
    };

    apply_overrides(base, &config.colors)
}

/// Apply user color overrides to a base theme
fn apply_overrides(mut theme: Theme, overrides: &ThemeColorOverrides) -> Theme {
    let slots: [(&Option<String>, &mut Color); 11] = [
        (&overrides.bg0, &mut theme.bg0),
        (&overrides.bg1, &mut theme.bg1),
        (&overrides.fg0, &mut theme.fg0),
        (&overrides.fg1, &mut theme.fg1),
        (&overrides.muted, &mut theme.muted),
        (&overrides.primary, &mut theme.primary),
        (&overrides.secondary, &mut theme.secondary),
        (&overrides.accent, &mut theme.accent),
        (&overrides.focus, &mut theme.focus),
        (&overrides.error, &mut theme.error),
        (&overrides.success, &mut theme.success),
    ];

    for (hex, slot) in slots {
        let Some(hex) = hex else { continue };
        match parse_hex_color(hex) {
            Some(color) => *slot = color,
            None => tracing::warn!("Ignoring invalid theme color '{}'", hex),
        }
    }

    theme
}

/// Get list of available theme names
pub fn available_themes() -> Vec<&'static str> {
    vec!["portfolio", "nord", "dracula", "gruvbox-dark", "gruvbox-light"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color_6digit() {
        let color = parse_hex_color("#4f8cff").unwrap();
        assert!(matches!(color, Color::Rgb(0x4f, 0x8c, 0xff)));
    }

    #[test]
    fn test_parse_hex_color_3digit() {
        let color = parse_hex_color("#f50").unwrap();
        assert!(matches!(color, Color::Rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_hex_color_no_hash() {
        let color = parse_hex_color("ff5500").unwrap();
        assert!(matches!(color, Color::Rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_hex_color_invalid() {
        assert!(parse_hex_color("invalid").is_none());
        assert!(parse_hex_color("#gg0000").is_none());
        assert!(parse_hex_color("#ééé").is_none());
    }

    #[test]
    fn test_load_theme_default() {
        let theme = load_theme(&ThemeConfig::default());
        assert!(matches!(theme.primary, Color::Rgb(0x4f, 0x8c, 0xff)));
        assert!(matches!(theme.secondary, Color::Rgb(0x70, 0xc1, 0xb3)));
        assert!(matches!(theme.accent, Color::Rgb(0xff, 0xa9, 0x87)));
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let config = ThemeConfig {
            name: "does-not-exist".to_string(),
            colors: ThemeColorOverrides::default(),
        };
        let theme = load_theme(&config);
        assert_eq!(theme.bg0, portfolio::default().bg0);
    }

    #[test]
    fn test_load_theme_with_override() {
        let config = ThemeConfig {
            name: "nord".to_string(),
            colors: ThemeColorOverrides {
                accent: Some("#ff0000".to_string()),
                focus: Some("not a color".to_string()),
                ..Default::default()
            },
        };
        let theme = load_theme(&config);
        assert!(matches!(theme.accent, Color::Rgb(255, 0, 0)));
        assert_eq!(theme.focus, nord::default().focus);
    }

    #[test]
    fn test_every_listed_theme_loads() {
        for name in available_themes() {
            let config = ThemeConfig {
                name: name.to_string(),
                colors: ThemeColorOverrides::default(),
            };
            let theme = load_theme(&config);
            assert!(matches!(theme.bg0, Color::Rgb(..)), "{}", name);
        }
    }
}
