//! Gruvbox theme
//! https://github.com/morhetz/gruvbox

use ratatui::style::Color;
use crate::theme::Theme;

/// Gruvbox dark (medium contrast)
pub fn dark() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x28, 0x28),
        bg1: Color::Rgb(0x3c, 0x38, 0x36),
        fg0: Color::Rgb(0xd4, 0xbe, 0x98),
        fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
        muted: Color::Rgb(0x92, 0x83, 0x74),
        primary: Color::Rgb(0x7d, 0xae, 0xa3),
        secondary: Color::Rgb(0x89, 0xb4, 0x82),
        accent: Color::Rgb(0xe7, 0x8a, 0x4e),
        focus: Color::Rgb(0xd8, 0xa6, 0x57),
        error: Color::Rgb(0xea, 0x69, 0x62),
        success: Color::Rgb(0xa9, 0xb6, 0x65),
    }
}

/// Gruvbox light (medium contrast)
pub fn light() -> Theme {
    Theme {
        bg0: Color::Rgb(0xfb, 0xf1, 0xc7),
        bg1: Color::Rgb(0xeb, 0xdb, 0xb2),
        fg0: Color::Rgb(0x3c, 0x38, 0x36),
        fg1: Color::Rgb(0x28, 0x28, 0x28),
        muted: Color::Rgb(0x92, 0x83, 0x74),
        primary: Color::Rgb(0x07, 0x66, 0x78),
        secondary: Color::Rgb(0x42, 0x7b, 0x58),
        accent: Color::Rgb(0xaf, 0x3a, 0x03),
        focus: Color::Rgb(0xb5, 0x76, 0x14),
        error: Color::Rgb(0x9d, 0x00, 0x06),
        success: Color::Rgb(0x79, 0x74, 0x0e),
    }
}
