//! Dracula theme
//! https://draculatheme.com/

use ratatui::style::Color;
use crate::theme::Theme;

/// Dracula default theme
pub fn default() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x2a, 0x36), // Background
        bg1: Color::Rgb(0x44, 0x47, 0x5a), // Current Line
        fg0: Color::Rgb(0xf8, 0xf8, 0xf2), // Foreground
        fg1: Color::Rgb(0xff, 0xff, 0xff),
        muted: Color::Rgb(0x62, 0x72, 0xa4), // Comment
        primary: Color::Rgb(0xbd, 0x93, 0xf9), // Purple
        secondary: Color::Rgb(0x8b, 0xe9, 0xfd), // Cyan
        accent: Color::Rgb(0xff, 0xb8, 0x6c), // Orange
        focus: Color::Rgb(0xff, 0x79, 0xc6), // Pink
        error: Color::Rgb(0xff, 0x55, 0x55), // Red
        success: Color::Rgb(0x50, 0xfa, 0x7b), // Green
    }
}
