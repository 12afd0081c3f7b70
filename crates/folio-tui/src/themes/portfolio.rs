//! Portfolio theme, the default
//!
//! Dark slate page with the blue / mint / peach brand colors the particle
//! field uses.

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        bg0: Color::Rgb(0x0f, 0x17, 0x2a),
        bg1: Color::Rgb(0x1e, 0x29, 0x3b),
        fg0: Color::Rgb(0xe2, 0xe8, 0xf0),
        fg1: Color::Rgb(0xf8, 0xfa, 0xfc),
        muted: Color::Rgb(0x94, 0xa3, 0xb8),
        primary: Color::Rgb(0x4f, 0x8c, 0xff),
        secondary: Color::Rgb(0x70, 0xc1, 0xb3),
        accent: Color::Rgb(0xff, 0xa9, 0x87),
        focus: Color::Rgb(0x4f, 0x8c, 0xff),
        error: Color::Rgb(0xf8, 0x71, 0x71),
        success: Color::Rgb(0x70, 0xc1, 0xb3),
    }
}
