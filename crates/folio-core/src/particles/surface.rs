//! Drawing surface abstraction for the particle field

use super::particle::Rgba;

/// 2D target the simulator draws into each frame
pub trait Surface {
    /// Erase everything drawn by the previous frame
    fn clear(&mut self);

    /// Filled circle with a soft glow of `glow` pixels in `glow_color`
    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: Rgba, glow: f64, glow_color: Rgba);

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, width: f64);
}

/// A draw call captured by [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        center: (f64, f64),
        radius: f64,
        color: Rgba,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: Rgba,
    },
}

/// Surface that remembers the last frame's draw calls
///
/// Used for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circles(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: Rgba, _glow: f64, _glow_color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, _width: f64) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }
}
