use ratatui::{
    layout::Rect,
    symbols::Marker,
    widgets::canvas::{Canvas, Circle, Context, Line, Points},
    Frame,
};

use folio_core::particles::{Rgba, Surface};

use crate::app::App;
use crate::theme::Theme;

/// Braille dots are coarse and thin, so faint colors get a floor
const PARTICLE_ALPHA_FLOOR: f64 = 0.4;
const LINK_ALPHA_FLOOR: f64 = 0.15;
/// Size of one Braille dot in virtual pixels (a cell holds 2x4 dots)
const DOT_SIZE: f64 = 4.0;

/// Particle field drawn on a Braille canvas behind the document
pub struct ParticleFieldWidget;

impl ParticleFieldWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let theme = &app.theme;
        let (width, height) = app.particles.size();
        let running = app.particles.is_running();

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .background_color(theme.bg0)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                if running {
                    let mut surface = CanvasSurface::new(ctx, theme, height);
                    app.particles.draw(&mut surface);
                }
            });

        frame.render_widget(canvas, area);
    }
}

/// [`Surface`] over a ratatui canvas context
///
/// The simulator's y axis points down, the canvas' up.
pub struct CanvasSurface<'a, 'b> {
    ctx: &'a mut Context<'b>,
    theme: &'a Theme,
    height: f64,
}

impl<'a, 'b> CanvasSurface<'a, 'b> {
    pub fn new(ctx: &'a mut Context<'b>, theme: &'a Theme, height: f64) -> Self {
        Self { ctx, theme, height }
    }

    fn flip(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (x, self.height - y)
    }
}

fn lift(color: Rgba, floor: f64) -> Rgba {
    color.with_alpha(floor + (1.0 - floor) * color.a.clamp(0.0, 1.0))
}

impl Surface for CanvasSurface<'_, '_> {
    fn clear(&mut self) {
        // Every canvas render starts from an empty grid
    }

    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: Rgba, _glow: f64, _glow_color: Rgba) {
        let color = self.theme.composite(lift(color, PARTICLE_ALPHA_FLOOR));
        let (x, y) = self.flip(center);
        if radius >= DOT_SIZE {
            self.ctx.draw(&Circle { x, y, radius, color });
        }
        self.ctx.draw(&Points {
            coords: &[(x, y)],
            color,
        });
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, _width: f64) {
        let color = self.theme.composite(lift(color, LINK_ALPHA_FLOOR));
        let (x1, y1) = self.flip(from);
        let (x2, y2) = self.flip(to);
        self.ctx.draw(&Line { x1, y1, x2, y2, color });
    }
}
