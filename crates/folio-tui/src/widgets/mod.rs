mod hero;
mod nav_bar;
mod particles;
mod popup;
mod sections;
mod status_bar;

use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub use hero::HeroWidget;
pub use nav_bar::{NavBarWidget, MENU_TOGGLE};
pub use particles::{CanvasSurface, ParticleFieldWidget};
pub use popup::PopupWidget;
pub use sections::SectionsWidget;
pub use status_bar::StatusBarWidget;

use crate::app::{App, Mode};

/// Draw one frame of the whole page
pub fn render_app(frame: &mut Frame, app: &App, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Nav bar
            Constraint::Min(1),    // Document
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    // Back to front: particles, then the document over them
    ParticleFieldWidget::render(frame, chunks[1], app);
    HeroWidget::render(frame, chunks[1], app);
    SectionsWidget::render(frame, app, now);

    NavBarWidget::render(frame, chunks[0], app);
    StatusBarWidget::render(frame, chunks[2], app);

    match app.mode {
        Mode::Menu => NavBarWidget::render_menu(frame, app),
        Mode::Help => PopupWidget::render_help(frame, &app.theme),
        Mode::Normal => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use folio_core::{AppConfig, Portfolio};
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_full_frame_renders_chrome() {
        let now = Instant::now();
        let mut app = App::new(AppConfig::default(), Portfolio::sample(), now);
        app.resize(100, 30);
        app.tick(now);

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render_app(frame, &app, now)).unwrap();

        let buffer = terminal.backend().buffer();
        let row = |y: u16| -> String { (0..100).map(|x| buffer[(x, y)].symbol().to_string()).collect() };
        assert!(row(0).contains("Alex Morgan"));
        assert!(row(29).contains("q:quit"));
    }

    #[test]
    fn test_help_overlay() {
        let now = Instant::now();
        let mut app = App::new(AppConfig::default(), Portfolio::sample(), now);
        app.resize(100, 30);
        app.mode = Mode::Help;

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render_app(frame, &app, now)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Press any key to close"));
    }
}
