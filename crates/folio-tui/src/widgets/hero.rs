use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

const CURSOR: &str = "▍";
const HINT: &str = "↓ scroll · n next section · ? help";

/// Landing screen: name, typing phrase and tagline over the particle field
pub struct HeroWidget;

impl HeroWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let height = app.layout.hero_height;
        let viewport = app.viewport();
        let Some(placement) = viewport.place(0, height, 0, area.width) else {
            return;
        };

        let lines = hero_lines(app);
        let padding = height.saturating_sub(lines.len() as u16) / 2;
        let mut text = vec![Line::default(); padding as usize];
        text.extend(lines);

        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .scroll((placement.skip, 0));
        frame.render_widget(paragraph, placement.area);
    }
}

fn hero_lines(app: &App) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let hero = &app.portfolio.hero;
    let mut lines = Vec::new();

    if let Some(greeting) = &hero.greeting {
        lines.push(Line::from(Span::styled(
            greeting.clone(),
            Style::default().fg(theme.fg1),
        )));
    }
    lines.push(Line::from(Span::styled(
        hero.name.clone(),
        Style::default()
            .fg(theme.fg0)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled(
            app.typing.text().to_string(),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(CURSOR, Style::default().fg(theme.accent)),
    ]));
    if let Some(tagline) = &hero.tagline {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            tagline.clone(),
            Style::default().fg(theme.secondary),
        )));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(HINT, Style::default().fg(theme.muted))));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use folio_core::{AppConfig, Portfolio};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_hero_shows_name_and_tagline() {
        let mut config = AppConfig::default();
        config.particles.enabled = false;
        let mut app = App::new(config, Portfolio::sample(), Instant::now());
        app.resize(80, 24);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| HeroWidget::render(frame, app.content_area(), &app))
            .unwrap();
        let text = screen(&terminal);
        assert!(text.contains("Alex Morgan"));
        assert!(text.contains("Hi, I'm"));
        assert!(text.contains(CURSOR));
    }

    #[test]
    fn test_hero_scrolled_away_draws_nothing() {
        let mut config = AppConfig::default();
        config.particles.enabled = false;
        config.scroll.smooth_enabled = false;
        let mut app = App::new(config, Portfolio::sample(), Instant::now());
        app.resize(80, 24);
        let now = Instant::now();
        app.go_to_section(1, now);
        app.tick(now);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| HeroWidget::render(frame, app.content_area(), &app))
            .unwrap();
        assert!(!screen(&terminal).contains("Alex Morgan"));
    }
}
