use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode, StatusKind};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let (status_text, status_color) = match app.status() {
            Some(msg) => {
                let color = match msg.kind {
                    StatusKind::Info => theme.fg0,
                    StatusKind::Success => theme.success,
                    StatusKind::Error => theme.error,
                };
                (format!(" {}", msg.text), color)
            }
            None => {
                let mode_str = match app.mode {
                    Mode::Normal => "",
                    Mode::Menu => "MENU | ",
                    Mode::Help => "HELP | ",
                };
                let section = app
                    .active_section()
                    .and_then(|i| app.portfolio.sections.get(i))
                    .map_or("Home", |s| s.title.as_str());
                (
                    format!(" {}{} | {}%", mode_str, section, scroll_percent(app)),
                    theme.fg1,
                )
            }
        };

        let mut help_hint = String::from(" j/k:scroll n/N:section Tab:select ?:help q:quit ");
        if app.show_fps {
            let fps = app.fps().map_or_else(|| "--".to_string(), |f| f.to_string());
            help_hint = format!(" {} fps |{}", fps, help_hint);
        }

        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(status_color).bg(theme.bg1)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg1)),
            Span::styled(help_hint, Style::default().fg(theme.muted).bg(theme.bg1)),
        ]);

        frame.render_widget(Paragraph::new(line).style(Style::default().bg(theme.bg1)), area);
    }
}

fn scroll_percent(app: &App) -> u16 {
    let max = app.max_scroll();
    if max == 0 {
        return 100;
    }
    ((app.scroll_position() as u32 * 100) / max as u32) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use folio_core::{AppConfig, Portfolio};
    use ratatui::{backend::TestBackend, Terminal};

    fn bar(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 1)).unwrap();
        terminal
            .draw(|frame| StatusBarWidget::render(frame, Rect::new(0, 0, 100, 1), app))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..100).map(|x| buffer[(x, 0)].symbol().to_string()).collect()
    }

    fn app() -> App {
        let mut app = App::new(AppConfig::default(), Portfolio::sample(), Instant::now());
        app.resize(100, 30);
        app
    }

    #[test]
    fn test_idle_bar_shows_position_and_hints() {
        let app = app();
        let text = bar(&app);
        assert!(text.starts_with(" Home | 0%"));
        assert!(text.trim_end().ends_with("q:quit"));
    }

    #[test]
    fn test_status_message_replaces_position() {
        let mut app = app();
        app.set_status("Copied!", StatusKind::Success, Instant::now());
        assert!(bar(&app).starts_with(" Copied!"));
    }

    #[test]
    fn test_fps_shown_when_enabled() {
        let mut app = app();
        app.show_fps = true;
        assert!(bar(&app).contains("fps"));
    }
}
