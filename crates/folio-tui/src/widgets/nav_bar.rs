use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;

/// Label of the collapsed nav toggle, drawn in the last columns of the bar
pub const MENU_TOGGLE: &str = " ≡ Menu ";

pub struct NavBarWidget;

impl NavBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let base = Style::default().fg(theme.fg1).bg(theme.bg1);
        frame.render_widget(Paragraph::new("").style(base), area);

        let brand = Paragraph::new(Line::from(Span::styled(
            format!(" {}", app.brand()),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )))
        .style(base);
        frame.render_widget(brand, area);

        let active = app.active_section();
        match app.nav_links() {
            Some(links) => {
                let labels = app.nav_labels();
                for link in links {
                    let label = labels.get(link.section).copied().unwrap_or_default();
                    let style = if active == Some(link.section) {
                        Style::default()
                            .fg(theme.primary)
                            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                    } else {
                        Style::default().fg(theme.fg1)
                    };
                    let x = area.x + link.x;
                    if x >= area.right() {
                        continue;
                    }
                    let width = link.width.min(area.right() - x);
                    let link_area = Rect::new(x, area.y, width, 1);
                    frame.render_widget(
                        Paragraph::new(Span::styled(format!(" {} ", label), style)).style(base),
                        link_area,
                    );
                }
            }
            None => {
                let width = (MENU_TOGGLE.chars().count() as u16).min(area.width);
                let toggle_area = Rect::new(area.right() - width, area.y, width, 1);
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        MENU_TOGGLE,
                        Style::default()
                            .fg(theme.primary)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .style(base),
                    toggle_area,
                );
            }
        }
    }

    /// Dropdown of sections for the collapsed nav bar
    pub fn render_menu(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let area = app.menu_area().intersection(frame.area());
        if area.is_empty() {
            return;
        }
        frame.render_widget(Clear, area);

        let active = app.active_section();
        let items: Vec<ListItem> = app
            .nav_labels()
            .into_iter()
            .enumerate()
            .map(|(i, label)| {
                let mut style = Style::default().fg(theme.fg0);
                if active == Some(i) {
                    style = style.fg(theme.primary);
                }
                if i == app.menu_cursor {
                    style = style.bg(theme.focus).fg(theme.bg0).add_modifier(Modifier::BOLD);
                }
                ListItem::new(Line::from(Span::styled(format!("  {}  ", label), style)))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.primary))
                .style(Style::default().bg(theme.bg1)),
        );
        frame.render_widget(list, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use folio_core::{AppConfig, Portfolio};
    use ratatui::{backend::TestBackend, Terminal};

    fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    fn render(app: &App) -> Terminal<TestBackend> {
        let (w, h) = (app.content_area().width, app.content_area().height + 2);
        let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
        terminal
            .draw(|frame| {
                NavBarWidget::render(frame, Rect::new(0, 0, w, 1), app);
                if app.mode == crate::app::Mode::Menu {
                    NavBarWidget::render_menu(frame, app);
                }
            })
            .unwrap();
        terminal
    }

    #[test]
    fn test_wide_bar_shows_brand_and_links() {
        let mut app = App::new(AppConfig::default(), Portfolio::sample(), Instant::now());
        app.resize(120, 30);
        let terminal = render(&app);
        let bar = row_text(&terminal, 0);
        assert!(bar.starts_with(" Alex Morgan"));
        for label in app.nav_labels() {
            assert!(bar.contains(label), "missing {label} in {bar:?}");
        }
        assert!(!bar.contains("Menu"));
    }

    #[test]
    fn test_compact_bar_collapses_into_menu() {
        let mut app = App::new(AppConfig::default(), Portfolio::sample(), Instant::now());
        app.resize(60, 30);
        let terminal = render(&app);
        assert!(row_text(&terminal, 0).trim_end().ends_with("≡ Menu"));

        app.toggle_menu();
        let terminal = render(&app);
        let first_entry = row_text(&terminal, 2);
        assert!(first_entry.contains(app.nav_labels()[0]));
    }
}
