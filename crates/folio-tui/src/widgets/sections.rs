use std::time::Instant;

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph},
    Frame,
};

use folio_core::reveal::RevealFrame;

use crate::app::App;
use crate::layout::{BlockLayout, LineKind, RevealTarget, SectionLayout, Viewport, CELL_HEIGHT};
use crate::theme::{blend, Theme};

/// Section titles and their blocks, faded and slid in by the reveal animator
pub struct SectionsWidget;

impl SectionsWidget {
    pub fn render(frame: &mut Frame, app: &App, now: Instant) {
        let viewport = app.viewport();
        for section in &app.layout.sections {
            render_title(frame, app, &viewport, section, now);
            for block in &section.blocks {
                render_block(frame, app, &viewport, block, now);
            }
        }
    }
}

/// Remaining slide offset in whole rows
fn offset_rows(reveal: RevealFrame) -> i32 {
    (reveal.offset.max(0.0) / CELL_HEIGHT).round() as i32
}

fn render_title(frame: &mut Frame, app: &App, viewport: &Viewport, section: &SectionLayout, now: Instant) {
    let reveal = app.reveal_frame(RevealTarget::Title(section.index), now);
    if reveal.opacity <= 0.0 {
        return;
    }
    let Some(title) = app.portfolio.sections.get(section.index) else {
        return;
    };

    let top = section.title_row as i32 + offset_rows(reveal);
    let Some(placement) = viewport.place(top, 1, app.layout.column_x, app.layout.column_width) else {
        return;
    };

    let theme = &app.theme;
    let number = format!("{:02}  ", section.index + 1);
    let used = number.chars().count() + title.title.chars().count() + 1;
    let rule = "─".repeat((app.layout.column_width as usize).saturating_sub(used));
    let active = app.active_section() == Some(section.index);
    let rule_color = if active { theme.primary } else { theme.muted };

    let line = Line::from(vec![
        Span::styled(number, Style::default().fg(theme.fade(theme.accent, reveal.opacity))),
        Span::styled(
            title.title.clone(),
            Style::default()
                .fg(theme.fade(theme.fg0, reveal.opacity))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(rule, Style::default().fg(theme.fade(rule_color, reveal.opacity))),
    ]);
    frame.render_widget(Paragraph::new(line), placement.area);
}

fn render_block(frame: &mut Frame, app: &App, viewport: &Viewport, layout: &BlockLayout, now: Instant) {
    let reveal = app.reveal_frame(RevealTarget::Block(layout.id), now);
    if reveal.opacity <= 0.0 {
        return;
    }

    let top = layout.top as i32 + offset_rows(reveal);
    let Some(placement) = viewport.place(top, layout.height, app.layout.column_x, app.layout.column_width)
    else {
        return;
    };

    let theme = &app.theme;
    let opacity = reveal.opacity;
    let focused = app.focused == Some(layout.id);

    let mut borders = Borders::ALL;
    if placement.skip > 0 {
        borders.remove(Borders::TOP);
    }
    if placement.cut > 0 {
        borders.remove(Borders::BOTTOM);
    }

    let ripple = app.ripple_strength(layout.id, now);
    let border = if focused { theme.focus } else { theme.muted };
    let border = blend(theme.accent, border, ripple);

    let mut card = Block::default()
        .borders(borders)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.fade(border, opacity)))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(blend(theme.bg1, theme.bg0, opacity)));

    if focused && placement.skip == 0 {
        if let Some(hint) = action_hint(app, layout) {
            card = card.title_top(
                Line::from(Span::styled(
                    format!(" {} ", hint),
                    Style::default().fg(theme.focus).add_modifier(Modifier::BOLD),
                ))
                .right_aligned(),
            );
        }
    }

    let inner = card.inner(placement.area);
    frame.render_widget(Clear, placement.area);
    frame.render_widget(card, placement.area);
    if inner.is_empty() {
        return;
    }

    let lines: Vec<Line> = layout
        .lines
        .iter()
        .map(|line| {
            let text = match line.kind {
                LineKind::Counter => app.counter_text(layout.id).unwrap_or_else(|| line.text.clone()),
                _ => line.text.clone(),
            };
            Line::from(Span::styled(text, line_style(theme, line.kind, opacity)))
        })
        .collect();

    // The hidden top border row accounts for one of the skipped rows
    let skip = placement.skip.saturating_sub(1);
    frame.render_widget(Paragraph::new(lines).scroll((skip, 0)), inner);
}

fn action_hint(app: &App, layout: &BlockLayout) -> Option<&'static str> {
    let block = app.portfolio.block(layout.id)?;
    if block.copy_text().is_some() {
        Some("⏎ copy")
    } else if block.link().is_some() {
        Some("⏎ open")
    } else {
        None
    }
}

fn line_style(theme: &Theme, kind: LineKind, opacity: f64) -> Style {
    let (color, modifier): (Color, Modifier) = match kind {
        LineKind::Title => (theme.fg0, Modifier::BOLD),
        LineKind::Subtitle => (theme.secondary, Modifier::empty()),
        LineKind::Meta => (theme.muted, Modifier::empty()),
        LineKind::Body => (theme.fg1, Modifier::empty()),
        LineKind::Tags => (theme.accent, Modifier::empty()),
        LineKind::Counter | LineKind::Value => (theme.primary, Modifier::BOLD),
        LineKind::Link => (theme.secondary, Modifier::UNDERLINED),
    };
    Style::default()
        .fg(theme.fade(color, opacity))
        .add_modifier(modifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use folio_core::{AppConfig, BlockId, Portfolio};
    use ratatui::{backend::TestBackend, layout::Rect, Terminal};

    fn app(now: Instant) -> App {
        let mut config = AppConfig::default();
        config.particles.enabled = false;
        config.scroll.smooth_enabled = false;
        let mut app = App::new(config, Portfolio::sample(), now);
        app.resize(100, 40);
        app
    }

    fn draw(app: &App, now: Instant) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|frame| SectionsWidget::render(frame, app, now))
            .unwrap();
        terminal
    }

    fn block_area(viewport: &Viewport, app: &App, layout: &BlockLayout) -> Option<Rect> {
        viewport
            .place(layout.top as i32, layout.height, app.layout.column_x, app.layout.column_width)
            .map(|p| p.area)
    }

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
    fn test_unrevealed_sections_are_not_drawn() {
        let now = Instant::now();
        let mut app = app(now);
        app.scroll_lines(app.layout.hero_height as i32 - 30);
        let terminal = draw(&app, now);
        assert!(!screen(&terminal).contains("About Me"));
    }

    #[test]
    fn test_revealed_section_shows_title_and_counter() {
        let now = Instant::now();
        let mut app = app(now);
        app.go_to_section(0, now);
        app.tick(now);

        let settled = now + Duration::from_secs(3);
        app.tick(settled);
        let text = screen(&draw(&app, settled));
        assert!(text.contains("01  About Me"));
        assert!(text.contains("42+"));
        assert!(text.contains("Projects shipped"));
    }

    #[test]
    fn test_focused_block_shows_action_hint() {
        let now = Instant::now();
        let mut app = app(now);
        let contact = app.portfolio.sections.len() - 1;
        app.go_to_section(contact, now);
        app.tick(now);
        app.focused = Some(BlockId::new(contact, 1));

        let settled = now + Duration::from_secs(3);
        app.tick(settled);
        assert!(screen(&draw(&app, settled)).contains("⏎ copy"));
    }

    #[test]
    fn test_clipped_block_drops_top_border() {
        let now = Instant::now();
        let mut app = app(now);
        app.go_to_section(0, now);
        app.tick(now);
        let settled = now + Duration::from_secs(3);
        app.tick(settled);

        let block = app.layout.sections[0].blocks[0].clone();
        app.scroll_lines((block.top + 1) as i32 - app.scroll_position() as i32);
        app.tick(settled);

        let viewport = app.viewport();
        let area = block_area(&viewport, &app, &block).unwrap();
        let terminal = draw(&app, settled);
        let buffer = terminal.backend().buffer();
        assert_ne!(buffer[(area.x, area.y)].symbol(), "╭");
        assert_eq!(buffer[(area.x, area.y)].symbol(), "│");
    }
}
