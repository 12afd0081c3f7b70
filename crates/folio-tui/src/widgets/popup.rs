use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::Theme;

const HELP: &[(&str, &str)] = &[
    ("j / k, ↑ / ↓", "Scroll"),
    ("Ctrl-d / Ctrl-u", "Half page"),
    ("Space, PgDn / PgUp", "Full page"),
    ("gg / G", "Top / bottom"),
    ("n / N, ] / [", "Next / previous section"),
    ("1-9", "Jump to section"),
    ("Tab / Shift-Tab", "Select card"),
    ("Enter", "Copy or open selected"),
    ("y / o", "Copy / open link"),
    ("m", "Section menu"),
    ("P", "Toggle particles"),
    ("F", "Toggle FPS"),
    ("q", "Quit"),
];

pub struct PopupWidget;

impl PopupWidget {
    /// Render the key binding overlay
    pub fn render_help(frame: &mut Frame, theme: &Theme) {
        let area = frame.area();

        let key_width = HELP.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
        let popup_width = 50u16.min(area.width.saturating_sub(4));
        let popup_height = (HELP.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        // Clear the background area
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.bg1));

        let mut lines: Vec<Line> = HELP
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {:>width$}  ", key, width = key_width),
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*desc, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(
            Line::from(Span::styled("Press any key to close", Style::default().fg(theme.muted)))
                .alignment(Alignment::Center),
        );

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
