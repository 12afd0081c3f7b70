//! Document layout
//!
//! Lays the portfolio out as one tall column of rows. Positions are kept in
//! document rows for rendering and converted to virtual pixels (one cell is
//! [`CELL_WIDTH`] x [`CELL_HEIGHT`]) for the visibility observers, so pixel
//! based tunables such as root margins keep their meaning.

use folio_core::observer::Rect as PxRect;
use folio_core::portfolio::{Block, BlockId, Portfolio};
use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const CELL_WIDTH: f64 = 8.0;
pub const CELL_HEIGHT: f64 = 16.0;

const MAX_COLUMN_WIDTH: u16 = 96;
const SIDE_MARGIN: u16 = 2;
const MIN_HERO_HEIGHT: u16 = 8;
/// Border plus one column of padding on each side of a block
const BLOCK_CHROME: u16 = 4;

/// Something the reveal animator watches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealTarget {
    Title(usize),
    Block(BlockId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Title,
    Subtitle,
    Meta,
    Body,
    Tags,
    /// Placeholder for a stat counter, rendered from the live counter
    Counter,
    Value,
    Link,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLine {
    pub kind: LineKind,
    pub text: String,
}

impl BlockLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BlockLayout {
    pub id: BlockId,
    /// First document row, including the top border
    pub top: u16,
    pub height: u16,
    pub lines: Vec<BlockLine>,
}

impl BlockLayout {
    pub fn bottom(&self) -> u16 {
        self.top.saturating_add(self.height)
    }
}

#[derive(Debug, Clone)]
pub struct SectionLayout {
    pub index: usize,
    pub top: u16,
    pub height: u16,
    pub title_row: u16,
    pub blocks: Vec<BlockLayout>,
}

impl SectionLayout {
    pub fn bottom(&self) -> u16 {
        self.top.saturating_add(self.height)
    }
}

/// Where every part of the document sits, for one terminal size
#[derive(Debug, Clone)]
pub struct DocumentLayout {
    /// Left edge of the content column
    pub column_x: u16,
    pub column_width: u16,
    pub hero_height: u16,
    pub sections: Vec<SectionLayout>,
    pub total_height: u16,
    viewport_width: u16,
}

impl DocumentLayout {
    pub fn compute(portfolio: &Portfolio, width: u16, viewport_height: u16) -> Self {
        let column_width = width
            .saturating_sub(SIDE_MARGIN * 2)
            .min(MAX_COLUMN_WIDTH)
            .max(BLOCK_CHROME + 1);
        let column_x = width.saturating_sub(column_width) / 2;
        let inner_width = column_width - BLOCK_CHROME;

        let hero_height = viewport_height.max(MIN_HERO_HEIGHT);
        let mut row = hero_height;
        let mut sections = Vec::with_capacity(portfolio.sections.len());

        for (index, section) in portfolio.sections.iter().enumerate() {
            let top = row;
            // Blank row, title, blank row. Rows past u16::MAX pile up on the
            // last row.
            let title_row = top.saturating_add(1);
            row = top.saturating_add(3);

            let mut blocks = Vec::with_capacity(section.blocks.len());
            for (b, block) in section.blocks.iter().enumerate() {
                let lines = block_lines(block, inner_width as usize);
                let height = u16::try_from(lines.len())
                    .unwrap_or(u16::MAX)
                    .saturating_add(2);
                blocks.push(BlockLayout {
                    id: BlockId::new(index, b),
                    top: row,
                    height,
                    lines,
                });
                row = row.saturating_add(height).saturating_add(1);
            }
            row = row.saturating_add(1);

            sections.push(SectionLayout {
                index,
                top,
                height: row - top,
                title_row,
                blocks,
            });
        }

        Self {
            column_x,
            column_width,
            hero_height,
            sections,
            total_height: row,
            viewport_width: width,
        }
    }

    pub fn max_scroll(&self, viewport_height: u16) -> u16 {
        self.total_height.saturating_sub(viewport_height)
    }

    pub fn section(&self, index: usize) -> Option<&SectionLayout> {
        self.sections.get(index)
    }

    pub fn block(&self, id: BlockId) -> Option<&BlockLayout> {
        self.sections.get(id.section)?.blocks.get(id.block)
    }

    /// Block covering a document row
    pub fn block_at(&self, row: u16) -> Option<BlockId> {
        let section = self
            .sections
            .iter()
            .find(|s| row >= s.top && row < s.bottom())?;
        section
            .blocks
            .iter()
            .find(|b| row >= b.top && row < b.bottom())
            .map(|b| b.id)
    }

    /// Area of a section in virtual pixels
    pub fn section_rect(&self, index: usize) -> Option<PxRect> {
        let section = self.sections.get(index)?;
        Some(rows_to_px(0, self.viewport_width, section.top, section.height))
    }

    pub fn target_rect(&self, target: RevealTarget) -> Option<PxRect> {
        match target {
            RevealTarget::Title(index) => {
                let section = self.sections.get(index)?;
                Some(rows_to_px(self.column_x, self.column_width, section.title_row, 1))
            }
            RevealTarget::Block(id) => {
                let block = self.block(id)?;
                Some(rows_to_px(self.column_x, self.column_width, block.top, block.height))
            }
        }
    }

    /// The visible part of the document in virtual pixels
    pub fn viewport_rect(&self, scroll: u16, viewport_height: u16) -> PxRect {
        rows_to_px(0, self.viewport_width, scroll, viewport_height)
    }
}

fn rows_to_px(x: u16, width: u16, top: u16, height: u16) -> PxRect {
    PxRect::new(
        x as f64 * CELL_WIDTH,
        top as f64 * CELL_HEIGHT,
        width as f64 * CELL_WIDTH,
        height as f64 * CELL_HEIGHT,
    )
}

/// Lines a block shows at the given inner width
pub fn block_lines(block: &Block, width: usize) -> Vec<BlockLine> {
    let mut lines = Vec::new();
    let push_wrapped = |lines: &mut Vec<BlockLine>, kind: LineKind, text: &str| {
        lines.extend(wrap_text(text, width).into_iter().map(|t| BlockLine::new(kind, t)));
    };

    match block {
        Block::Text { body } => push_wrapped(&mut lines, LineKind::Body, body),
        Block::Stat { label, value, target } => {
            match (target, value) {
                (Some(target), _) => {
                    lines.push(BlockLine::new(LineKind::Counter, format!("{}+", (*target).max(0))))
                }
                (None, Some(value)) => push_wrapped(&mut lines, LineKind::Value, value),
                (None, None) => {}
            }
            push_wrapped(&mut lines, LineKind::Meta, label);
        }
        Block::Card {
            title,
            subtitle,
            body,
            tags,
            link,
        } => {
            push_wrapped(&mut lines, LineKind::Title, title);
            if let Some(subtitle) = subtitle {
                push_wrapped(&mut lines, LineKind::Subtitle, subtitle);
            }
            if let Some(body) = body {
                push_wrapped(&mut lines, LineKind::Body, body);
            }
            if !tags.is_empty() {
                push_wrapped(&mut lines, LineKind::Tags, &tags.join(" · "));
            }
            if let Some(link) = link {
                push_wrapped(&mut lines, LineKind::Link, &format!("↗ {}", link));
            }
        }
        Block::Timeline {
            period,
            title,
            org,
            body,
        } => {
            push_wrapped(&mut lines, LineKind::Meta, period);
            push_wrapped(&mut lines, LineKind::Title, title);
            if let Some(org) = org {
                push_wrapped(&mut lines, LineKind::Subtitle, org);
            }
            if let Some(body) = body {
                push_wrapped(&mut lines, LineKind::Body, body);
            }
        }
        Block::Contact {
            label, value, link, ..
        } => {
            push_wrapped(&mut lines, LineKind::Meta, label);
            push_wrapped(&mut lines, LineKind::Value, value);
            if let Some(link) = link {
                push_wrapped(&mut lines, LineKind::Link, &format!("↗ {}", link));
            }
        }
    }

    if lines.is_empty() {
        lines.push(BlockLine::new(LineKind::Body, ""));
    }
    lines
}

/// Greedy word wrap by display width
///
/// Words wider than a line are broken between characters.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if current_width > 0 && current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
            continue;
        }

        if current_width > 0 {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if current_width + ch_width > width && current_width > 0 {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push(ch);
            current_width += ch_width;
        }
    }

    if current_width > 0 {
        lines.push(current);
    }
    lines
}

/// A clickable nav link in the nav bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub section: usize,
    pub x: u16,
    pub width: u16,
}

/// Place nav labels right-aligned in `area`; `None` when they do not fit
pub fn nav_links(labels: &[&str], area: Rect) -> Option<Vec<NavLink>> {
    // " label " with one space between links
    let widths: Vec<u16> = labels
        .iter()
        .map(|l| (l.width() as u16).saturating_add(2))
        .collect();
    let total = widths.iter().sum::<u16>() + widths.len().saturating_sub(1) as u16;
    if total > area.width {
        return None;
    }

    let mut x = area.x + area.width - total;
    let links = widths
        .into_iter()
        .enumerate()
        .map(|(section, width)| {
            let link = NavLink { section, x, width };
            x += width + 1;
            link
        })
        .collect();
    Some(links)
}

/// Where a run of document rows lands on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub area: Rect,
    /// Rows cut off above the screen area
    pub skip: u16,
    /// Rows cut off below the screen area
    pub cut: u16,
}

/// Maps document rows onto the content area for a scroll position
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub area: Rect,
    pub scroll: u16,
}

impl Viewport {
    pub fn new(area: Rect, scroll: u16) -> Self {
        Self { area, scroll }
    }

    /// Screen placement of `height` rows starting at document row `top`
    /// and spanning columns `x..x + width` of the content area
    pub fn place(&self, top: i32, height: u16, x: u16, width: u16) -> Option<Placement> {
        let view_top = self.scroll as i32;
        let view_bottom = view_top + self.area.height as i32;
        let bottom = top + height as i32;
        if height == 0 || bottom <= view_top || top >= view_bottom {
            return None;
        }

        let visible_top = top.max(view_top);
        let visible_bottom = bottom.min(view_bottom);
        let x = x.min(self.area.width);
        let width = width.min(self.area.width - x);
        Some(Placement {
            area: Rect::new(
                self.area.x + x,
                self.area.y + (visible_top - view_top) as u16,
                width,
                (visible_bottom - visible_top) as u16,
            ),
            skip: (visible_top - top) as u16,
            cut: (bottom - visible_bottom) as u16,
        })
    }

    /// Document row under a screen row, if it is inside the content area
    pub fn row_at(&self, screen_row: u16) -> Option<u16> {
        if screen_row < self.area.y || screen_row >= self.area.y + self.area.height {
            return None;
        }
        Some(self.scroll.saturating_add(screen_row - self.area.y))
    }
}
