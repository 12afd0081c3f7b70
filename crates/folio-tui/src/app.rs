use std::time::{Duration, Instant};

use folio_core::anim::progress;
use folio_core::fps::FpsMeter;
use folio_core::particles::{FrameContext, ParticleSimulator, PointerState};
use folio_core::reveal::{ObservedElement, RevealAnimator, RevealFrame};
use folio_core::scroll_spy::ScrollSpy;
use folio_core::typing::TypingAnimation;
use folio_core::{AppConfig, BlockId, Portfolio};
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use crate::event::CopyResult;
use crate::input::Action;
use crate::layout::{nav_links, DocumentLayout, NavLink, RevealTarget, Viewport, CELL_HEIGHT, CELL_WIDTH};
use crate::scroll::ScrollAnimator;
use crate::theme::Theme;
use crate::themes::load_theme;
use crate::widgets::MENU_TOGGLE;

/// How long transient status messages stay up
const STATUS_DURATION: Duration = Duration::from_secs(2);
/// Highlight pulse on an activated block
const RIPPLE_DURATION: Duration = Duration::from_millis(600);
/// Rows taken by the nav bar and the status bar
const CHROME_ROWS: u16 = 2;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Section menu of the collapsed nav bar is open
    Menu,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    expires: Instant,
}

#[derive(Debug, Clone, Copy)]
struct Ripple {
    block: BlockId,
    start: Instant,
}

/// Side effect an action asks the event loop to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Copy(String),
    Open(String),
}

/// Application state
pub struct App {
    pub config: AppConfig,
    pub theme: Theme,
    pub portfolio: Portfolio,
    pub layout: DocumentLayout,
    pub mode: Mode,
    /// First key of a two-key sequence (gg)
    pub pending_key: Option<char>,
    pub should_quit: bool,
    pub focused: Option<BlockId>,
    pub menu_cursor: usize,
    pub show_fps: bool,
    pub typing: TypingAnimation,
    pub particles: ParticleSimulator,
    scroll: ScrollAnimator,
    reveal: RevealAnimator<RevealTarget>,
    spy: ScrollSpy<usize>,
    pointer: PointerState,
    fps: FpsMeter,
    status: Option<StatusMessage>,
    ripple: Option<Ripple>,
    last_frame: Option<Instant>,
    width: u16,
    height: u16,
}

impl App {
    pub fn new(config: AppConfig, portfolio: Portfolio, now: Instant) -> Self {
        let (width, height) = (80, 24);
        let content_height = height - CHROME_ROWS;
        let layout = DocumentLayout::compute(&portfolio, width, content_height);

        let mut reveal = RevealAnimator::new(config.reveal.clone(), config.counter.clone());
        reveal.observe((0..portfolio.sections.len()).map(|i| ObservedElement::new(RevealTarget::Title(i))));
        reveal.observe(portfolio.block_ids().map(|id| {
            let target = portfolio.block(id).and_then(|b| b.counter_target());
            ObservedElement::with_counter(RevealTarget::Block(id), target)
        }));

        let mut spy = ScrollSpy::new(&config.scroll_spy);
        spy.observe_sections(0..portfolio.sections.len());

        let typing = if config.typing.phrases.is_empty() {
            TypingAnimation::new(&portfolio.hero.phrases, &config.typing, now)
        } else {
            TypingAnimation::new(&config.typing.phrases, &config.typing, now)
        };

        let mut particles = ParticleSimulator::new(
            config.particles.clone(),
            width as f64 * CELL_WIDTH,
            content_height as f64 * CELL_HEIGHT,
        );
        if config.particles.enabled {
            particles.start();
        }

        Self {
            theme: load_theme(&config.ui.theme),
            scroll: ScrollAnimator::new(config.scroll.clone()),
            show_fps: config.ui.show_fps,
            config,
            portfolio,
            layout,
            mode: Mode::Normal,
            pending_key: None,
            should_quit: false,
            focused: None,
            menu_cursor: 0,
            typing,
            particles,
            reveal,
            spy,
            pointer: PointerState::default(),
            fps: FpsMeter::new(now),
            status: None,
            ripple: None,
            last_frame: None,
            width,
            height,
        }
    }

    /// Adopt a new terminal size
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let content_height = self.content_height();
        self.layout = DocumentLayout::compute(&self.portfolio, width, content_height);
        self.particles.resize(
            width as f64 * CELL_WIDTH,
            content_height as f64 * CELL_HEIGHT,
        );
        if self.mode == Mode::Menu && !self.is_compact() {
            self.mode = Mode::Normal;
        }
        tracing::debug!("Resized to {}x{}, document is {} rows", width, height, self.layout.total_height);
    }

    /// Rows available to the document between nav bar and status bar
    pub fn content_height(&self) -> u16 {
        self.height.saturating_sub(CHROME_ROWS).max(1)
    }

    pub fn content_area(&self) -> Rect {
        Rect::new(0, 1, self.width, self.content_height())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.content_area(), self.scroll.current_scroll())
    }

    pub fn max_scroll(&self) -> u16 {
        self.layout.max_scroll(self.content_height())
    }

    pub fn scroll_position(&self) -> u16 {
        self.scroll.current_scroll()
    }

    fn nav_offset_rows(&self) -> u16 {
        (self.config.scroll.nav_offset_px.max(0.0) / CELL_HEIGHT).round() as u16
    }

    /// Advance every animation to `now`
    pub fn tick(&mut self, now: Instant) {
        let max_scroll = self.max_scroll();
        self.scroll.update(max_scroll, now);
        self.typing.advance(now);
        self.observe(now);
        self.reveal.advance(now);
        self.step_particles(now);

        if self.status.as_ref().is_some_and(|s| now >= s.expires) {
            self.status = None;
        }
        if self
            .ripple
            .is_some_and(|r| now.saturating_duration_since(r.start) >= RIPPLE_DURATION)
        {
            self.ripple = None;
        }
        self.fps.frame(now);
    }

    fn observe(&mut self, now: Instant) {
        let viewport = self
            .layout
            .viewport_rect(self.scroll.current_scroll(), self.content_height());
        let layout = &self.layout;

        let revealed = self.reveal.check(viewport, |target| layout.target_rect(target), now);
        if !revealed.is_empty() {
            tracing::trace!("Revealed {} elements", revealed.len());
        }

        let previous = self.spy.active();
        let active = self.spy.check(viewport, |index| layout.section_rect(index));
        if active != previous {
            tracing::debug!("Active section: {:?}", active);
        }
    }

    fn step_particles(&mut self, now: Instant) {
        let elapsed = self
            .last_frame
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        self.last_frame = Some(now);
        if self.particles.is_running() {
            self.particles.update(&FrameContext::new(self.pointer, elapsed));
        }
    }

    /// Whether the next frame should come at animation speed
    pub fn needs_animation(&self, now: Instant) -> bool {
        self.scroll.needs_update()
            || self.reveal.needs_update(now)
            || self.particles.is_running()
            || self.ripple.is_some()
    }

    // --- Rendering accessors ---

    pub fn reveal_frame(&self, target: RevealTarget, now: Instant) -> RevealFrame {
        self.reveal.frame(target, now)
    }

    /// Current counter text of a stat block, once it has been revealed
    pub fn counter_text(&self, id: BlockId) -> Option<String> {
        self.reveal.counter(RevealTarget::Block(id)).map(|c| c.display())
    }

    pub fn active_section(&self) -> Option<usize> {
        self.spy.active()
    }

    /// Ripple strength on a block, 1.0 right after activation fading to 0
    pub fn ripple_strength(&self, id: BlockId, now: Instant) -> f64 {
        match self.ripple {
            Some(ripple) if ripple.block == id => 1.0 - progress(ripple.start, now, RIPPLE_DURATION),
            _ => 0.0,
        }
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn fps(&self) -> Option<u32> {
        self.fps.fps()
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn set_status(&mut self, text: impl Into<String>, kind: StatusKind, now: Instant) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
            expires: now + STATUS_DURATION,
        });
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }

    // --- Navigation ---

    pub fn nav_labels(&self) -> Vec<&str> {
        self.portfolio.sections.iter().map(|s| s.nav_label()).collect()
    }

    /// Brand on the left of the nav bar
    pub fn brand(&self) -> &str {
        &self.portfolio.hero.name
    }

    fn nav_link_area(&self) -> Rect {
        let brand = self.brand().width() as u16 + 2;
        Rect::new(brand, 0, self.width.saturating_sub(brand + 1), 1)
    }

    /// Nav link positions, `None` when the nav is collapsed into a menu
    pub fn nav_links(&self) -> Option<Vec<NavLink>> {
        if self.width < self.config.ui.compact_width {
            return None;
        }
        nav_links(&self.nav_labels(), self.nav_link_area())
    }

    pub fn is_compact(&self) -> bool {
        self.nav_links().is_none()
    }

    /// Screen area of the open section menu
    pub fn menu_area(&self) -> Rect {
        let labels = self.nav_labels();
        let inner = labels.iter().map(|l| l.width() as u16).max().unwrap_or(0) + 4;
        let width = (inner + 2).min(self.width);
        let height = (labels.len() as u16 + 2).min(self.content_height());
        Rect::new(self.width.saturating_sub(width), 1, width, height)
    }

    pub fn scroll_down(&mut self) {
        let max = self.max_scroll();
        self.scroll.scroll_down(max);
    }

    pub fn scroll_up(&mut self) {
        let max = self.max_scroll();
        self.scroll.scroll_up(max);
    }

    pub fn scroll_lines(&mut self, delta: i32) {
        let max = self.max_scroll();
        self.scroll.scroll_by(delta, max);
    }

    pub fn jump_to_top(&mut self, now: Instant) {
        let max = self.max_scroll();
        self.scroll.scroll_to(0, max, now);
    }

    pub fn jump_to_bottom(&mut self, now: Instant) {
        let max = self.max_scroll();
        self.scroll.scroll_to(max, max, now);
    }

    /// Smooth-scroll so the section starts just below the nav offset
    pub fn go_to_section(&mut self, index: usize, now: Instant) {
        let Some(section) = self.layout.section(index) else {
            return;
        };
        let target = section.top.saturating_sub(self.nav_offset_rows());
        let max = self.max_scroll();
        self.scroll.scroll_to(target, max, now);
        self.mode = Mode::Normal;
    }

    /// Section the scroll target is currently in, `None` while on the hero
    fn section_at_target(&self) -> Option<usize> {
        let row = self.scroll.target_scroll() + self.nav_offset_rows();
        self.layout
            .sections
            .iter()
            .rposition(|s| s.top <= row)
    }

    pub fn next_section(&mut self, now: Instant) {
        let next = self.section_at_target().map_or(0, |i| i + 1);
        if next < self.layout.sections.len() {
            self.go_to_section(next, now);
        } else {
            self.jump_to_bottom(now);
        }
    }

    pub fn prev_section(&mut self, now: Instant) {
        match self.section_at_target() {
            Some(0) | None => self.jump_to_top(now),
            Some(i) => self.go_to_section(i - 1, now),
        }
    }

    // --- Blocks ---

    fn interactive_blocks(&self) -> Vec<BlockId> {
        self.portfolio
            .block_ids()
            .filter(|id| self.portfolio.block(*id).is_some_and(|b| b.is_interactive()))
            .collect()
    }

    pub fn focus_next(&mut self, now: Instant) {
        self.cycle_focus(1, now);
    }

    pub fn focus_prev(&mut self, now: Instant) {
        self.cycle_focus(-1, now);
    }

    fn cycle_focus(&mut self, step: isize, now: Instant) {
        let blocks = self.interactive_blocks();
        if blocks.is_empty() {
            return;
        }
        let len = blocks.len() as isize;
        let next = match self.focused.and_then(|id| blocks.iter().position(|b| *b == id)) {
            Some(current) => (current as isize + step).rem_euclid(len),
            None if step > 0 => 0,
            None => len - 1,
        };
        let id = blocks[next as usize];
        self.focused = Some(id);
        self.ensure_visible(id, now);
    }

    fn ensure_visible(&mut self, id: BlockId, now: Instant) {
        let Some(block) = self.layout.block(id) else {
            return;
        };
        let view_top = self.scroll.target_scroll();
        let view_bottom = view_top + self.content_height();
        if block.top >= view_top && block.bottom() <= view_bottom {
            return;
        }
        let target = block.top.saturating_sub(self.nav_offset_rows());
        let max = self.max_scroll();
        self.scroll.scroll_to(target, max, now);
    }

    /// Copy or open the focused block
    pub fn activate(&mut self, now: Instant) -> Option<Effect> {
        let Some(id) = self.focused else {
            self.set_status("Press Tab to select a card", StatusKind::Info, now);
            return None;
        };
        let block = self.portfolio.block(id)?;
        let effect = match (block.copy_text(), block.link()) {
            (Some(text), _) => Some(Effect::Copy(text.to_string())),
            (None, Some(link)) => Some(Effect::Open(link.to_string())),
            (None, None) => None,
        };
        self.ripple = Some(Ripple { block: id, start: now });
        effect
    }

    pub fn copy_focused(&mut self, now: Instant) -> Option<Effect> {
        let text = self
            .focused
            .and_then(|id| self.portfolio.block(id))
            .and_then(|b| b.copy_text())
            .map(str::to_string);
        match text {
            Some(text) => {
                if let Some(id) = self.focused {
                    self.ripple = Some(Ripple { block: id, start: now });
                }
                Some(Effect::Copy(text))
            }
            None => {
                self.set_status("Nothing to copy here", StatusKind::Info, now);
                None
            }
        }
    }

    pub fn open_focused(&mut self, now: Instant) -> Option<Effect> {
        let link = self
            .focused
            .and_then(|id| self.portfolio.block(id))
            .and_then(|b| b.link())
            .map(str::to_string);
        match link {
            Some(link) => Some(Effect::Open(link)),
            None => {
                self.set_status("No link here", StatusKind::Info, now);
                None
            }
        }
    }

    /// Report the outcome of a clipboard write
    ///
    /// Either way the text ended up somewhere, so the user sees "Copied!".
    pub fn on_copy_result(&mut self, result: &CopyResult, now: Instant) {
        match result {
            CopyResult::Copied { tool } => tracing::debug!("Clipboard write via {}", tool),
            CopyResult::Fallback { error, .. } => {
                tracing::warn!("Clipboard command failed ({}), used terminal escape", error)
            }
        }
        self.set_status("Copied!", StatusKind::Success, now);
    }

    // --- Pointer ---

    /// Track the mouse in particle-field pixels
    pub fn pointer_moved(&mut self, column: u16, row: u16) {
        let area = self.content_area();
        if row < area.y || row >= area.y + area.height {
            self.pointer.leave();
            return;
        }
        let x = (column as f64 + 0.5) * CELL_WIDTH;
        let y = ((row - area.y) as f64 + 0.5) * CELL_HEIGHT;
        self.pointer.move_to(x, y);
    }

    pub fn pointer_left(&mut self) {
        self.pointer.leave();
    }

    /// Handle a left click: nav links, menu entries, or blocks
    pub fn click(&mut self, column: u16, row: u16, now: Instant) -> Option<Effect> {
        if self.mode == Mode::Menu {
            let menu = self.menu_area();
            let inside = column >= menu.x && row > menu.y && row + 1 < menu.y + menu.height;
            if inside {
                let index = (row - menu.y - 1) as usize;
                self.go_to_section(index, now);
            } else {
                self.mode = Mode::Normal;
            }
            return None;
        }

        if row == 0 {
            match self.nav_links() {
                Some(links) => {
                    if let Some(link) = links
                        .iter()
                        .find(|l| column >= l.x && column < l.x + l.width)
                    {
                        self.go_to_section(link.section, now);
                    }
                }
                None if column >= self.width.saturating_sub(MENU_TOGGLE.chars().count() as u16) => {
                    self.toggle_menu()
                }
                None => {}
            }
            return None;
        }

        let doc_row = self.viewport().row_at(row)?;
        let id = self.layout.block_at(doc_row)?;
        self.focused = Some(id);
        self.activate(now)
    }

    // --- Chrome ---

    pub fn toggle_menu(&mut self) {
        self.mode = match self.mode {
            Mode::Menu => Mode::Normal,
            _ => {
                self.menu_cursor = self.active_section().unwrap_or(0);
                Mode::Menu
            }
        };
    }

    pub fn menu_down(&mut self) {
        let len = self.portfolio.sections.len();
        if len > 0 {
            self.menu_cursor = (self.menu_cursor + 1) % len;
        }
    }

    pub fn menu_up(&mut self) {
        let len = self.portfolio.sections.len();
        if len > 0 {
            self.menu_cursor = (self.menu_cursor + len - 1) % len;
        }
    }

    pub fn toggle_particles(&mut self, now: Instant) {
        if self.particles.is_running() {
            self.particles.stop();
            self.set_status("Particles off", StatusKind::Info, now);
        } else {
            self.particles.start();
            self.set_status("Particles on", StatusKind::Info, now);
        }
    }

    /// Apply an input action, returning any effect for the event loop
    pub fn perform(&mut self, action: Action, now: Instant) -> Option<Effect> {
        // Clear pending key on any action except PendingG
        if action != Action::PendingG {
            self.clear_pending_key();
        }

        let viewport_height = self.content_height();
        let max = self.max_scroll();
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.scroll_down(),
            Action::ScrollUp => self.scroll_up(),
            Action::ScrollHalfPageDown => self.scroll.scroll_half_page_down(viewport_height, max),
            Action::ScrollHalfPageUp => self.scroll.scroll_half_page_up(viewport_height, max),
            Action::ScrollPageDown => self.scroll.scroll_full_page_down(viewport_height, max),
            Action::ScrollPageUp => self.scroll.scroll_full_page_up(viewport_height, max),
            Action::JumpToTop => self.jump_to_top(now),
            Action::JumpToBottom => self.jump_to_bottom(now),
            Action::PendingG => self.pending_key = Some('g'),
            Action::NextSection => self.next_section(now),
            Action::PrevSection => self.prev_section(now),
            Action::GoToSection(index) => self.go_to_section(index, now),
            Action::FocusNext => self.focus_next(now),
            Action::FocusPrev => self.focus_prev(now),
            Action::Activate => return self.activate(now),
            Action::Copy => return self.copy_focused(now),
            Action::OpenLink => return self.open_focused(now),
            Action::ToggleMenu => self.toggle_menu(),
            Action::MenuDown => self.menu_down(),
            Action::MenuUp => self.menu_up(),
            Action::MenuSelect => self.go_to_section(self.menu_cursor, now),
            Action::ToggleParticles => self.toggle_particles(now),
            Action::ToggleFps => self.show_fps = !self.show_fps,
            Action::ShowHelp => self.mode = Mode::Help,
            Action::ExitMode => {
                if self.mode == Mode::Normal {
                    self.focused = None;
                }
                self.mode = Mode::Normal;
            }
            Action::None => {}
        }
        None
    }
}
