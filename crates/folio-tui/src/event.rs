use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

/// Lines moved per mouse wheel notch
const WHEEL_LINES: i32 = 3;

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    animation_tick: Duration,
}

/// Result of an async clipboard write
#[derive(Debug)]
pub enum CopyResult {
    /// A system clipboard command accepted the text
    Copied { tool: &'static str },
    /// No clipboard command worked; the text still has to reach the
    /// terminal through an OSC 52 escape
    Fallback { text: String, error: String },
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self::with_animation_fps(tick_rate_ms, 60)
    }

    /// Handler that polls at `animation_fps` while something is moving
    pub fn with_animation_fps(tick_rate_ms: u64, animation_fps: u32) -> Self {
        let animation_tick = if animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis((1000 / animation_fps as u64).max(1))
        };
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms.max(1)),
            animation_tick,
        }
    }

    /// Poll for the next event at the idle tick rate
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll for the next event at the animation frame rate
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.animation_tick)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            Ok(translate(event::read()?))
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

fn translate(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) => {
            // Only handle key press events, ignore release events
            // (crossterm 0.27+ sends release events on some systems)
            if key.kind == KeyEventKind::Press {
                Some(AppEvent::Key(key))
            } else {
                None
            }
        }
        Event::Mouse(mouse) => translate_mouse(mouse),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::FocusLost => Some(AppEvent::PointerLeft),
        _ => None,
    }
}

fn translate_mouse(mouse: MouseEvent) -> Option<AppEvent> {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            Some(AppEvent::PointerMoved(mouse.column, mouse.row))
        }
        MouseEventKind::Down(MouseButton::Left) => Some(AppEvent::Click(mouse.column, mouse.row)),
        MouseEventKind::ScrollDown => Some(AppEvent::Wheel(WHEEL_LINES)),
        MouseEventKind::ScrollUp => Some(AppEvent::Wheel(-WHEEL_LINES)),
        _ => None,
    }
}

/// Application events
#[derive(Debug, PartialEq, Eq)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Pointer moved to (column, row)
    PointerMoved(u16, u16),
    /// Pointer left the terminal window
    PointerLeft,
    /// Left click at (column, row)
    Click(u16, u16),
    /// Mouse wheel, positive scrolls down
    Wheel(i32),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}
