use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    NextSection,
    PrevSection,
    GoToSection(usize), // 1-9 jump straight to a section
    FocusNext,          // Tab: focus next interactive block
    FocusPrev,          // Shift+Tab
    Activate,           // Enter: copy or open the focused block
    Copy,
    OpenLink,
    ToggleMenu,
    MenuDown,
    MenuUp,
    MenuSelect,
    ToggleParticles,
    ToggleFps,
    ShowHelp,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
        return Action::Quit;
    }

    match app.mode {
        // Any key exits help
        Mode::Help => return Action::ExitMode,
        Mode::Menu => return handle_menu_mode(key),
        Mode::Normal => {}
    }

    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,

        // Line scrolling
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Down, KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Up, KeyModifiers::NONE) => Action::ScrollUp,

        // Page scrolling
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ScrollHalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ScrollHalfPageUp,
        (KeyCode::Char('f'), KeyModifiers::CONTROL) => Action::ScrollPageDown,
        (KeyCode::Char('b'), KeyModifiers::CONTROL) => Action::ScrollPageUp,
        (KeyCode::PageDown, _) | (KeyCode::Char(' '), KeyModifiers::NONE) => Action::ScrollPageDown,
        (KeyCode::PageUp, _) => Action::ScrollPageUp,

        // Jump to top/bottom
        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            // gg requires double press
            if app.pending_key == Some('g') {
                Action::JumpToTop
            } else {
                Action::PendingG
            }
        }
        (KeyCode::Char('G'), _) => Action::JumpToBottom,
        (KeyCode::Home, _) => Action::JumpToTop,
        (KeyCode::End, _) => Action::JumpToBottom,

        // Sections
        (KeyCode::Char('n'), KeyModifiers::NONE) | (KeyCode::Char(']'), _) => Action::NextSection,
        (KeyCode::Char('N'), _) | (KeyCode::Char('p'), KeyModifiers::NONE) | (KeyCode::Char('['), _) => {
            Action::PrevSection
        }
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::GoToSection(c as usize - '1' as usize)
        }

        // Blocks
        (KeyCode::Tab, KeyModifiers::NONE) => Action::FocusNext,
        (KeyCode::BackTab, _) => Action::FocusPrev,
        (KeyCode::Enter, KeyModifiers::NONE) => Action::Activate,
        (KeyCode::Char('y'), KeyModifiers::NONE) => Action::Copy,
        (KeyCode::Char('o'), KeyModifiers::NONE) => Action::OpenLink,

        // Chrome
        (KeyCode::Char('m'), KeyModifiers::NONE) => Action::ToggleMenu,
        (KeyCode::Char('P'), _) => Action::ToggleParticles,
        (KeyCode::Char('F'), _) => Action::ToggleFps,
        (KeyCode::Char('?'), _) => Action::ShowHelp,
        (KeyCode::Esc, KeyModifiers::NONE) => Action::ExitMode,

        _ => Action::None,
    }
}

/// Handle key events while the section menu is open
fn handle_menu_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Action::MenuDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MenuUp,
        KeyCode::Enter => Action::MenuSelect,
        KeyCode::Char(c @ '1'..='9') => Action::GoToSection(c as usize - '1' as usize),
        KeyCode::Char('m') | KeyCode::Char('q') | KeyCode::Esc => Action::ExitMode,
        _ => Action::None,
    }
}
