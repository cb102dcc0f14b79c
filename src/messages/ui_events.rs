//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::router::Route;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Navigation
    GoTo(Route),
    Back,
    Forward,
    /// Follow the quick link at this index on the user view
    OpenLink(usize),

    // Ping view
    Ping,

    // Counter view
    Increment,
    IncrementIfOdd,

    // Lookup form
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    SubmitLookup,

    // Time travel
    Undo,
    Redo,

    // Popups / panels
    ToggleLog,
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    route: &Route,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('z') => return Some(UiEvent::Undo),
            KeyCode::Char('y') => return Some(UiEvent::Redo),
            _ => {}
        }
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    if input_mode == InputMode::Editing {
        return match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Enter => Some(UiEvent::SubmitLookup),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        };
    }

    // Keys shared by every view
    match key.code {
        KeyCode::Char('q') => return Some(UiEvent::Quit),
        KeyCode::Char('?') => return Some(UiEvent::ToggleHelp),
        KeyCode::Char('l') => return Some(UiEvent::ToggleLog),
        KeyCode::Char('1') => return Some(UiEvent::GoTo(Route::Ping)),
        KeyCode::Char('2') => return Some(UiEvent::GoTo(Route::Counter)),
        KeyCode::Char('3') => return Some(UiEvent::GoTo(Route::User(None))),
        KeyCode::Char('[') => return Some(UiEvent::Back),
        KeyCode::Char(']') => return Some(UiEvent::Forward),
        _ => {}
    }

    match route {
        Route::Ping => match key.code {
            KeyCode::Char('p') | KeyCode::Enter => Some(UiEvent::Ping),
            _ => None,
        },
        Route::Counter => match key.code {
            KeyCode::Char('+') | KeyCode::Char('i') => Some(UiEvent::Increment),
            KeyCode::Char('o') => Some(UiEvent::IncrementIfOdd),
            _ => None,
        },
        Route::User(_) => match key.code {
            KeyCode::Char('e') => Some(UiEvent::StartEditing),
            KeyCode::Char('s') | KeyCode::Enter => Some(UiEvent::SubmitLookup),
            KeyCode::Char('a') => Some(UiEvent::OpenLink(0)),
            KeyCode::Char('b') => Some(UiEvent::OpenLink(1)),
            _ => None,
        },
        Route::NotFound(_) => None,
    }
}
