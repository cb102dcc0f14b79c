//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::InputMode;
use crate::router::Route;

/// One line of the action log
#[derive(Debug, Clone, PartialEq)]
pub struct JournalLine {
    pub index: usize,
    /// Local wall-clock time, `HH:MM:SS`
    pub at: String,
    pub description: String,
    /// The state on screen was produced by this entry
    pub current: bool,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Router
    pub location: String,
    pub route: Route,
    pub can_go_back: bool,
    pub can_go_forward: bool,

    // Ping view
    pub is_pinging: bool,

    // Counter view
    pub counter: i64,

    // User view
    pub lookup_username: Option<String>,
    pub current_user: Option<String>,
    pub lookup_pending: bool,
    pub lookup_error: Option<String>,
    pub input: String,
    pub cursor_position: usize,
    pub input_mode: InputMode,

    // Action log
    pub show_log: bool,
    pub journal: Vec<JournalLine>,
    pub time_travelling: bool,

    // Popups
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        use crate::constants::DEFAULT_USERNAME;
        RenderState {
            location: String::from("/"),
            route: Route::Ping,
            can_go_back: false,
            can_go_forward: false,
            is_pinging: false,
            counter: 0,
            lookup_username: None,
            current_user: None,
            lookup_pending: false,
            lookup_error: None,
            input: String::from(DEFAULT_USERNAME),
            cursor_position: DEFAULT_USERNAME.len(),
            input_mode: InputMode::Normal,
            show_log: true,
            journal: Vec::new(),
            time_travelling: false,
            show_help: false,
        }
    }
}
