//! View-local state - the lookup form buffer and panel toggles
//!
//! Nothing here goes through the store; it is the equivalent of component
//! state and is not part of the journal.

use crate::messages::ui_events::InputMode;
use crate::router::Route;

pub struct ViewState {
    pub input: String,
    pub cursor_position: usize,
    pub input_mode: InputMode,
    pub show_help: bool,
    pub show_log: bool,
    /// Route parameter the form was last synced to
    synced_param: Option<String>,
}

impl ViewState {
    pub fn new(default_username: &str) -> Self {
        ViewState {
            input: default_username.to_string(),
            cursor_position: default_username.len(),
            input_mode: InputMode::Normal,
            show_help: false,
            show_log: true,
            synced_param: None,
        }
    }

    /// Follow the `/user/:id` parameter: a new parameter replaces the form
    /// value, anything else leaves the form alone.
    pub fn sync_route(&mut self, route: &Route) {
        let param = route.user_param();
        if param == self.synced_param.as_deref() {
            return;
        }
        if let Some(id) = param {
            self.input = id.to_string();
            self.cursor_position = self.input.len();
        }
        self.synced_param = param.map(str::to_string);
    }

    /// Username to look up, if the form holds one
    pub fn submission(&self) -> Option<String> {
        let name = self.input.trim();
        (!name.is_empty()).then(|| name.to_string())
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.input.len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position = self.input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.len() {
            self.cursor_position = self.input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(self.input.len());
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if self.cursor_position <= self.input.len() {
            self.input.insert(self.cursor_position, c);
            self.cursor_position += c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let prev = self.input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.input.remove(prev);
            self.cursor_position = prev;
        }
    }

    // ========================
    // Panels
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    pub fn toggle_log(&mut self) {
        self.show_log = !self.show_log;
    }
}
