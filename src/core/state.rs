//! # Application State
//!
//! The Value Owner: holds the code the widget edits. This module contains
//! domain state only, no TUI-specific types. Presentation state (focus,
//! selection, cell geometry) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── code: CodeValue          // single source of truth
//! ├── value_length: usize      // number of cells
//! ├── status_message: String   // status line text
//! └── completed: bool          // full code entered at least once
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::code::CodeValue;
use crate::core::config::ResolvedConfig;

pub const WELCOME_MESSAGE: &str = "Enter your one-time code";

pub struct App {
    pub code: CodeValue,
    pub value_length: usize,
    pub status_message: String,
    /// True once the code has been filled completely. Reset when it stops being complete.
    pub completed: bool,
}

impl App {
    pub fn new(value_length: usize) -> Self {
        Self {
            code: CodeValue::new(),
            value_length,
            status_message: String::from(WELCOME_MESSAGE),
            completed: false,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut app = Self::new(config.value_length);
        app.code = config.initial_value.clone().truncated(config.value_length);
        app.completed = app.code.is_complete(app.value_length);
        app
    }

    pub fn is_complete(&self) -> bool {
        self.code.is_complete(self.value_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{OtpConfig, resolve_with};

    #[test]
    fn test_app_new_defaults() {
        let app = App::new(6);
        assert!(app.code.is_empty());
        assert_eq!(app.value_length, 6);
        assert_eq!(app.status_message, WELCOME_MESSAGE);
        assert!(!app.completed);
    }

    #[test]
    fn test_from_config_truncates_initial_value() {
        let mut config = resolve_with(&OtpConfig::default(), &Default::default(), |_| None);
        config.initial_value = CodeValue::parse("123456");
        let app = App::from_config(&config);
        assert_eq!(app.code.to_string(), "1234");
        assert!(app.completed);
    }
}
