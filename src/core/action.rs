//! # Actions
//!
//! Everything that can happen to the code becomes an `Action`.
//! The widget emits a new value? That's `Action::CodeChanged(value)`.
//! User presses Ctrl+U? That's `Action::Clear`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns an `Effect` for the adapter to carry out.
//! No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::core::code::CodeValue;
use crate::core::state::{App, WELCOME_MESSAGE};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The widget produced a new value.
    CodeChanged(CodeValue),
    /// Reset the code to empty.
    Clear,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The code just became complete.
    Completed,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::CodeChanged(value) => {
            app.code = value.truncated(app.value_length);
            let complete = app.is_complete();
            let just_completed = complete && !app.completed;
            app.completed = complete;

            if just_completed {
                info!("Code complete ({} digits)", app.value_length);
                app.status_message = String::from("Code complete. Press Enter to confirm");
                Effect::Completed
            } else {
                app.status_message = format!("{}/{} digits", app.code.filled(), app.value_length);
                Effect::None
            }
        }
        Action::Clear => {
            app.code = CodeValue::new();
            app.completed = false;
            app.status_message = String::from(WELCOME_MESSAGE);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_changed_updates_value() {
        let mut app = App::new(4);
        let effect = update(&mut app, Action::CodeChanged(CodeValue::parse("12")));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.code.to_string(), "12");
        assert_eq!(app.status_message, "2/4 digits");
    }

    #[test]
    fn test_completion_fires_once() {
        let mut app = App::new(4);
        let effect = update(&mut app, Action::CodeChanged(CodeValue::parse("9876")));
        assert_eq!(effect, Effect::Completed);
        assert!(app.completed);

        // Same complete value again is not a new completion
        let effect = update(&mut app, Action::CodeChanged(CodeValue::parse("9875")));
        assert_eq!(effect, Effect::None);

        // Clearing a cell and refilling it completes again
        update(&mut app, Action::CodeChanged(CodeValue::parse("98 5")));
        assert!(!app.completed);
        let effect = update(&mut app, Action::CodeChanged(CodeValue::parse("9815")));
        assert_eq!(effect, Effect::Completed);
    }

    #[test]
    fn test_value_never_exceeds_length() {
        let mut app = App::new(4);
        update(&mut app, Action::CodeChanged(CodeValue::parse("123456")));
        assert_eq!(app.code.len(), 4);
    }

    #[test]
    fn test_clear() {
        let mut app = App::new(4);
        update(&mut app, Action::CodeChanged(CodeValue::parse("1234")));
        let effect = update(&mut app, Action::Clear);
        assert_eq!(effect, Effect::None);
        assert!(app.code.is_empty());
        assert!(!app.completed);
        assert_eq!(app.status_message, WELCOME_MESSAGE);
    }

    #[test]
    fn test_quit() {
        let mut app = App::new(4);
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
