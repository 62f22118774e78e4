//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::code::CodeValue;
use crate::tui::components::OtpInput;
use crate::tui::focus::{CellId, FocusController};

/// A focus request seen by `RecordingFocus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusRequest {
    Focus(usize),
    Blur,
}

/// A focus controller that logs every request it receives.
#[derive(Debug, Default)]
pub struct RecordingFocus {
    current: Option<CellId>,
    pub requests: Vec<FocusRequest>,
}

impl FocusController for RecordingFocus {
    fn focus(&mut self, cell: CellId) {
        self.requests.push(FocusRequest::Focus(cell.index()));
        self.current = Some(cell);
    }

    fn blur(&mut self) {
        self.requests.push(FocusRequest::Blur);
        self.current = None;
    }

    fn focused(&self) -> Option<CellId> {
        self.current
    }
}

/// Creates an unfocused widget showing `value`.
pub fn otp(value: &str, value_length: usize) -> OtpInput<RecordingFocus> {
    let mut input = OtpInput::with_focus(value_length, RecordingFocus::default());
    input.value = CodeValue::parse(value);
    input
}

/// Creates a widget with cell `index` focused and the request log cleared.
pub fn focused_otp(value: &str, value_length: usize, index: usize) -> OtpInput<RecordingFocus> {
    let mut input = otp(value, value_length);
    input.focus_cell(index);
    assert_eq!(input.focused_index(), Some(index), "setup focus was redirected");
    input.focus_controller_mut().requests.clear();
    input
}
