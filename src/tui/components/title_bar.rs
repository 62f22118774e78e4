//! # TitleBar Component
//!
//! Top status line showing progress through the code and the owner's status.
//!
//! ## Design Decisions
//!
//! ### Stateless Component
//!
//! TitleBar is purely presentational: it receives all data as props and has
//! no internal state.
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.code.filled(), app.value_length, &app.status_message);
//! title_bar.render(frame, area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Complete**: `"otp-input [4/4] ✓ | Code complete. Press Enter to confirm"`
//! 2. **Status message**: `"otp-input [2/4] | 2/4 digits"`
//! 3. **No status**: `"otp-input [0/4]"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Top status line.
///
/// # Props
///
/// - `filled`: Number of digits entered
/// - `value_length`: Number of cells
/// - `status_message`: Owner status text
pub struct TitleBar {
    pub filled: usize,
    pub value_length: usize,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(filled: usize, value_length: usize, status_message: &str) -> Self {
        Self {
            filled,
            value_length,
            status_message: status_message.to_string(),
        }
    }

    fn is_complete(&self) -> bool {
        self.value_length > 0 && self.filled == self.value_length
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw(format!(
            "otp-input [{}/{}]",
            self.filled, self.value_length
        ))];
        if self.is_complete() {
            spans.push(Span::styled(" ✓", Style::default().fg(Color::Green)));
        }
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
