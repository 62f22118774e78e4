//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and routes keyboard, paste and mouse events to the code input.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps until an event arrives, drains every
//! pending event, then draws once. Each widget event is dispatched to the
//! core reducer immediately and the resulting code is pushed back into the
//! widget as a prop before the next event is handled, so events queued in
//! one burst (fast typing, unbracketed paste) see each other's effects.

pub mod component;
pub mod components;
pub mod event;
pub mod focus;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::code::CodeValue;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{OtpEvent, OtpInput};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub otp: OtpInput,
}

impl TuiState {
    pub fn new(value_length: usize) -> Self {
        Self {
            otp: OtpInput::new(value_length),
        }
    }

    /// Push the owner's code and cell count into the widget as props.
    pub fn sync(&mut self, app: &App) {
        self.otp.set_value_length(app.value_length);
        self.otp.value = app.code.clone();
    }
}

/// How the session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Enter was pressed on a complete code.
    Submitted(CodeValue),
    Cancelled,
}

/// What the loop should do after one event.
#[derive(Debug, Clone, PartialEq)]
enum Flow {
    Continue,
    Exit(Outcome),
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

pub fn run(mut app: App) -> std::io::Result<Outcome> {
    let mut tui = TuiState::new(app.value_length);
    tui.sync(&app);
    tui.otp.autofocus();

    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new().and_then(|_guard| {
        let mut needs_redraw = true; // Force first frame

        loop {
            if needs_redraw {
                terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
                needs_redraw = false;
            }

            // Process first event + drain ALL pending events before next draw
            let mut next = poll_event_timeout(IDLE_POLL)?;
            while let Some(event) = next {
                needs_redraw = true;
                if let Flow::Exit(outcome) = handle_event(&mut app, &mut tui, &event) {
                    return Ok(outcome);
                }
                next = poll_event_immediate()?;
            }
        }
    });
    ratatui::restore();
    result
}

/// Routes one event to the host or the widget and syncs the code back as a prop.
fn handle_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Flow {
    match event {
        // Resize just needs a redraw
        TuiEvent::Resize => Flow::Continue,
        TuiEvent::Quit | TuiEvent::ForceQuit => match update(app, Action::Quit) {
            Effect::Quit => Flow::Exit(Outcome::Cancelled),
            _ => Flow::Continue,
        },
        TuiEvent::Submit => {
            if app.is_complete() {
                info!("Code submitted");
                Flow::Exit(Outcome::Submitted(app.code.clone()))
            } else {
                app.status_message = format!(
                    "Code incomplete: {}/{} digits",
                    app.code.filled(),
                    app.value_length
                );
                Flow::Continue
            }
        }
        TuiEvent::Clear => {
            update(app, Action::Clear);
            tui.sync(app);
            tui.otp.autofocus();
            Flow::Continue
        }
        _ => {
            if let Some(OtpEvent::Changed(value)) = tui.otp.handle_event(event) {
                debug!("Code changed: {}", value);
                if update(app, Action::CodeChanged(value)) == Effect::Completed {
                    info!("Code completed, waiting for confirmation");
                }
                tui.sync(app);
            }
            Flow::Continue
        }
    }
}
