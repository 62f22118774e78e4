//! # OtpInput Component
//!
//! A fixed-length numeric code split across N single-digit cells.
//!
//! ## Responsibilities
//!
//! - Derive one display slot per cell from the code value prop
//! - Validate every cell edit against the single-digit pattern
//! - Accept a full-length paste into any cell as a replacement of the whole code
//! - Route focus between cells (arrows, Backspace, fill order, Tab, mouse)
//! - Emit the new code on every accepted edit
//!
//! ## State Management
//!
//! The code value is a prop owned by the application state; the widget only
//! proposes new values through `OtpEvent::Changed`. Focus lives in a
//! `FocusController`, addressed by `CellId`. Whether the focused cell's
//! content is selected is internal state.
//!
//! Invalid input is never an error: it is dropped without emitting an event
//! and without moving focus.

mod cells;
mod edit;

pub use edit::{Edit, compose};

use log::debug;
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::code::{CodeValue, Digit, Slot};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::focus::{CellArena, CellId, FocusController, FocusRing};

use cells::CellCache;

pub const CELL_WIDTH: u16 = 5;
pub const CELL_HEIGHT: u16 = 3;
const CELL_GAP: u16 = 1;
/// Container border, top and bottom.
const VERTICAL_OVERHEAD: u16 = 2;

/// High-level events emitted by the OtpInput
#[derive(Debug, Clone, PartialEq)]
pub enum OtpEvent {
    /// The code changed. Either a single cell was replaced or a full code was pasted.
    Changed(CodeValue),
}

/// Keys with navigation meaning inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Backspace,
    Other,
}

/// Whether a key's default editing behaviour should still run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key was consumed; no edit follows.
    Handled,
    /// The platform edit for this key should be applied.
    Default,
}

/// Segmented one-time-code input.
///
/// # Props
///
/// - `value`: Current code (from App state)
///
/// # State
///
/// - `arena`/`focus`: addressable cells and the focus cursor
/// - `selected`: whole content of the focused cell is selected
/// - `cells`: memoized cell slots
/// - `cell_areas`: screen rectangles from the last render, for hit testing
pub struct OtpInput<F: FocusController = FocusRing> {
    /// Current code (Prop)
    pub value: CodeValue,
    value_length: usize,
    arena: CellArena,
    focus: F,
    selected: bool,
    cells: CellCache,
    cell_areas: Vec<Rect>,
}

impl OtpInput<FocusRing> {
    pub fn new(value_length: usize) -> Self {
        Self::with_focus(value_length, FocusRing::new())
    }
}

impl<F: FocusController> OtpInput<F> {
    pub fn with_focus(value_length: usize, focus: F) -> Self {
        Self {
            value: CodeValue::new(),
            value_length,
            arena: CellArena::new(value_length),
            focus,
            selected: false,
            cells: CellCache::default(),
            cell_areas: Vec::new(),
        }
    }

    /// Change the number of cells. The value is cut to fit and focus is
    /// dropped if its cell no longer exists.
    pub fn set_value_length(&mut self, value_length: usize) {
        if value_length == self.value_length {
            return;
        }
        self.value_length = value_length;
        self.value = std::mem::take(&mut self.value).truncated(value_length);
        self.arena = CellArena::new(value_length);
        self.cell_areas.clear();
        if self.focused_index().is_some_and(|i| i >= value_length) {
            self.focus.blur();
        }
    }

    pub fn focus_controller(&self) -> &F {
        &self.focus
    }

    pub fn focus_controller_mut(&mut self) -> &mut F {
        &mut self.focus
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focus.focused().map(CellId::index)
    }

    /// True when the focused cell's whole content is selected, so the next
    /// typed character replaces it.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// The slots shown in each cell. Always `value_length` long.
    pub fn cells(&mut self) -> &[Slot] {
        self.cells.get(&self.value, self.value_length)
    }

    fn cell(&mut self, index: usize) -> Slot {
        self.cells
            .get(&self.value, self.value_length)
            .get(index)
            .copied()
            .flatten()
    }

    fn cell_text(&mut self, index: usize) -> String {
        self.cell(index).map(|d| d.to_string()).unwrap_or_default()
    }

    /// Focus the first cell, as when the widget is first shown.
    pub fn autofocus(&mut self) {
        self.focus_cell(0);
    }

    /// Request focus for cell `index` and run the focus handler there.
    pub fn focus_cell(&mut self, index: usize) {
        if let Some(id) = self.arena.get(index) {
            self.focus.focus(id);
            self.handle_focus(index);
        }
    }

    /// Runs when cell `index` receives focus.
    ///
    /// A cell can't hold focus while the cell before it is empty: focus is
    /// sent back to the earliest empty cell of the run. Otherwise the
    /// cell's content is selected so one keystroke overtypes it.
    pub fn handle_focus(&mut self, index: usize) {
        if index >= self.value_length {
            return;
        }
        let mut index = index;
        while index > 0 && self.cell(index - 1).is_none() {
            index -= 1;
            if let Some(id) = self.arena.get(index) {
                debug!("Focus redirected to empty cell {}", index);
                self.focus.focus(id);
            }
        }
        self.selected = true;
    }

    /// Runs on key down in cell `index`, before any edit.
    pub fn handle_key(&mut self, key: Key, index: usize) -> KeyOutcome {
        match key {
            Key::Right | Key::Down => {
                if index + 1 < self.value_length {
                    self.focus_cell(index + 1);
                }
                KeyOutcome::Handled
            }
            Key::Left | Key::Up => {
                if let Some(prev) = index.checked_sub(1) {
                    self.focus_cell(prev);
                }
                KeyOutcome::Handled
            }
            Key::Backspace if self.cell(index).is_none() => {
                if let Some(prev) = index.checked_sub(1) {
                    self.focus_cell(prev);
                }
                KeyOutcome::Handled
            }
            Key::Backspace | Key::Other => {
                self.selected = true;
                KeyOutcome::Default
            }
        }
    }

    /// Validates the raw content of cell `index` after an edit.
    ///
    /// Returns the new code when the edit is accepted. The widget adopts the
    /// returned value as its own prop right away, so focus handling that
    /// follows sees the edited cell; the owner's next prop update wins.
    pub fn handle_edit(&mut self, index: usize, raw_input: &str) -> Option<CodeValue> {
        if index >= self.value_length {
            return None;
        }
        let trimmed = raw_input.trim();
        let digit = Digit::parse(trimmed);

        if digit.is_none() && !trimmed.is_empty() {
            if trimmed.chars().count() != self.value_length {
                debug!("Rejected non-digit input in cell {}", index);
                return None;
            }
            // Full code pasted into one cell
            let Some(value) = CodeValue::from_digits(trimmed) else {
                debug!("Rejected full-length paste containing non-digits");
                return None;
            };
            debug!("Full code pasted into cell {}", index);
            self.value = value.clone();
            self.selected = false;
            self.focus.blur();
            return Some(value);
        }

        if digit.is_none() && self.cell(index + 1).is_some() {
            debug!("Rejected clearing cell {} ahead of a filled cell", index);
            return None;
        }

        let new_value = self.value.with_slot(index, digit).truncated(self.value_length);
        self.value = new_value.clone();
        self.selected = false;

        if digit.is_some() {
            if index + 1 < self.value_length {
                self.focus_cell(index + 1);
            } else {
                self.focus.blur();
            }
        }

        Some(new_value)
    }

    /// Applies `edit` to cell `index` the way a text field would, then
    /// validates the result. Deletions that leave the content unchanged
    /// produce no edit at all.
    pub fn apply_edit(&mut self, index: usize, edit: Edit) -> Option<CodeValue> {
        let content = self.cell_text(index);
        let raw = compose(&content, self.selected, &edit);
        if raw == content && !matches!(edit, Edit::Insert(_)) {
            return None;
        }
        self.handle_edit(index, &raw)
    }

    fn handle_cell_event(&mut self, index: usize, event: &TuiEvent) -> Option<CodeValue> {
        let key = match event {
            TuiEvent::CursorLeft => Key::Left,
            TuiEvent::CursorRight => Key::Right,
            TuiEvent::CursorUp => Key::Up,
            TuiEvent::CursorDown => Key::Down,
            TuiEvent::Backspace => Key::Backspace,
            TuiEvent::InputChar(_) | TuiEvent::Delete => Key::Other,
            // Paste has no key down
            TuiEvent::Paste(text) => return self.apply_edit(index, Edit::Insert(text.clone())),
            _ => return None,
        };

        if self.handle_key(key, index) == KeyOutcome::Handled {
            return None;
        }

        let edit = match event {
            TuiEvent::InputChar(c) => Edit::Insert(c.to_string()),
            TuiEvent::Backspace => Edit::DeleteBackward,
            _ => Edit::DeleteForward,
        };
        self.apply_edit(index, edit)
    }

    /// Cell under a screen position, from the last render.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<usize> {
        self.cell_areas
            .iter()
            .position(|area| area.contains(Position::new(column, row)))
    }

    /// Screen rectangles of the cells, from the last render.
    pub fn cell_areas(&self) -> &[Rect] {
        &self.cell_areas
    }

    pub fn required_height(&self) -> u16 {
        CELL_HEIGHT + VERTICAL_OVERHEAD
    }

    pub fn required_width(&self) -> u16 {
        let n = u16::try_from(self.value_length).unwrap_or(u16::MAX);
        n.saturating_mul(CELL_WIDTH)
            .saturating_add(n.saturating_sub(1).saturating_mul(CELL_GAP))
            .saturating_add(2)
    }
}

impl<F: FocusController> Component for OtpInput<F> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" One-time code ")
            .title_bottom(Line::from(" digits only ").right_aligned());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [row] = Layout::vertical([Constraint::Length(CELL_HEIGHT)])
            .flex(Flex::Center)
            .areas(inner);
        self.cell_areas = Layout::horizontal(vec![Constraint::Length(CELL_WIDTH); self.value_length])
            .spacing(CELL_GAP)
            .flex(Flex::Center)
            .split(row)
            .to_vec();

        let focused = self.focused_index();
        let selected = self.selected;
        let cells = self.cells.get(&self.value, self.value_length);

        for (index, (slot, cell_area)) in cells.iter().zip(&self.cell_areas).enumerate() {
            let is_focused = focused == Some(index);
            let border_style = if is_focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let mut text_style = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
            if is_focused && selected {
                text_style = text_style.add_modifier(Modifier::REVERSED);
            }

            let text = slot.map(|d| d.to_string()).unwrap_or_default();
            let cell = Paragraph::new(text)
                .centered()
                .style(text_style)
                .block(
                    Block::bordered()
                        .border_type(BorderType::Rounded)
                        .border_style(border_style),
                );
            frame.render_widget(cell, *cell_area);

            if is_focused {
                frame.set_cursor_position((
                    cell_area.x + cell_area.width / 2,
                    cell_area.y + CELL_HEIGHT / 2,
                ));
            }
        }
    }
}

impl<F: FocusController> EventHandler for OtpInput<F> {
    type Event = OtpEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::FocusNext => {
                if let Some(id) = self.arena.cycle_next(self.focus.focused()) {
                    self.focus_cell(id.index());
                }
                None
            }
            TuiEvent::FocusPrev => {
                if let Some(id) = self.arena.cycle_prev(self.focus.focused()) {
                    self.focus_cell(id.index());
                }
                None
            }
            TuiEvent::MouseClick(column, row) => {
                if let Some(index) = self.hit_test(*column, *row) {
                    self.focus_cell(index);
                }
                None
            }
            _ => {
                let index = self.focused_index()?;
                self.handle_cell_event(index, event).map(OtpEvent::Changed)
            }
        }
    }
}
