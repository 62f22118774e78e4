//! Focus tracking for the cells of a segmented input.
//!
//! Cells are addressed through an explicit arena of `CellId`s rather than by
//! walking neighbouring elements, and focus is requested through the
//! `FocusController` capability. The controller owns the focus cursor; the
//! widget only asks it to move.

/// Identifier of one cell in a `CellArena`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId(usize);

impl CellId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Addressable, fixed-size set of cells. Rebuilt when the cell count changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellArena {
    ids: Vec<CellId>,
}

impl CellArena {
    pub fn new(len: usize) -> Self {
        Self {
            ids: (0..len).map(CellId).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<CellId> {
        self.ids.get(index).copied()
    }

    /// The cell after `id`, or `None` at the end (no wraparound).
    pub fn next(&self, id: CellId) -> Option<CellId> {
        self.get(id.0 + 1)
    }

    /// The cell before `id`, or `None` at the start (no wraparound).
    pub fn prev(&self, id: CellId) -> Option<CellId> {
        id.0.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Tab order: wraps past the last cell, starts at the first when nothing is focused.
    pub fn cycle_next(&self, from: Option<CellId>) -> Option<CellId> {
        match from {
            Some(id) => self.next(id).or_else(|| self.get(0)),
            None => self.get(0),
        }
    }

    /// Shift+Tab order: wraps before the first cell, starts at the last when nothing is focused.
    pub fn cycle_prev(&self, from: Option<CellId>) -> Option<CellId> {
        let last = self.len().checked_sub(1).and_then(|i| self.get(i));
        match from {
            Some(id) => self.prev(id).or(last),
            None => last,
        }
    }
}

/// Capability to move keyboard focus between cells.
pub trait FocusController {
    /// Give focus to `cell`.
    fn focus(&mut self, cell: CellId);

    /// Remove focus from every cell.
    fn blur(&mut self);

    /// The cell that currently holds focus.
    fn focused(&self) -> Option<CellId>;
}

/// In-memory focus cursor used by the terminal host.
#[derive(Debug, Default, Clone)]
pub struct FocusRing {
    current: Option<CellId>,
}

impl FocusRing {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FocusController for FocusRing {
    fn focus(&mut self, cell: CellId) {
        self.current = Some(cell);
    }

    fn blur(&mut self) {
        self.current = None;
    }

    fn focused(&self) -> Option<CellId> {
        self.current
    }
}
