//! Memoized cell derivation.

use crate::core::code::{CodeValue, Slot, derive_cells};

/// Caches `derive_cells` for the last `(value, value_length)` pair.
#[derive(Debug, Default)]
pub(super) struct CellCache {
    key: Option<(CodeValue, usize)>,
    cells: Vec<Slot>,
    /// Number of times the cells were actually derived.
    #[cfg_attr(not(test), allow(dead_code))]
    pub derivations: usize,
}

impl CellCache {
    pub fn get(&mut self, value: &CodeValue, value_length: usize) -> &[Slot] {
        let fresh = matches!(&self.key, Some((v, n)) if v == value && *n == value_length);
        if !fresh {
            self.cells = derive_cells(value, value_length);
            self.key = Some((value.clone(), value_length));
            self.derivations += 1;
        }
        &self.cells
    }
}
