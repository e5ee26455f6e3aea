use std::collections::BTreeMap;

use crate::coord::{CellCoord, Size};

/// Tracks the tightest rectangle anchored at (0, 0) covering all occupied
/// cells.
///
/// Each axis keeps an ordered multiset of occupied indices as a
/// `index -> count` map, so the extent of the area is the largest key plus
/// one. Updates and size queries are O(log n) and sparse indices cost
/// nothing.
#[derive(Debug, Clone, Default)]
pub struct PrintableArea {
    /// Occupied-cell count per row index
    row_counts: BTreeMap<u32, u32>,
    /// Occupied-cell count per column index
    col_counts: BTreeMap<u32, u32>,
}

impl PrintableArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an occupied cell at the given coordinate.
    pub fn add(&mut self, coord: CellCoord) {
        *self.row_counts.entry(coord.row).or_insert(0) += 1;
        *self.col_counts.entry(coord.col).or_insert(0) += 1;
    }

    /// Remove a previously added coordinate.
    ///
    /// The coordinate must have been added before; projections that drop to
    /// zero are erased so `size` shrinks immediately.
    pub fn remove(&mut self, coord: CellCoord) {
        Self::remove_projection(&mut self.row_counts, coord.row);
        Self::remove_projection(&mut self.col_counts, coord.col);
    }

    fn remove_projection(counts: &mut BTreeMap<u32, u32>, index: u32) {
        debug_assert!(counts.contains_key(&index));
        if let Some(count) = counts.get_mut(&index) {
            if *count <= 1 {
                counts.remove(&index);
            } else {
                *count -= 1;
            }
        }
    }

    /// The printable dimensions: largest occupied index + 1 per axis, or
    /// zero when the sheet is empty.
    pub fn size(&self) -> Size {
        Size {
            rows: self
                .row_counts
                .last_key_value()
                .map_or(0, |(row, _)| row + 1),
            cols: self
                .col_counts
                .last_key_value()
                .map_or(0, |(col, _)| col + 1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_counts.is_empty()
    }
}
