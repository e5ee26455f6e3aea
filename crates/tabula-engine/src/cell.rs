use std::cell::RefCell;

use tabula_core::{CellCoord, CellValue};
use tabula_formula::{Formula, ParseError};

/// Marks cell input as a formula when it is the first character and more
/// input follows.
pub const FORMULA_MARKER: char = '=';
/// Leading marker that forces the rest of the text to be taken literally.
pub const ESCAPE_MARKER: char = '\'';

/// What a cell stores, as opposed to what it computes to.
///
/// The three variants are a closed set; accessors dispatch with a single
/// `match` rather than a trait object. A formula's memoized value sits in a
/// `RefCell` so reading a cell through a shared sheet borrow can still fill
/// the cache — the engine is single-threaded by contract.
#[derive(Debug, Clone)]
pub enum CellContent {
    Empty,
    Text {
        raw: String,
    },
    Formula {
        formula: Formula,
        cache: RefCell<Option<CellValue>>,
    },
}

impl CellContent {
    /// Parse raw user input into cell content.
    ///
    /// Empty input becomes `Empty`; `=` followed by an expression becomes a
    /// formula (propagating parse failures); a lone `=` and everything else
    /// is literal text.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut chars = text.chars();
        match chars.next() {
            None => Ok(CellContent::Empty),
            Some(FORMULA_MARKER) if chars.as_str().is_empty() => Ok(CellContent::Text {
                raw: text.to_string(),
            }),
            Some(FORMULA_MARKER) => Ok(CellContent::Formula {
                formula: Formula::parse(chars.as_str())?,
                cache: RefCell::new(None),
            }),
            Some(_) => Ok(CellContent::Text {
                raw: text.to_string(),
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellContent::Empty)
    }

    /// The cell's source text: empty for `Empty`, the raw string (escape
    /// marker preserved) for `Text`, `=` plus the canonical expression for
    /// `Formula`.
    pub fn text(&self) -> String {
        match self {
            CellContent::Empty => String::new(),
            CellContent::Text { raw } => raw.clone(),
            CellContent::Formula { formula, .. } => {
                format!("{}{}", FORMULA_MARKER, formula.expression())
            }
        }
    }

    /// The literal value of a `Text` cell with a leading escape marker
    /// consumed. Empty string for the other variants.
    pub fn text_value(&self) -> &str {
        match self {
            CellContent::Text { raw } => raw.strip_prefix(ESCAPE_MARKER).unwrap_or(raw),
            _ => "",
        }
    }

    /// Cells this content reads, deduplicated in first-seen order.
    pub fn referenced_cells(&self) -> &[CellCoord] {
        match self {
            CellContent::Formula { formula, .. } => formula.referenced_cells(),
            _ => &[],
        }
    }

    /// Memoized value of a formula cell, if present.
    pub fn cached_value(&self) -> Option<CellValue> {
        match self {
            CellContent::Formula { cache, .. } => cache.borrow().clone(),
            _ => None,
        }
    }

    /// Memoize a computed value. No-op for non-formula content.
    pub fn store_cached(&self, value: CellValue) {
        if let CellContent::Formula { cache, .. } = self {
            *cache.borrow_mut() = Some(value);
        }
    }

    /// Drop the memoized value so the next read recomputes.
    pub fn invalidate_cache(&self) {
        if let CellContent::Formula { cache, .. } = self {
            cache.borrow_mut().take();
        }
    }
}
