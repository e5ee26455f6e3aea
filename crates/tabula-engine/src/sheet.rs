use std::collections::{HashMap, HashSet};
use std::fmt;

use tabula_core::{CellCoord, CellError, CellValue, PrintableArea, Size};

use crate::cell::CellContent;
use crate::deps::DependencyGraph;
use crate::error::{Result, SheetError};

/// A single spreadsheet sheet with sparse storage and dependency-aware
/// evaluation.
///
/// Edits are transactional: `set_cell` validates, parses, and cycle-checks
/// before touching any state, so a failed call leaves the sheet exactly as
/// it was. Formula values are memoized per cell and invalidated through the
/// reverse dependency graph whenever a referenced cell changes.
#[derive(Debug, Default)]
pub struct Sheet {
    /// Sparse storage - only touched positions are present. Cells that are
    /// merely referenced by formulas are held as `Empty` placeholders,
    /// invisible to readers.
    cells: HashMap<CellCoord, CellContent>,
    /// Reverse edges: referent -> formula cells reading it
    deps: DependencyGraph,
    /// Tightest rectangle covering all non-empty cells
    area: PrintableArea,
}

/// Read view of a single non-empty cell.
///
/// Borrowed from the sheet; the sheet keeps sole ownership of all cell
/// state and views address it by position.
#[derive(Debug)]
pub struct CellView<'a> {
    sheet: &'a Sheet,
    content: &'a CellContent,
}

impl CellView<'_> {
    /// The computed value: literal text (escape consumed), a finite number,
    /// or an evaluation error.
    pub fn value(&self) -> CellValue {
        self.sheet.content_value(self.content)
    }

    /// The source text as entered, modulo the formula's canonical spelling.
    pub fn text(&self) -> String {
        self.content.text()
    }

    /// Cells this cell's formula reads, in first-seen order.
    pub fn referenced_cells(&self) -> &[CellCoord] {
        self.content.referenced_cells()
    }
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell from raw user input.
    ///
    /// Runs parse and cycle check before committing anything, then swaps
    /// the content in, rewires dependency edges (inserting placeholders for
    /// referenced-but-unset cells), and invalidates every transitive
    /// dependent's cache.
    pub fn set_cell(&mut self, coord: CellCoord, text: &str) -> Result<()> {
        if !coord.is_valid() {
            return Err(SheetError::InvalidPosition(coord));
        }

        let candidate = CellContent::parse(text)?;

        if self.creates_cycle(coord, candidate.referenced_cells()) {
            return Err(SheetError::CircularDependency);
        }

        // Commit. Nothing above this line has mutated the sheet.
        let prev_refs: Vec<CellCoord> = match self.cells.get(&coord) {
            Some(prev) if !prev.is_empty() => {
                self.area.remove(coord);
                prev.referenced_cells().to_vec()
            }
            _ => Vec::new(),
        };
        for referent in prev_refs {
            self.deps.remove_dependent(referent, coord);
        }

        let new_refs: Vec<CellCoord> = candidate.referenced_cells().to_vec();
        if !candidate.is_empty() {
            self.area.add(coord);
        }
        self.cells.insert(coord, candidate);

        for referent in &new_refs {
            self.cells.entry(*referent).or_insert(CellContent::Empty);
            self.deps.add_dependent(*referent, coord);
        }

        self.invalidate_dependents(coord);

        tracing::debug!(cell = %coord, refs = new_refs.len(), "cell updated");
        Ok(())
    }

    /// Read view of the cell, or `None` for never-set cells and invisible
    /// placeholders.
    pub fn get_cell(&self, coord: CellCoord) -> Result<Option<CellView<'_>>> {
        if !coord.is_valid() {
            return Err(SheetError::InvalidPosition(coord));
        }

        Ok(self
            .cells
            .get(&coord)
            .filter(|content| !content.is_empty())
            .map(|content| CellView {
                sheet: self,
                content,
            }))
    }

    /// Remove a cell. No-op if the position was never set or holds only a
    /// placeholder.
    ///
    /// Dependents of the cleared cell keep their edges: they still read
    /// this position and must be invalidated again when it is re-set.
    pub fn clear_cell(&mut self, coord: CellCoord) -> Result<()> {
        if !coord.is_valid() {
            return Err(SheetError::InvalidPosition(coord));
        }

        let refs: Vec<CellCoord> = match self.cells.get(&coord) {
            Some(content) if !content.is_empty() => content.referenced_cells().to_vec(),
            _ => return Ok(()),
        };

        for referent in refs {
            self.deps.remove_dependent(referent, coord);
        }
        self.area.remove(coord);
        self.invalidate_dependents(coord);
        self.cells.remove(&coord);

        tracing::debug!(cell = %coord, "cell cleared");
        Ok(())
    }

    /// Dimensions of the tightest rectangle anchored at (0, 0) covering
    /// all non-empty cells.
    pub fn printable_size(&self) -> Size {
        self.area.size()
    }

    /// Write computed values over the printable area, tab-separated within
    /// a row, one row per line.
    pub fn write_values<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        self.write_grid(out, |sheet, content| {
            sheet.content_value(content).to_string()
        })
    }

    /// Write source texts over the printable area, tab-separated within a
    /// row, one row per line.
    pub fn write_texts<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        self.write_grid(out, |_, content| content.text())
    }

    /// Convenience: [`write_values`](Self::write_values) into a fresh string.
    pub fn values_to_string(&self) -> String {
        let mut out = String::new();
        self.write_values(&mut out)
            .expect("writing to a String cannot fail");
        out
    }

    /// Convenience: [`write_texts`](Self::write_texts) into a fresh string.
    pub fn texts_to_string(&self) -> String {
        let mut out = String::new();
        self.write_texts(&mut out)
            .expect("writing to a String cannot fail");
        out
    }

    fn write_grid<W: fmt::Write>(
        &self,
        out: &mut W,
        render: impl Fn(&Self, &CellContent) -> String,
    ) -> fmt::Result {
        let size = self.area.size();
        for row in 0..size.rows {
            for col in 0..size.cols {
                if col != 0 {
                    out.write_char('\t')?;
                }
                if let Some(content) = self.cells.get(&CellCoord::new(row, col)) {
                    out.write_str(&render(self, content))?;
                }
            }
            out.write_char('\n')?;
        }
        Ok(())
    }

    /// Would making `from` depend on `refs` close a cycle?
    ///
    /// Depth-first walk from the proposed referents, expanding each visited
    /// position through its *currently stored* content (the candidate at
    /// `from` is not installed yet, and must not be consulted). Reaching
    /// `from` along any path is the failure.
    fn creates_cycle(&self, from: CellCoord, refs: &[CellCoord]) -> bool {
        let mut visited = HashSet::new();
        let mut stack: Vec<CellCoord> = refs.to_vec();

        while let Some(current) = stack.pop() {
            if current == from {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(content) = self.cells.get(&current) {
                stack.extend_from_slice(content.referenced_cells());
            }
        }

        false
    }

    /// Drop the memoized value of every formula transitively reading
    /// `changed`. The next read of each recomputes lazily.
    fn invalidate_dependents(&self, changed: CellCoord) {
        let affected = self.deps.transitive_dependents(changed);
        for coord in &affected {
            if let Some(content) = self.cells.get(coord) {
                content.invalidate_cache();
            }
        }
        if !affected.is_empty() {
            tracing::trace!(cell = %changed, invalidated = affected.len(), "caches invalidated");
        }
    }

    /// Compute (or recall) the value of stored content.
    fn content_value(&self, content: &CellContent) -> CellValue {
        match content {
            CellContent::Empty => CellValue::empty(),
            CellContent::Text { .. } => CellValue::Text(content.text_value().to_string()),
            CellContent::Formula { formula, .. } => {
                if let Some(value) = content.cached_value() {
                    return value;
                }
                let value = match formula.evaluate(|coord| self.lookup(coord)) {
                    Ok(number) => CellValue::Number(number),
                    Err(error) => CellValue::Error(error),
                };
                content.store_cached(value.clone());
                value
            }
        }
    }

    /// Numeric view of a cell for formula evaluation.
    ///
    /// Absent and empty cells contribute zero; text must parse as a finite
    /// number; formula values recurse (filling their own caches) and
    /// propagate errors.
    fn lookup(&self, coord: CellCoord) -> std::result::Result<f64, CellError> {
        let content = match self.cells.get(&coord) {
            None => return Ok(0.0),
            Some(content) => content,
        };

        match self.content_value(content) {
            CellValue::Text(text) => {
                if text.is_empty() {
                    Ok(0.0)
                } else {
                    match text.parse::<f64>() {
                        Ok(number) if number.is_finite() => Ok(number),
                        Ok(_) => Err(CellError::DivisionByZero),
                        Err(_) => Err(CellError::InvalidValue),
                    }
                }
            }
            CellValue::Number(number) => {
                if number.is_finite() {
                    Ok(number)
                } else {
                    Err(CellError::DivisionByZero)
                }
            }
            CellValue::Error(error) => Err(error),
        }
    }
}
