//! Dependency-aware sheet engine for the tabula spreadsheet.
//!
//! A [`Sheet`] is a sparse two-dimensional grid of cells holding plain text
//! or formulas. Edits are transactional (parse, cycle check, then commit),
//! formula values are memoized per cell, and the reverse dependency graph
//! keeps those memos consistent as the grid changes.
//!
//! ```
//! use tabula_core::{CellCoord, CellValue};
//! use tabula_engine::Sheet;
//!
//! let mut sheet = Sheet::new();
//! sheet.set_cell(CellCoord::from_a1("A1").unwrap(), "2").unwrap();
//! sheet.set_cell(CellCoord::from_a1("B1").unwrap(), "=A1*21").unwrap();
//!
//! let b1 = sheet.get_cell(CellCoord::from_a1("B1").unwrap()).unwrap().unwrap();
//! assert_eq!(b1.value(), CellValue::Number(42.0));
//! ```

pub mod cell;
pub mod deps;
pub mod error;
pub mod sheet;

pub use cell::CellContent;
pub use deps::DependencyGraph;
pub use error::{Result, SheetError};
pub use sheet::{CellView, Sheet};

pub use tabula_core::{CellCoord, CellError, CellValue, Size};
