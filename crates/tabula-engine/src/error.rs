use thiserror::Error;

use tabula_core::CellCoord;
use tabula_formula::ParseError;

/// Errors surfaced by mutating and reading sheet operations.
///
/// A failed mutating call leaves the sheet exactly as it was; evaluation
/// errors are not represented here — they are values
/// ([`tabula_core::CellValue::Error`]) returned from cell reads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    #[error("invalid position: {0}")]
    InvalidPosition(CellCoord),

    #[error("formula syntax error: {0}")]
    Syntax(#[from] ParseError),

    #[error("circular dependency detected")]
    CircularDependency,
}

pub type Result<T> = std::result::Result<T, SheetError>;
