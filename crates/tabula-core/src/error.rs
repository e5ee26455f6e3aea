use serde::{Deserialize, Serialize};
use std::fmt;

/// Value-typed evaluation errors a formula cell can yield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellError {
    /// #DIV/0! - Division by zero, overflow, or a non-finite result
    DivisionByZero,
    /// #VALUE! - Non-numeric operand
    InvalidValue,
    /// #REF! - Invalid cell reference
    InvalidReference,
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellError::DivisionByZero => write!(f, "#DIV/0!"),
            CellError::InvalidValue => write!(f, "#VALUE!"),
            CellError::InvalidReference => write!(f, "#REF!"),
        }
    }
}

impl std::error::Error for CellError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_tokens() {
        assert_eq!(CellError::DivisionByZero.to_string(), "#DIV/0!");
        assert_eq!(CellError::InvalidValue.to_string(), "#VALUE!");
        assert_eq!(CellError::InvalidReference.to_string(), "#REF!");
    }
}
