//! Formula parsing and evaluation for the tabula spreadsheet engine.
//!
//! The engine consumes formulas through the [`Formula`] handle: an opaque
//! parsed expression that knows which cells it reads
//! ([`Formula::referenced_cells`]) and how to compute itself against a
//! cell-lookup callback ([`Formula::evaluate`]).

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod lexer;
pub mod parser;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use error::ParseError;
pub use evaluator::Evaluator;
pub use lexer::{Lexer, Token};
pub use parser::Parser;

use tabula_core::{CellCoord, CellError};

/// A parsed formula expression.
///
/// The expression text this was parsed from is not retained; [`expression`]
/// reprints the AST in canonical form (whitespace normalized away), so the
/// round trip is stable from the first reprint onward.
///
/// [`expression`]: Formula::expression
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    ast: Expr,
    refs: Vec<CellCoord>,
}

impl Formula {
    /// Parse an expression (without the leading `=`).
    ///
    /// References outside the addressable grid are rejected here, so a
    /// successfully parsed formula never points at an invalid position.
    pub fn parse(expression: &str) -> Result<Self, ParseError> {
        let tokens = Lexer::new(expression).tokenize()?;
        let ast = Parser::new(tokens).parse()?;

        // Deduplicate in first-seen order
        let mut refs = Vec::new();
        ast.visit_refs(&mut |row, col| {
            let coord = CellCoord::new(row, col);
            if !refs.contains(&coord) {
                refs.push(coord);
            }
        });

        Ok(Self { ast, refs })
    }

    /// Cells this formula reads, deduplicated in first-seen order.
    pub fn referenced_cells(&self) -> &[CellCoord] {
        &self.refs
    }

    /// Canonical form of the expression (without the leading `=`).
    pub fn expression(&self) -> String {
        self.ast.to_string()
    }

    /// Evaluate against a cell-lookup callback.
    ///
    /// A non-finite result (overflow, 0/0 via functions, etc.) is reported
    /// as `#DIV/0!` so callers only ever observe finite numbers.
    pub fn evaluate<F>(&self, lookup: F) -> Result<f64, CellError>
    where
        F: Fn(CellCoord) -> Result<f64, CellError>,
    {
        let result = Evaluator::new(lookup).evaluate(&self.ast)?;
        if result.is_finite() {
            Ok(result)
        } else {
            Err(CellError::DivisionByZero)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_lookup(_: CellCoord) -> Result<f64, CellError> {
        Ok(0.0)
    }

    #[test]
    fn test_parse_and_expression_round_trip() {
        let formula = Formula::parse("A1 + B1 * 2").unwrap();
        assert_eq!(formula.expression(), "A1+B1*2");

        // Reprinting the canonical form parses back to the same AST
        let again = Formula::parse(&formula.expression()).unwrap();
        assert_eq!(again.expression(), formula.expression());
    }

    #[test]
    fn test_referenced_cells_dedup_first_seen() {
        let formula = Formula::parse("B2 + A1 + B2 + C3 + A1").unwrap();
        let refs: Vec<String> = formula
            .referenced_cells()
            .iter()
            .map(|c| c.to_a1())
            .collect();
        assert_eq!(refs, vec!["B2", "A1", "C3"]);
    }

    #[test]
    fn test_no_references() {
        let formula = Formula::parse("1+2").unwrap();
        assert!(formula.referenced_cells().is_empty());
        assert_eq!(formula.evaluate(zero_lookup), Ok(3.0));
    }

    #[test]
    fn test_parse_rejects_syntax_errors() {
        assert!(Formula::parse("1+").is_err());
        assert!(Formula::parse("(1").is_err());
        assert!(Formula::parse("A1:B2").is_err());
        assert!(Formula::parse("SUM(A1)").is_err());
        assert!(Formula::parse("").is_err());
    }

    #[test]
    fn test_non_finite_result_is_division_error() {
        let formula = Formula::parse("POWER(10, 400)").unwrap();
        assert_eq!(
            formula.evaluate(zero_lookup),
            Err(CellError::DivisionByZero)
        );

        let formula = Formula::parse("SQRT(0-1)").unwrap();
        assert_eq!(
            formula.evaluate(zero_lookup),
            Err(CellError::DivisionByZero)
        );
    }

    #[test]
    fn test_evaluate_with_lookup() {
        let formula = Formula::parse("A1/A2").unwrap();
        let result = formula.evaluate(|coord| {
            if coord == CellCoord::new(0, 0) {
                Ok(10.0)
            } else {
                Ok(4.0)
            }
        });
        assert_eq!(result, Ok(2.5));
    }
}
