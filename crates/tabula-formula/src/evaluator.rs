use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::functions;
use tabula_core::{CellCoord, CellError};

/// Evaluator for formula ASTs.
///
/// Works purely over numbers: the lookup callback is responsible for
/// coercing whatever the referenced cell holds into an `f64` or an error.
pub struct Evaluator<F>
where
    F: Fn(CellCoord) -> Result<f64, CellError>,
{
    lookup: F,
}

impl<F> Evaluator<F>
where
    F: Fn(CellCoord) -> Result<f64, CellError>,
{
    pub fn new(lookup: F) -> Self {
        Self { lookup }
    }

    /// Evaluate an expression AST to a number, short-circuiting on the
    /// first evaluation error.
    pub fn evaluate(&self, expr: &Expr) -> Result<f64, CellError> {
        match expr {
            Expr::Number(n) => Ok(*n),

            Expr::CellRef { row, col, .. } => (self.lookup)(CellCoord::new(*row, *col)),

            Expr::Binary { left, op, right } => self.evaluate_binary(left, *op, right),

            Expr::Unary { op, operand } => self.evaluate_unary(*op, operand),

            Expr::FunctionCall { name, args } => self.evaluate_function(name, args),

            Expr::Grouped(inner) => self.evaluate(inner),
        }
    }

    fn evaluate_binary(&self, left: &Expr, op: BinaryOp, right: &Expr) -> Result<f64, CellError> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;

        match op {
            BinaryOp::Add => Ok(left + right),
            BinaryOp::Sub => Ok(left - right),
            BinaryOp::Mul => Ok(left * right),
            BinaryOp::Div => {
                if right == 0.0 {
                    Err(CellError::DivisionByZero)
                } else {
                    Ok(left / right)
                }
            }
            BinaryOp::Pow => Ok(left.powf(right)),
        }
    }

    fn evaluate_unary(&self, op: UnaryOp, operand: &Expr) -> Result<f64, CellError> {
        let value = self.evaluate(operand)?;

        match op {
            UnaryOp::Neg => Ok(-value),
            UnaryOp::Pos => Ok(value),
            UnaryOp::Percent => Ok(value / 100.0),
        }
    }

    fn evaluate_function(&self, name: &str, args: &[Expr]) -> Result<f64, CellError> {
        let values: Vec<f64> = args
            .iter()
            .map(|arg| self.evaluate(arg))
            .collect::<Result<_, _>>()?;

        match name {
            "ABS" => Ok(functions::abs(values[0])),
            "SQRT" => Ok(functions::sqrt(values[0])),
            "ROUND" => Ok(functions::round(values[0], values.get(1).copied())),
            "POWER" => Ok(functions::power(values[0], values[1])),
            "MIN" => Ok(functions::min(&values)),
            "MAX" => Ok(functions::max(&values)),
            // Unknown names are rejected at parse time
            _ => Err(CellError::InvalidValue),
        }
    }
}
