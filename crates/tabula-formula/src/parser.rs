use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::ParseError;
use crate::functions;
use crate::lexer::Token;
use tabula_core::{col_from_label, CellCoord};

/// Parser for formula expressions
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parse the token stream into an AST
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;

        if !self.is_at_end() {
            return Err(ParseError::UnexpectedToken(format!("{:?}", self.peek())));
        }

        Ok(expr)
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.tokens.get(self.position - 1).unwrap_or(&Token::Eof)
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof)
    }

    fn consume(&mut self, expected: &Token) -> Result<&Token, ParseError> {
        if std::mem::discriminant(self.peek()) == std::mem::discriminant(expected) {
            Ok(self.advance())
        } else if self.is_at_end() {
            Err(ParseError::UnexpectedEnd)
        } else {
            Err(ParseError::UnexpectedToken(format!("{:?}", self.peek())))
        }
    }

    /// Parse expression with operator precedence
    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.peek() {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Sub,
                _ => break,
            };

            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_power()?;

        loop {
            let op = match self.peek() {
                Token::Multiply => BinaryOp::Mul,
                Token::Divide => BinaryOp::Div,
                _ => break,
            };

            self.advance();
            let right = self.parse_power()?;
            left = Expr::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_unary()?;

        if matches!(self.peek(), Token::Power) {
            self.advance();
            // Power is right-associative
            let right = self.parse_power()?;
            Ok(Expr::binary(left, BinaryOp::Pow, right))
        } else {
            Ok(left)
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Token::Minus => {
                self.advance();
                let operand = self.parse_unary()?;
                Ok(Expr::unary(UnaryOp::Neg, operand))
            }
            Token::Plus => {
                self.advance();
                let operand = self.parse_unary()?;
                Ok(Expr::unary(UnaryOp::Pos, operand))
            }
            _ => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        // Check for percent postfix
        if matches!(self.peek(), Token::Percent) {
            self.advance();
            expr = Expr::unary(UnaryOp::Percent, expr);
        }

        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek().clone() {
            Token::Number(n) => {
                self.advance();
                Ok(Expr::Number(n))
            }
            Token::CellRef(ref_str) => {
                self.advance();
                parse_cell_reference(&ref_str)
            }
            Token::Identifier(name) => {
                self.advance();

                if matches!(self.peek(), Token::LeftParen) {
                    self.parse_function_call(name)
                } else {
                    Err(ParseError::UnexpectedToken(name))
                }
            }
            Token::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.consume(&Token::RightParen)?;
                Ok(Expr::Grouped(Box::new(expr)))
            }
            Token::Eof => Err(ParseError::UnexpectedEnd),
            other => Err(ParseError::UnexpectedToken(format!("{:?}", other))),
        }
    }

    fn parse_function_call(&mut self, name: String) -> Result<Expr, ParseError> {
        let (min_args, max_args) = functions::arity(&name)
            .ok_or_else(|| ParseError::UnknownFunction(name.clone()))?;

        self.consume(&Token::LeftParen)?;

        let mut args = Vec::new();

        if !matches!(self.peek(), Token::RightParen) {
            loop {
                args.push(self.parse_expression()?);

                match self.peek() {
                    Token::Comma => {
                        self.advance();
                    }
                    Token::RightParen => break,
                    Token::Eof => return Err(ParseError::UnexpectedEnd),
                    other => {
                        return Err(ParseError::UnexpectedToken(format!("{:?}", other)));
                    }
                }
            }
        }

        self.consume(&Token::RightParen)?;

        if args.len() < min_args || args.len() > max_args {
            return Err(ParseError::WrongArgCount {
                name,
                expected: functions::arity_description(min_args, max_args),
                got: args.len(),
            });
        }

        Ok(Expr::FunctionCall { name, args })
    }
}

/// Parse a cell reference string (e.g., "A1", "$B$2") into an Expr::CellRef
fn parse_cell_reference(ref_str: &str) -> Result<Expr, ParseError> {
    let invalid = || ParseError::InvalidReference(ref_str.to_string());

    let mut chars = ref_str.chars().peekable();

    // Check for absolute column marker
    let abs_col = if chars.peek() == Some(&'$') {
        chars.next();
        true
    } else {
        false
    };

    // Read column letters
    let mut col_str = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphabetic() {
            col_str.push(c);
            chars.next();
        } else {
            break;
        }
    }

    if col_str.is_empty() {
        return Err(invalid());
    }

    // Check for absolute row marker
    let abs_row = if chars.peek() == Some(&'$') {
        chars.next();
        true
    } else {
        false
    };

    // Read row number
    let row_str: String = chars.collect();
    if row_str.is_empty() || !row_str.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let col = col_from_label(&col_str).ok_or_else(invalid)?;
    let row: u32 = row_str.parse().map_err(|_| invalid())?;
    if row == 0 {
        return Err(invalid());
    }
    let row = row - 1; // Convert to 0-indexed

    // The engine never stores an edge to an unaddressable cell, so the
    // grid bound is enforced here rather than at evaluation time.
    if row >= CellCoord::MAX_ROWS || col >= CellCoord::MAX_COLS {
        return Err(ParseError::ReferenceOutOfGrid(ref_str.to_string()));
    }

    Ok(Expr::CellRef {
        col,
        row,
        abs_col,
        abs_row,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse(input: &str) -> Result<Expr, ParseError> {
        let tokens = Lexer::new(input).tokenize()?;
        Parser::new(tokens).parse()
    }

    #[test]
    fn test_number() {
        let expr = parse("42").unwrap();
        assert_eq!(expr, Expr::Number(42.0));
    }

    #[test]
    fn test_precedence() {
        let expr = parse("1 + 2 * 3").unwrap();
        // Should be 1 + (2 * 3)
        assert!(matches!(
            expr,
            Expr::Binary {
                op: BinaryOp::Add,
                ..
            }
        ));
        assert_eq!(expr.to_string(), "1+2*3");
    }

    #[test]
    fn test_power_right_associative() {
        let expr = parse("2^3^2").unwrap();
        if let Expr::Binary { op, right, .. } = expr {
            assert_eq!(op, BinaryOp::Pow);
            assert!(matches!(
                *right,
                Expr::Binary {
                    op: BinaryOp::Pow,
                    ..
                }
            ));
        } else {
            panic!("Expected binary expression");
        }
    }

    #[test]
    fn test_cell_reference() {
        let expr = parse("A1").unwrap();
        assert!(matches!(expr, Expr::CellRef { col: 0, row: 0, .. }));
    }

    #[test]
    fn test_absolute_reference_round_trip() {
        let expr = parse("$B$2 + A1").unwrap();
        assert_eq!(expr.to_string(), "$B$2+A1");
    }

    #[test]
    fn test_reference_out_of_grid() {
        let out_of_rows = format!("A{}", CellCoord::MAX_ROWS + 1);
        assert!(matches!(
            parse(&out_of_rows),
            Err(ParseError::ReferenceOutOfGrid(_))
        ));

        // Column XFE is one past the last addressable column
        assert!(matches!(
            parse("XFE1"),
            Err(ParseError::ReferenceOutOfGrid(_))
        ));
    }

    #[test]
    fn test_function_call() {
        let expr = parse("MIN(A1, 2)").unwrap();
        if let Expr::FunctionCall { name, args } = expr {
            assert_eq!(name, "MIN");
            assert_eq!(args.len(), 2);
        } else {
            panic!("Expected function call");
        }
    }

    #[test]
    fn test_unknown_function() {
        assert_eq!(
            parse("FROB(1)"),
            Err(ParseError::UnknownFunction("FROB".to_string()))
        );
    }

    #[test]
    fn test_wrong_arg_count() {
        assert!(matches!(
            parse("ABS(1, 2)"),
            Err(ParseError::WrongArgCount { .. })
        ));
        assert!(matches!(
            parse("POWER(2)"),
            Err(ParseError::WrongArgCount { .. })
        ));
    }

    #[test]
    fn test_parentheses() {
        let expr = parse("(1 + 2) * 3").unwrap();
        assert!(matches!(
            expr,
            Expr::Binary {
                op: BinaryOp::Mul,
                ..
            }
        ));
        assert_eq!(expr.to_string(), "(1+2)*3");
    }

    #[test]
    fn test_trailing_garbage() {
        assert!(parse("1 2").is_err());
        assert!(parse("A1 B1").is_err());
    }

    #[test]
    fn test_unclosed_paren() {
        assert_eq!(parse("(1 + 2"), Err(ParseError::UnexpectedEnd));
    }
}
