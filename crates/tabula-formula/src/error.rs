use thiserror::Error;

/// Reasons a formula expression can be rejected at parse time
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    #[error("invalid number literal: {0}")]
    InvalidNumber(String),

    #[error("unexpected token: {0}")]
    UnexpectedToken(String),

    #[error("unexpected end of formula")]
    UnexpectedEnd,

    #[error("invalid cell reference: {0}")]
    InvalidReference(String),

    #[error("cell reference outside the grid: {0}")]
    ReferenceOutOfGrid(String),

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("{name} expects {expected} argument(s), got {got}")]
    WrongArgCount {
        name: String,
        expected: &'static str,
        got: usize,
    },
}
