use std::fmt;
use std::fmt::{Display, Formatter};

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    MissingParamList,
    ExpectedSignature,
    InvalidSyscallId,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MissingParamList => write!(f, "missing parameter list"),
            ErrorKind::ExpectedSignature => write!(f, "expected syscall signature"),
            ErrorKind::InvalidSyscallId => write!(f, "invalid syscall id"),
        }
    }
}

/// Represents any fatal error that occurs while parsing the syscall table.
#[derive(Debug, PartialEq)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub message: String,
    /// 1-based line number of the offending table line.
    pub line: usize,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {} on line {}", self.kind, self.message, self.line)
    }
}

impl ParseError {
    pub fn new(kind: ErrorKind, message: &str, line: usize) -> Self {
        ParseError {
            kind,
            message: message.to_string(),
            line,
        }
    }
}
