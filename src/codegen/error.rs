use std::fmt;
use std::fmt::Formatter;

pub type GenResult<T> = Result<T, GenError>;

#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    PathConflict,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::PathConflict => write!(f, "conflicting artifact paths"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct GenError {
    kind: ErrorKind,
    message: String,
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl GenError {
    pub fn new(kind: ErrorKind, message: &str) -> Self {
        GenError {
            kind,
            message: message.to_string(),
        }
    }
}
