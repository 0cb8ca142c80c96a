use std::fmt;
use std::fmt::Formatter;

pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Debug)]
pub enum ErrorKind {
    ScanFailed,
    ReadFailed,
    WriteFailed,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ScanFailed => write!(f, "scanning existing stubs failed"),
            ErrorKind::ReadFailed => write!(f, "reading a generated file failed"),
            ErrorKind::WriteFailed => write!(f, "writing a generated file failed"),
        }
    }
}

#[derive(Debug)]
pub struct SyncError {
    kind: ErrorKind,
    message: String,
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl SyncError {
    pub fn new(kind: ErrorKind, message: &str) -> Self {
        SyncError {
            kind,
            message: message.to_string(),
        }
    }
}
