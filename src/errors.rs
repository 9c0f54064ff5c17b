use failure::Fail;
use std::io;

#[derive(Debug, Fail, PartialEq)]
#[fail(display = "validation failed because of \"{}\"", error)]
pub struct ValidationError {
    pub error: String,
}

impl ValidationError {
    pub fn new<S: Into<String>>(error: S) -> ValidationError {
        ValidationError { error: error.into() }
    }
}

/// Refusals of a ride operation. The ride is left untouched whenever one of
/// these is returned.
#[derive(Debug, Fail, PartialEq)]
pub enum RideError {
    #[fail(display = "[{}] cannot start cycle - no available operator", ride)]
    NoAvailableOperator { ride: String },
    #[fail(display = "[{}] queue is empty", ride)]
    EmptyQueue { ride: String },
    #[fail(display = "[{}] ride history is empty", ride)]
    EmptyHistory { ride: String },
}

#[derive(Debug, Fail)]
pub enum ArchiveError {
    #[fail(display = "file not found: {}", path)]
    FileNotFound { path: String },
    #[fail(display = "i/o failure on {}: {}", path, cause)]
    Io {
        path: String,
        #[cause]
        cause: io::Error,
    },
}

/// Why a single CSV line was skipped on import.
#[derive(Debug, Fail, PartialEq)]
pub enum LineError {
    #[fail(display = "expected 5 fields, found {}", _0)]
    FieldCount(usize),
    #[fail(display = "age \"{}\" is not a number", _0)]
    InvalidAge(String),
    #[fail(display = "line is not valid UTF-8")]
    Encoding,
    #[fail(display = "{}", _0)]
    Invalid(#[cause] ValidationError),
}

impl From<ValidationError> for LineError {
    fn from(error: ValidationError) -> LineError {
        LineError::Invalid(error)
    }
}
