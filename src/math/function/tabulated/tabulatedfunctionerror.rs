use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TabulatedFunctionError {
    #[error("point index {index} out of range: table holds {count} points")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("x = {x} at index {index} breaks the strict ordering of abscissas")]
    OrderViolation { index: usize, x: f64 },

    #[error("a point with x = {x} already exists")]
    DuplicateAbscissa { x: f64 },

    #[error("cannot delete a point: table holds only {count} points")]
    TooFewPoints { count: usize },

    #[error("invalid tabulated function: {0}")]
    InvalidConstruction(String),

    #[error("malformed tabulated function stream: {0}")]
    MalformedInput(String),

    #[error(transparent)]
    Io(io::Error),
}

impl TabulatedFunctionError {
    pub fn invalid_construction(message: impl Into<String>) -> TabulatedFunctionError {
        TabulatedFunctionError::InvalidConstruction(message.into())
    }

    pub fn malformed_input(message: impl Into<String>) -> TabulatedFunctionError {
        TabulatedFunctionError::MalformedInput(message.into())
    }
}

/// 截斷的串流與非 UTF-8 的文字屬於資料格式錯誤，其餘才是 I/O 錯誤。
impl From<io::Error> for TabulatedFunctionError {
    fn from(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::UnexpectedEof => {
                TabulatedFunctionError::MalformedInput("unexpected end of stream".to_owned())
            },
            io::ErrorKind::InvalidData => {
                TabulatedFunctionError::MalformedInput(error.to_string())
            },
            _ => TabulatedFunctionError::Io(error)
        }
    }
}
