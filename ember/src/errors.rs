use std::fmt;

#[derive(Debug)]
pub enum EmberError {
    Io(std::io::Error),
    Custom(String),
}

impl fmt::Display for EmberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmberError::Io(e) => write!(f, "IO error: {}", e),
            EmberError::Custom(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for EmberError {}

impl From<std::io::Error> for EmberError {
    fn from(err: std::io::Error) -> EmberError {
        EmberError::Io(err)
    }
}
