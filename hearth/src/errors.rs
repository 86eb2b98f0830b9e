use std::fmt;

use ember::errors::EmberError;

#[derive(Debug)]
pub enum HearthError {
    /// A live controller already holds the per-process slot.
    AlreadyClaimed,
    /// The control dispatcher could not be engaged or spoken to.
    Dispatcher(String),
    /// The platform refused the service registration; carries the OS error
    /// code that becomes the process exit code.
    Registration(u32),
    Log(EmberError),
    Io(std::io::Error),
}

impl fmt::Display for HearthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HearthError::AlreadyClaimed => {
                write!(f, "another service controller is live in this process")
            }
            HearthError::Dispatcher(msg) => write!(f, "Dispatcher error: {}", msg),
            HearthError::Registration(code) => {
                write!(f, "Service registration failed (OS error {})", code)
            }
            HearthError::Log(e) => write!(f, "Log error: {}", e),
            HearthError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for HearthError {}

impl From<EmberError> for HearthError {
    fn from(err: EmberError) -> HearthError {
        HearthError::Log(err)
    }
}

impl From<std::io::Error> for HearthError {
    fn from(err: std::io::Error) -> HearthError {
        HearthError::Io(err)
    }
}
