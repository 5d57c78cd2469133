use std::fmt;

/// Errors raised when camera parameters would leave their valid range.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraError {
    /// A constructed or mutated camera parameter is out of range.
    InvalidConfiguration(String),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(msg) => write!(f, "invalid camera configuration: {msg}"),
        }
    }
}

impl std::error::Error for CameraError {}
