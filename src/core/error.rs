use std::fmt;

/// Construction/loading failures. The per-tick path never produces these.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Ragged rows, zero dimensions or a bad tile size
    InvalidGrid(String),
    /// Non-positive or non-finite body size
    InvalidBody(String),
    /// Slope id outside the slope range or non-finite line points
    InvalidSlope(String),
    /// JSON input could not be decoded
    Parse(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Parse(e.to_string())
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidGrid(e) => write!(f, "invalid grid: {}", e),
            EngineError::InvalidBody(e) => write!(f, "invalid body: {}", e),
            EngineError::InvalidSlope(e) => write!(f, "invalid slope: {}", e),
            EngineError::Parse(e) => write!(f, "parse error: {}", e),
        }
    }
}

impl std::error::Error for EngineError {}
