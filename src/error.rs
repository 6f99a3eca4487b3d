/// Error types for the protocol detection core
use std::fmt;

/// Result type alias for detection-context build operations
pub type Result<T> = std::result::Result<T, DetectError>;

/// Main error type for building a `DetectionContext`.
///
/// `DetectionEngine::identify` itself never returns an error: short of an
/// internal invariant violation (a programmer error, which aborts), it
/// produces `AppProto::Unknown` for any condition short of a confirmed
/// match. These variants only arise while registering signatures and
/// finalizing the context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectError {
    /// Pattern notation could not be parsed, was empty, or had depth < content length
    InvalidPattern(String),

    /// Allocation failure during build
    OutOfMemory(String),

    /// I/O errors (reading pattern/signature files for the CLI)
    Io(String),

    /// General validation errors
    Validation(String),

    /// General errors
    Other(String),
}

impl fmt::Display for DetectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectError::InvalidPattern(msg) => write!(f, "Invalid pattern: {}", msg),
            DetectError::OutOfMemory(msg) => write!(f, "Out of memory: {}", msg),
            DetectError::Io(msg) => write!(f, "I/O error: {}", msg),
            DetectError::Validation(msg) => write!(f, "Validation error: {}", msg),
            DetectError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for DetectError {}

impl From<std::io::Error> for DetectError {
    fn from(err: std::io::Error) -> Self {
        DetectError::Io(err.to_string())
    }
}

impl From<String> for DetectError {
    fn from(msg: String) -> Self {
        DetectError::Other(msg)
    }
}

impl From<&str> for DetectError {
    fn from(msg: &str) -> Self {
        DetectError::Other(msg.to_string())
    }
}
