//! Error types
//!
//! Defines domain-specific error types for each module of the page server.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Course lookup errors
#[derive(Debug)]
pub enum CourseError {
    /// No registered course path is a prefix of the logical path.
    NotFound(String),
}

impl fmt::Display for CourseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseError::NotFound(p) => write!(f, "No course for page path: \"{}\"", p),
        }
    }
}

impl std::error::Error for CourseError {}

/// Access declaration errors
#[derive(Debug)]
pub enum PermissionError {
    /// The nearest access declaration exists but could not be parsed.
    Malformed { path: PathBuf, reason: String },
    /// The nearest access declaration exists but could not be read.
    Unreadable { path: PathBuf, source: io::Error },
}

impl fmt::Display for PermissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionError::Malformed { path, reason } => write!(
                f,
                "Malformed access declaration {}: {}",
                path.display(),
                reason
            ),
            PermissionError::Unreadable { path, source } => write!(
                f,
                "Unreadable access declaration {}: {}",
                path.display(),
                source
            ),
        }
    }
}

impl std::error::Error for PermissionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PermissionError::Unreadable { source, .. } => Some(source),
            PermissionError::Malformed { .. } => None,
        }
    }
}

/// Page resolution errors
#[derive(Debug)]
pub enum PageError {
    InvalidPath(String),
    Course(CourseError),
    Permission(PermissionError),
    Io(io::Error),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::InvalidPath(p) => write!(f, "Invalid page path: {}", p),
            PageError::Course(e) => write!(f, "{}", e),
            PageError::Permission(e) => write!(f, "{}", e),
            PageError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for PageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PageError::Course(e) => Some(e),
            PageError::Permission(e) => Some(e),
            PageError::Io(e) => Some(e),
            PageError::InvalidPath(_) => None,
        }
    }
}

impl From<CourseError> for PageError {
    fn from(error: CourseError) -> Self {
        PageError::Course(error)
    }
}

impl From<PermissionError> for PageError {
    fn from(error: PermissionError) -> Self {
        PageError::Permission(error)
    }
}

impl From<io::Error> for PageError {
    fn from(error: io::Error) -> Self {
        PageError::Io(error)
    }
}

/// General server error that encompasses all error types
#[derive(Debug)]
pub enum PageServerError {
    Page(PageError),
    Config(config::ConfigError),
    IoError(io::Error),
}

impl fmt::Display for PageServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageServerError::Page(e) => write!(f, "Page error: {}", e),
            PageServerError::Config(e) => write!(f, "Configuration error: {}", e),
            PageServerError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for PageServerError {}

impl From<PageError> for PageServerError {
    fn from(error: PageError) -> Self {
        PageServerError::Page(error)
    }
}

impl From<config::ConfigError> for PageServerError {
    fn from(error: config::ConfigError) -> Self {
        PageServerError::Config(error)
    }
}

impl From<io::Error> for PageServerError {
    fn from(error: io::Error) -> Self {
        PageServerError::IoError(error)
    }
}
