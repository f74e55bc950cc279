//! Error handling for the sort utility

use std::io;
use thiserror::Error;

/// Custom error type for sort operations
#[derive(Error, Debug)]
pub enum SortError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot read: {source_name}: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    #[error("cannot read: {file}: Permission denied")]
    PermissionDenied { file: String },

    #[error("cannot read: {file}: No such file or directory")]
    FileNotFound { file: String },

    #[error("read failed: {file}: Is a directory")]
    IsDirectory { file: String },

    #[error("cannot write: {file}: {reason}")]
    OutputFailed { file: String, reason: String },

    #[error("Conflicting sort options: {message}")]
    ConflictingOptions { message: String },

    #[error("{file}:{line}: disorder: {content}")]
    Disorder {
        file: String,
        line: usize,
        content: String,
    },

    #[error("Thread pool error: {message}")]
    ThreadPoolError { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },
}

impl SortError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SortError::Disorder { .. } => crate::EXIT_FAILURE,
            _ => crate::SORT_FAILURE,
        }
    }

    /// A named input that could not be opened or read
    pub fn source_unavailable(source_name: &str, reason: &str) -> Self {
        SortError::SourceUnavailable {
            source_name: source_name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(file: &str) -> Self {
        SortError::PermissionDenied {
            file: file.to_string(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(file: &str) -> Self {
        SortError::FileNotFound {
            file: file.to_string(),
        }
    }

    /// Create an is directory error
    pub fn is_directory(file: &str) -> Self {
        SortError::IsDirectory {
            file: file.to_string(),
        }
    }

    pub fn output_failed(file: &str, reason: &str) -> Self {
        SortError::OutputFailed {
            file: file.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a conflicting options error
    pub fn conflicting_options(message: &str) -> Self {
        SortError::ConflictingOptions {
            message: message.to_string(),
        }
    }

    /// Input handed to `--check` is out of order at `line` (1-based)
    pub fn disorder(file: &str, line: usize, content: &[u8]) -> Self {
        SortError::Disorder {
            file: file.to_string(),
            line,
            content: String::from_utf8_lossy(content).into_owned(),
        }
    }

    /// Create a thread pool error
    pub fn thread_pool_error(message: &str) -> Self {
        SortError::ThreadPoolError {
            message: message.to_string(),
        }
    }

    /// Create a parse error
    pub fn parse_error(message: &str) -> Self {
        SortError::ParseError {
            message: message.to_string(),
        }
    }

    /// True for every variant that means a named input could not be read
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            SortError::SourceUnavailable { .. }
                | SortError::PermissionDenied { .. }
                | SortError::FileNotFound { .. }
                | SortError::IsDirectory { .. }
        )
    }
}

/// Result type for sort operations
pub type SortResult<T> = Result<T, SortError>;

/// Attaches a source name or message to I/O failures
pub trait SortContext<T> {
    fn with_context<F>(self, f: F) -> SortResult<T>
    where
        F: FnOnce() -> String;

    fn with_file_context(self, filename: &str) -> SortResult<T>;
}

fn classify_source_error(io_err: io::Error, filename: &str) -> SortError {
    match io_err.kind() {
        io::ErrorKind::PermissionDenied => SortError::permission_denied(filename),
        io::ErrorKind::NotFound => SortError::file_not_found(filename),
        _ => SortError::source_unavailable(filename, &io_err.to_string()),
    }
}

impl<T> SortContext<T> for Result<T, io::Error> {
    fn with_context<F>(self, f: F) -> SortResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|io_err| {
            SortError::Io(io::Error::new(
                io_err.kind(),
                format!("{}: {}", f(), io_err),
            ))
        })
    }

    fn with_file_context(self, filename: &str) -> SortResult<T> {
        self.map_err(|io_err| classify_source_error(io_err, filename))
    }
}
