// ctsl-report - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every error keeps its cause
// for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all ctsl-report operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum CtslError {
    /// Reading or parsing the result-set input failed.
    Input(InputError),

    /// Export serialisation failed.
    Export(ExportError),

    /// I/O error with path context (export file writes).
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for CtslError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(e) => write!(f, "{e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for CtslError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Input(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

/// Errors related to reading and parsing the matching service's response.
#[derive(Debug)]
pub enum InputError {
    /// The submitted query (and therefore the response body) was blank.
    EmptyQuery,

    /// The response body is not a valid result-set JSON array.
    Json { source: serde_json::Error },

    /// I/O error reading the input file or stream.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyQuery => write!(f, "Please enter a query"),
            Self::Json { source } => write!(f, "Invalid result JSON: {source}"),
            Self::Io { path, source } => {
                write!(f, "Cannot read '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::EmptyQuery => None,
        }
    }
}

impl From<InputError> for CtslError {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to CSV and JSON export.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing to the export sink.
    Io { source: io::Error },

    /// JSON serialisation error.
    Json { source: serde_json::Error },

    /// Export would exceed the maximum row count.
    TooManyRows { count: usize, max: usize },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { source } => write!(f, "export write failed: {source}"),
            Self::Json { source } => write!(f, "JSON serialisation failed: {source}"),
            Self::TooManyRows { count, max } => {
                write!(f, "export of {count} rows exceeds maximum of {max}")
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source } => Some(source),
            Self::Json { source } => Some(source),
            Self::TooManyRows { .. } => None,
        }
    }
}

impl From<ExportError> for CtslError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Convenience type alias for ctsl-report results.
pub type Result<T> = std::result::Result<T, CtslError>;
