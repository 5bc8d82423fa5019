use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort an analysis run.
///
/// Anything that merely cannot be interpreted while extracting widgets
/// (non-literal arguments, unresolved receivers) is skipped and never
/// surfaces here.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The target path does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The target exists but could not be read.
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The target is not syntactically valid Python.
    #[error("failed to parse {}: line {line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// The configuration file could not be read or deserialized.
    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}
