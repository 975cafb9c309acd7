use colored::{ColoredString, Colorize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Everything that can make a command fail
///
/// The `Display` implementation is the one-line message shown to the user
/// before the program exits with a non-zero code.
#[derive(Debug, Error)]
pub enum Error {
    /// A required option was missing or empty. Nothing was changed.
    #[error("{0}")]
    InvalidInput(String),

    #[error("No expenses found.")]
    NoExpenses,

    /// Unknown or missing command
    #[error("Invalid argument.")]
    InvalidArgument,

    /// The command line parser rejected a value
    #[error("{0}")]
    Usage(String),

    #[error("The data file {} is corrupt: {}", highlight(.path), .source)]
    DataCorrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Could not access {}: {}", highlight(.path), .source)]
    Io { path: PathBuf, source: io::Error },

    #[error("Bad config file {}\n{}", highlight(.path), .line)]
    Config { path: PathBuf, line: String },
}

impl Error {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn highlight(path: &Path) -> ColoredString {
    format!("{}", path.display()).red().bold()
}
