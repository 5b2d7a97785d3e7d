use std::path::PathBuf;

use thiserror::Error;

/// Errors raised around the search: reading adjacency input and writing
/// rendered graphs. A graph without a Hamiltonian path is not an error; the
/// search reports that as `None`.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed line in the text adjacency format.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file extension names no format the renderer can write.
    #[error("unsupported output format for {} (expected .dot, .gv or .svg)", .path.display())]
    UnsupportedFormat { path: PathBuf },
}

impl Error {
    pub fn parse<S: Into<String>>(line: usize, message: S) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
