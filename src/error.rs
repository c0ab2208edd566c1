//! Crate-level error type and `Result` alias.
//! The variants form a closed set so callers can tell an expected-but-unwanted
//! outcome (a declined overwrite) apart from a genuine tool failure.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Required tool not found: {tool}")]
    ToolNotFound { tool: String },

    #[error("Probe failed: `{command}`\n{diagnostic}")]
    ProbeFailure { command: String, diagnostic: String },

    #[error("Transcode failed: `{command}`\n{output}")]
    TranscodeFailure { command: String, output: String },

    #[error("Output file {} already exists and was not overwritten", path.display())]
    OverwriteDeclined { path: PathBuf },

    #[error("{}: {source}", path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Error::Configuration(message.into())
    }

    pub fn tool_not_found<S: Into<String>>(tool: S) -> Self {
        Error::ToolNotFound { tool: tool.into() }
    }

    /// Attach the input file that was being converted when `self` happened.
    pub fn for_source<P: Into<PathBuf>>(self, path: P) -> Self {
        Error::Source {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// The underlying error, looking through any `Source` wrapping.
    pub fn root(&self) -> &Error {
        match self {
            Error::Source { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_wrapping_names_the_file() {
        let err = Error::OverwriteDeclined {
            path: PathBuf::from("/books/book_part1.mp3"),
        }
        .for_source("/books/book.aax");

        let msg = err.to_string();
        assert!(msg.starts_with("/books/book.aax: "));
        assert!(msg.contains("book_part1.mp3"));
        assert!(matches!(err.root(), Error::OverwriteDeclined { .. }));
    }
}
