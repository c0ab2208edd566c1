use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{failed} of {total} input files failed to convert")]
    IncompleteBatch { failed: usize, total: usize },

    #[error(transparent)]
    Convert(#[from] aaxsplit::Error),
}
