//! Decides, per job, whether an existing output file may be replaced.
//!
//! The decision is separate from asking the question: `assess` only looks at
//! the filesystem, and `authorize` hands the "needs confirmation" case to a
//! `ConfirmOverwrite` implementation supplied by the caller.
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::types::ConversionJob;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum OverwriteDecision {
    /// Nothing to replace; ffmpeg needs no overwrite flag.
    NotExists,
    /// Output exists and the batch allows replacing it.
    ExistsForceAllowed,
    /// Output exists; the caller must confirm before replacing it.
    ExistsNeedsConfirmation,
}

/// Answers "may this existing file be overwritten?".
pub trait ConfirmOverwrite {
    fn confirm(&mut self, path: &Path) -> bool;
}

/// Non-interactive answer: never replace an existing file.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclineExisting;

impl ConfirmOverwrite for DeclineExisting {
    fn confirm(&mut self, _path: &Path) -> bool {
        false
    }
}

impl<F> ConfirmOverwrite for F
where
    F: FnMut(&Path) -> bool,
{
    fn confirm(&mut self, path: &Path) -> bool {
        self(path)
    }
}

pub fn assess(output: &Path, force_overwrite: bool) -> OverwriteDecision {
    if !output.exists() {
        OverwriteDecision::NotExists
    } else if force_overwrite {
        OverwriteDecision::ExistsForceAllowed
    } else {
        OverwriteDecision::ExistsNeedsConfirmation
    }
}

/// Resolve `job.force_overwrite` right before it runs. A declined
/// confirmation is fatal for the job.
pub fn authorize(
    job: &mut ConversionJob,
    force_overwrite: bool,
    confirm: &mut dyn ConfirmOverwrite,
) -> Result<()> {
    let decision = assess(&job.output_path, force_overwrite);
    debug!("Overwrite check for {:?}: {:?}", job.output_path, decision);

    job.force_overwrite = match decision {
        OverwriteDecision::NotExists => false,
        OverwriteDecision::ExistsForceAllowed => true,
        OverwriteDecision::ExistsNeedsConfirmation => {
            if confirm.confirm(&job.output_path) {
                true
            } else {
                return Err(Error::OverwriteDeclined {
                    path: job.output_path.clone(),
                });
            }
        }
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn job_for(output: &Path) -> ConversionJob {
        ConversionJob {
            source_path: output.with_extension("aax"),
            output_path: output.to_path_buf(),
            trim_range: None,
            force_overwrite: false,
        }
    }

    #[test]
    fn assess_covers_every_state() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("book.mp3");

        assert_eq!(assess(&output, false), OverwriteDecision::NotExists);
        assert_eq!(assess(&output, true), OverwriteDecision::NotExists);

        fs::write(&output, b"old").unwrap();
        assert_eq!(assess(&output, true), OverwriteDecision::ExistsForceAllowed);
        assert_eq!(
            assess(&output, false),
            OverwriteDecision::ExistsNeedsConfirmation
        );
    }

    #[test]
    fn fresh_output_needs_no_flag() {
        let dir = tempfile::tempdir().unwrap();
        let mut job = job_for(&dir.path().join("book.mp3"));

        authorize(&mut job, true, &mut DeclineExisting).unwrap();
        assert!(!job.force_overwrite);
    }

    #[test]
    fn forced_overwrite_skips_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("book.mp3");
        fs::write(&output, b"old").unwrap();
        let mut job = job_for(&output);

        let mut asked = false;
        let mut confirm = |_: &Path| {
            asked = true;
            false
        };
        authorize(&mut job, true, &mut confirm).unwrap();

        assert!(job.force_overwrite);
        assert!(!asked);
    }

    #[test]
    fn confirmation_decides_existing_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("book.mp3");
        fs::write(&output, b"old").unwrap();

        let mut accepted = job_for(&output);
        authorize(&mut accepted, false, &mut |_: &Path| true).unwrap();
        assert!(accepted.force_overwrite);

        let mut declined = job_for(&output);
        let err = authorize(&mut declined, false, &mut DeclineExisting).unwrap_err();
        assert!(matches!(err, Error::OverwriteDeclined { path } if path == output));
    }
}
