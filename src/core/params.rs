use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::types::{ActivationBytes, Extension, FailurePolicy, SourceKind};

/// Everything a run needs, built once from the command line and passed by
/// reference to every stage.
///
/// Diagnostic verbosity is not part of the batch: the stages emit `debug!`
/// events and the installed subscriber's filter decides what is shown (see
/// [`init_tracing`](crate::logging::init_tracing)).
#[derive(Debug, Clone)]
pub struct BatchConfiguration {
    /// A single source file or a directory of them
    pub input: PathBuf,
    pub kind: SourceKind,
    pub extension: Extension,
    pub split_chapters: bool,
    /// Put each source's outputs under `<parent>/<stem>/`
    pub create_destination_folder: bool,
    pub force_overwrite: bool,
    /// Copy the video stream instead of dropping it (AAX only)
    pub keep_video: bool,
    pub failure_policy: FailurePolicy,
    /// Required for `SourceKind::Aax`
    pub activation_bytes: Option<ActivationBytes>,
}

impl BatchConfiguration {
    /// Defaults: `.mp4` output, no splitting, outputs beside the source,
    /// no silent overwrites, stop at the first failure.
    pub fn new<P: Into<PathBuf>>(input: P, kind: SourceKind) -> Self {
        Self {
            input: input.into(),
            kind,
            extension: Extension::default(),
            split_chapters: false,
            create_destination_folder: false,
            force_overwrite: false,
            keep_video: false,
            failure_policy: FailurePolicy::Abort,
            activation_bytes: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.input.exists() {
            return Err(Error::configuration(format!(
                "input path {} does not exist",
                self.input.display()
            )));
        }
        if self.kind == SourceKind::Aax && self.activation_bytes.is_none() {
            return Err(Error::configuration(
                "activation bytes are required to decrypt AAX files",
            ));
        }
        Ok(())
    }
}
