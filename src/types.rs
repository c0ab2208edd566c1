//! Shared types used across aaxsplit.
//! Includes the source kinds, the failure policy, the normalized output
//! `Extension`, the redacting `ActivationBytes` token, and the two records that
//! flow through the pipeline: `ChapterRecord` and `ConversionJob`.
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::Error;

/// Which pipeline a batch runs.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SourceKind {
    /// Audible AAX, decrypted with activation bytes; audio copied without re-encoding.
    Aax,
    /// Unprotected container (MKV/AVI) remuxed with the video stream copied.
    Remux,
}

impl SourceKind {
    /// Lowercase extensions picked up when the input is a directory.
    pub fn accepted_extensions(&self) -> &'static [&'static str] {
        match self {
            SourceKind::Aax => &["aax"],
            SourceKind::Remux => &["mkv", "avi"],
        }
    }

    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.accepted_extensions()
                    .iter()
                    .any(|accepted| ext.eq_ignore_ascii_case(accepted))
            })
            .unwrap_or(false)
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Aax => write!(f, "aax"),
            SourceKind::Remux => write!(f, "remux"),
        }
    }
}

/// What the batch driver does after one input file fails.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum FailurePolicy {
    /// Stop at the first failing file and return its error.
    #[default]
    Abort,
    /// Record the failure in the report and move on to the next file.
    Continue,
}

/// Output extension with exactly one leading dot, e.g. `.mp3`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Extension(String);

impl Extension {
    /// Strips every `.` from `raw` and prefixes a single one, so `mp4`,
    /// `.mp4` and `..mp4` all normalize to `.mp4`.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let bare: String = raw.trim().chars().filter(|c| *c != '.').collect();
        if bare.is_empty() {
            return Err(Error::configuration(format!(
                "extension {raw:?} is empty once dots are removed"
            )));
        }
        if bare.contains(std::path::is_separator) {
            return Err(Error::configuration(format!(
                "extension {raw:?} contains a path separator"
            )));
        }
        Ok(Extension(format!(".{bare}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Extension {
    fn default() -> Self {
        Extension(".mp4".to_string())
    }
}

impl FromStr for Extension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Extension::parse(s)
    }
}

impl std::fmt::Display for Extension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque decryption token handed to ffmpeg as `-activation_bytes`.
/// Never printed through `Debug` or `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct ActivationBytes(String);

impl ActivationBytes {
    pub const REDACTED: &'static str = "****";

    pub fn new<S: Into<String>>(token: S) -> Result<Self, Error> {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::configuration("activation bytes must not be empty"));
        }
        Ok(ActivationBytes(token.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl FromStr for ActivationBytes {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivationBytes::new(s)
    }
}

impl std::fmt::Debug for ActivationBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ActivationBytes({})", Self::REDACTED)
    }
}

/// Half-open time range in seconds, `[start, end)`.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TrimRange {
    pub start: f64,
    pub end: f64,
}

/// One chapter of a probed source file.
#[derive(Clone, PartialEq, Debug)]
pub struct ChapterRecord {
    pub id: i64,
    pub start_time: f64,
    pub end_time: f64,
    pub source_path: PathBuf,
    /// Tentative `<source-stem>_part<id>` as probed. Informational only: the
    /// planner derives output names from the source it is planning.
    pub output_stem: String,
    pub title: Option<String>,
}

impl ChapterRecord {
    pub fn trim_range(&self) -> TrimRange {
        TrimRange {
            start: self.start_time,
            end: self.end_time,
        }
    }
}

/// One ffmpeg invocation.
#[derive(Clone, PartialEq, Debug)]
pub struct ConversionJob {
    pub source_path: PathBuf,
    pub output_path: PathBuf,
    /// `None` converts the whole file.
    pub trim_range: Option<TrimRange>,
    /// Set by the overwrite guard; passes `-y` to ffmpeg when true.
    pub force_overwrite: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_normalization_is_idempotent() {
        let plain = Extension::parse("mp4").unwrap();
        let dotted = Extension::parse(".mp4").unwrap();
        let double = Extension::parse("..mp4").unwrap();

        assert_eq!(plain.as_str(), ".mp4");
        assert_eq!(plain, dotted);
        assert_eq!(plain, double);
        assert_eq!(Extension::parse(plain.as_str()).unwrap(), plain);
    }

    #[test]
    fn extension_rejects_empty_values() {
        assert!(matches!(Extension::parse(""), Err(Error::Configuration(_))));
        assert!(matches!(Extension::parse("..."), Err(Error::Configuration(_))));
        assert!(matches!(Extension::parse("a/b"), Err(Error::Configuration(_))));
    }

    #[test]
    fn activation_bytes_never_leak_through_debug() {
        let token = ActivationBytes::new("1a2b3c4d").unwrap();
        let debug = format!("{token:?}");
        assert!(!debug.contains("1a2b3c4d"));
        assert_eq!(token.expose(), "1a2b3c4d");
        assert!(ActivationBytes::new("   ").is_err());
    }

    #[test]
    fn source_kind_matches_extensions_case_insensitively() {
        assert!(SourceKind::Aax.accepts(Path::new("/books/Book.AAX")));
        assert!(!SourceKind::Aax.accepts(Path::new("/books/book.mp3")));
        assert!(SourceKind::Remux.accepts(Path::new("movie.mkv")));
        assert!(SourceKind::Remux.accepts(Path::new("movie.Avi")));
        assert!(!SourceKind::Remux.accepts(Path::new("movie")));
    }
}
