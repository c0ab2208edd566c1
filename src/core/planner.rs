//! Turns probed chapters and the batch configuration into ordered
//! `ConversionJob`s. Everything here is pure except `ensure_destination`.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::params::BatchConfiguration;
use crate::error::{Error, Result};
use crate::types::{ChapterRecord, ConversionJob};

pub(crate) fn source_stem(source: &Path) -> Result<String> {
    source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| {
            Error::configuration(format!("{} has no file name", source.display()))
        })
}

/// `<parent>/<stem>` when destination folders are enabled, otherwise the
/// source's own parent.
pub fn destination_dir(source: &Path, config: &BatchConfiguration) -> Result<PathBuf> {
    let parent = source.parent().unwrap_or_else(|| Path::new(""));
    if config.create_destination_folder {
        Ok(parent.join(source_stem(source)?))
    } else {
        Ok(parent.to_path_buf())
    }
}

/// Create the destination directory if needed; existing directories are fine.
pub fn ensure_destination(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }
    debug!("Creating destination folder {:?}", dir);
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Plan the jobs for one source file.
///
/// With splitting requested and at least one chapter, one trimmed job per
/// chapter in ascending id order, named `<stem>_part<id><ext>` after
/// `source`. Otherwise (no split, or no chapters found) a single whole-file
/// job. The records' own `source_path` and `output_stem` are not consulted.
pub fn plan_jobs(
    source: &Path,
    config: &BatchConfiguration,
    chapters: Option<&[ChapterRecord]>,
) -> Result<Vec<ConversionJob>> {
    let dest = destination_dir(source, config)?;
    let ext = config.extension.as_str();
    let stem = source_stem(source)?;

    let chapters = match chapters {
        Some(chapters) if config.split_chapters && !chapters.is_empty() => chapters,
        _ => {
            return Ok(vec![ConversionJob {
                source_path: source.to_path_buf(),
                output_path: dest.join(format!("{stem}{ext}")),
                trim_range: None,
                force_overwrite: false,
            }]);
        }
    };

    let mut ordered: Vec<&ChapterRecord> = chapters.iter().collect();
    ordered.sort_by_key(|chapter| chapter.id);

    Ok(ordered
        .into_iter()
        .map(|chapter| ConversionJob {
            source_path: source.to_path_buf(),
            output_path: dest.join(format!("{stem}_part{}{ext}", chapter.id)),
            trim_range: Some(chapter.trim_range()),
            force_overwrite: false,
        })
        .collect())
}
