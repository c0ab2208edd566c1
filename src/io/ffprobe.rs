//! Chapter metadata via ffprobe.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::core::planner::source_stem;
use crate::error::{Error, Result};
use crate::io::process::{CommandRunner, ToolCommand};
use crate::io::tools::Toolchain;
use crate::types::ChapterRecord;

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    chapters: Option<Vec<FfprobeChapter>>,
}

#[derive(Debug, Deserialize)]
struct FfprobeChapter {
    id: i64,
    start_time: Seconds,
    end_time: Seconds,
    #[serde(default)]
    tags: FfprobeTags,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeTags {
    title: Option<String>,
}

/// ffprobe prints times as strings; accept plain numbers too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Seconds {
    Number(f64),
    Text(String),
}

impl Seconds {
    fn to_f64(&self, field: &str, id: i64) -> std::result::Result<f64, String> {
        let value = match self {
            Seconds::Number(n) => *n,
            Seconds::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("chapter {id}: {field} {s:?} is not a number"))?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(format!("chapter {id}: {field} is not finite"))
        }
    }
}

/// `ffprobe -i <file> -print_format json -show_chapters -loglevel error`
pub fn probe_command(ffprobe: &Path, source: &Path) -> ToolCommand {
    ToolCommand::new(ffprobe)
        .arg("-i")
        .arg(source)
        .args(["-print_format", "json", "-show_chapters", "-loglevel", "error"])
}

/// Parse ffprobe's JSON into chapter records for `source`.
///
/// `Ok(None)` when the document has no chapters (missing or empty list).
pub fn parse_chapters(
    json: &str,
    source: &Path,
) -> std::result::Result<Option<Vec<ChapterRecord>>, String> {
    let output: FfprobeOutput =
        serde_json::from_str(json).map_err(|e| format!("invalid ffprobe JSON: {e}"))?;

    let chapters = match output.chapters {
        Some(chapters) if !chapters.is_empty() => chapters,
        _ => return Ok(None),
    };

    let stem = source_stem(source).map_err(|e| e.to_string())?;
    chapters
        .into_iter()
        .map(|chapter| {
            Ok(ChapterRecord {
                id: chapter.id,
                start_time: chapter.start_time.to_f64("start_time", chapter.id)?,
                end_time: chapter.end_time.to_f64("end_time", chapter.id)?,
                source_path: source.to_path_buf(),
                output_stem: format!("{stem}_part{}", chapter.id),
                title: chapter.tags.title,
            })
        })
        .collect::<std::result::Result<Vec<_>, String>>()
        .map(Some)
}

/// Probe `source` for chapters. `Ok(None)` means the file carries no chapter
/// metadata, which is not an error.
pub fn probe_chapters<R: CommandRunner>(
    tools: &Toolchain<R>,
    source: &Path,
) -> Result<Option<Vec<ChapterRecord>>> {
    debug!("Reading chapters from {:?}", source);
    let command = probe_command(&tools.ffprobe, source);
    let output = tools.execute(&command)?;

    if !output.success {
        return Err(Error::ProbeFailure {
            command: command.command_line(),
            diagnostic: output.diagnostic(),
        });
    }

    let json = String::from_utf8_lossy(&output.stdout);
    let chapters = parse_chapters(&json, source).map_err(|diagnostic| Error::ProbeFailure {
        command: command.command_line(),
        diagnostic,
    })?;

    match &chapters {
        Some(chapters) => {
            debug!("Found {} chapters in {:?}", chapters.len(), source);
            for chapter in chapters {
                debug!(
                    "  chapter {} [{:.3}s, {:.3}s) {}",
                    chapter.id,
                    chapter.start_time,
                    chapter.end_time,
                    chapter.title.as_deref().unwrap_or("")
                );
            }
        }
        None => debug!("No chapters found in {:?}", source),
    }
    Ok(chapters)
}
