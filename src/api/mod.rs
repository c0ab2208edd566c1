//! High-level batch API: resolve the input into source files, then run
//! probe → plan → overwrite check → ffmpeg for each one, in order.
//! Prefer these entrypoints over the individual stages when embedding aaxsplit.
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::core::overwrite::{self, ConfirmOverwrite};
use crate::core::params::BatchConfiguration;
use crate::core::planner::{self, destination_dir};
use crate::error::{Error, Result};
use crate::io::ffmpeg::run_job;
use crate::io::ffprobe::probe_chapters;
use crate::io::process::CommandRunner;
use crate::io::tools::Toolchain;
use crate::types::{FailurePolicy, SourceKind};

/// One input file that failed under `FailurePolicy::Continue`.
#[derive(Debug)]
pub struct FileFailure {
    pub source: PathBuf,
    pub error: Error,
}

/// Batch processing report
#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
    /// Output files written across all sources
    pub outputs: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.errors == 0
    }
}

/// Source files for a batch plus the number of directory entries passed over.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SourceListing {
    pub files: Vec<PathBuf>,
    pub skipped: usize,
}

/// Resolve `input` into the files to convert.
///
/// A file is used as given. A directory yields its regular files whose
/// extension `kind` accepts, in `read_dir` order, without duplicates.
pub fn iterate_source_files(input: &Path, kind: SourceKind) -> Result<SourceListing> {
    if input.is_file() {
        return Ok(SourceListing {
            files: vec![input.to_path_buf()],
            skipped: 0,
        });
    }
    if !input.is_dir() {
        return Err(Error::configuration(format!(
            "input path {} does not exist",
            input.display()
        )));
    }

    let mut listing = SourceListing::default();
    let mut seen = HashSet::new();
    for entry in std::fs::read_dir(input)? {
        let path = entry?.path();
        if path.is_file() && kind.accepts(&path) {
            if seen.insert(path.clone()) {
                listing.files.push(path);
            }
        } else {
            info!("Skipping {:?}", path);
            listing.skipped += 1;
        }
    }

    if listing.files.is_empty() {
        warn!(
            "No {} files ({}) found in {:?}",
            kind,
            kind.accepted_extensions().join(", "),
            input
        );
    }
    Ok(listing)
}

/// Convert one source file. Jobs run in order and the first failure stops
/// the remaining jobs for this file. Returns the outputs written.
pub fn convert_source<R: CommandRunner>(
    source: &Path,
    config: &BatchConfiguration,
    tools: &Toolchain<R>,
    confirm: &mut dyn ConfirmOverwrite,
) -> Result<Vec<PathBuf>> {
    let chapters = if config.split_chapters {
        probe_chapters(tools, source)?
    } else {
        None
    };
    if config.split_chapters && chapters.is_none() {
        info!("No chapters in {:?}, converting the whole file", source);
    }

    let jobs = planner::plan_jobs(source, config, chapters.as_deref())?;
    planner::ensure_destination(&destination_dir(source, config)?)?;

    let total = jobs.len();
    let mut written = Vec::with_capacity(total);
    for (index, mut job) in jobs.into_iter().enumerate() {
        overwrite::authorize(&mut job, config.force_overwrite, confirm)?;
        if total > 1 {
            info!("Converting chapter {} of {}: {:?}", index + 1, total, job.output_path);
        } else {
            info!("Converting {:?} -> {:?}", source, job.output_path);
        }
        run_job(tools, &job, config)?;
        written.push(job.output_path);
    }
    Ok(written)
}

/// Run the whole batch described by `config`.
///
/// Under `FailurePolicy::Abort` the first failing file ends the run and its
/// error is returned wrapped with the file's path. Under
/// `FailurePolicy::Continue` failures are collected in the report and the
/// remaining files are still converted.
pub fn run_batch<R: CommandRunner>(
    config: &BatchConfiguration,
    tools: &Toolchain<R>,
    confirm: &mut dyn ConfirmOverwrite,
) -> Result<BatchReport> {
    config.validate()?;
    let listing = iterate_source_files(&config.input, config.kind)?;

    let mut report = BatchReport {
        skipped: listing.skipped,
        ..Default::default()
    };
    let mut produced: HashSet<PathBuf> = HashSet::new();

    for source in &listing.files {
        info!("Processing: {:?}", source);
        match convert_source(source, config, tools, confirm) {
            Ok(outputs) => {
                for output in &outputs {
                    if !produced.insert(output.clone()) {
                        warn!(
                            "{:?} was already written earlier in this run and has been replaced",
                            output
                        );
                    }
                }
                report.processed += 1;
                report.outputs.extend(outputs);
            }
            Err(e) => {
                report.errors += 1;
                match config.failure_policy {
                    FailurePolicy::Abort => return Err(e.for_source(source)),
                    FailurePolicy::Continue => {
                        error!("Error processing {:?}: {}", source, e);
                        report.failures.push(FileFailure {
                            source: source.clone(),
                            error: e,
                        });
                    }
                }
            }
        }
    }

    info!(
        "Batch complete: processed={} skipped={} errors={} outputs={}",
        report.processed,
        report.skipped,
        report.errors,
        report.outputs.len()
    );
    Ok(report)
}
