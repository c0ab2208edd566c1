//! ffmpeg invocations for planned jobs.

use std::path::Path;

use tracing::debug;

use crate::core::params::BatchConfiguration;
use crate::error::{Error, Result};
use crate::io::process::{CommandRunner, ToolCommand};
use crate::io::tools::Toolchain;
use crate::types::{ConversionJob, SourceKind};

/// Format seconds the way ffmpeg's `-ss`/`-to` accept them.
fn seconds(value: f64) -> String {
    format!("{value}")
}

/// Build the ffmpeg command for `job`.
///
/// AAX: `-activation_bytes <token> -i <in> -vn -acodec copy [-ss s -to e] [-y] <out>`
/// (`-vcodec copy` instead of `-vn` when video is kept).
/// Remux: `-i <in> -vcodec copy -strict -2 [-ss s -to e] [-y] <out>`.
pub fn transcode_command(
    ffmpeg: &Path,
    job: &ConversionJob,
    config: &BatchConfiguration,
) -> Result<ToolCommand> {
    let mut cmd = ToolCommand::new(ffmpeg);

    match config.kind {
        SourceKind::Aax => {
            let token = config.activation_bytes.as_ref().ok_or_else(|| {
                Error::configuration("activation bytes are required to decrypt AAX files")
            })?;
            cmd = cmd
                .arg("-activation_bytes")
                .secret_arg(token.expose())
                .arg("-i")
                .arg(&job.source_path);
            cmd = if config.keep_video {
                cmd.args(["-vcodec", "copy"])
            } else {
                cmd.arg("-vn")
            };
            cmd = cmd.args(["-acodec", "copy"]);
        }
        SourceKind::Remux => {
            cmd = cmd
                .arg("-i")
                .arg(&job.source_path)
                .args(["-vcodec", "copy", "-strict", "-2"]);
        }
    }

    if let Some(range) = job.trim_range {
        cmd = cmd
            .arg("-ss")
            .arg(seconds(range.start))
            .arg("-to")
            .arg(seconds(range.end));
    }
    if job.force_overwrite {
        cmd = cmd.arg("-y");
    }
    Ok(cmd.arg(&job.output_path))
}

/// Run one job. A non-zero exit is reported with the exact command line and
/// the tool's output; nothing is retried and partial output is left as is.
pub fn run_job<R: CommandRunner>(
    tools: &Toolchain<R>,
    job: &ConversionJob,
    config: &BatchConfiguration,
) -> Result<()> {
    let command = transcode_command(&tools.ffmpeg, job, config)?;
    let output = tools.execute(&command)?;

    if !output.success {
        return Err(Error::TranscodeFailure {
            command: command.command_line(),
            output: output.diagnostic(),
        });
    }

    debug!("Wrote {:?}", job.output_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, ScriptedRunner};
    use crate::types::{ActivationBytes, Extension, TrimRange};
    use std::path::PathBuf;

    fn aax_config() -> BatchConfiguration {
        let mut config = BatchConfiguration::new("/books/book.aax", SourceKind::Aax);
        config.extension = Extension::parse("mp3").unwrap();
        config.activation_bytes = Some(ActivationBytes::new("1a2b3c4d").unwrap());
        config
    }

    fn chapter_job(force: bool) -> ConversionJob {
        ConversionJob {
            source_path: PathBuf::from("/books/book.aax"),
            output_path: PathBuf::from("/books/book_part1.mp3"),
            trim_range: Some(TrimRange {
                start: 0.0,
                end: 120.5,
            }),
            force_overwrite: force,
        }
    }

    #[test]
    fn aax_chapter_command() {
        let cmd = transcode_command(Path::new("ffmpeg"), &chapter_job(false), &aax_config())
            .unwrap();
        assert_eq!(
            cmd.command_line(),
            "ffmpeg -activation_bytes 1a2b3c4d -i /books/book.aax -vn -acodec copy \
             -ss 0 -to 120.5 /books/book_part1.mp3"
        );
        assert!(!cmd.redacted().contains("1a2b3c4d"));
    }

    #[test]
    fn overwrite_flag_precedes_output() {
        let cmd =
            transcode_command(Path::new("ffmpeg"), &chapter_job(true), &aax_config()).unwrap();
        let args: Vec<_> = cmd.args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(&args[args.len() - 2..], ["-y", "/books/book_part1.mp3"]);
    }

    #[test]
    fn keep_video_copies_the_stream() {
        let mut config = aax_config();
        config.keep_video = true;
        let cmd = transcode_command(Path::new("ffmpeg"), &chapter_job(false), &config).unwrap();
        let line = cmd.command_line();
        assert!(line.contains("-vcodec copy -acodec copy"));
        assert!(!line.contains("-vn"));
    }

    #[test]
    fn remux_command_copies_video() {
        let config = BatchConfiguration::new("/videos", SourceKind::Remux);
        let job = ConversionJob {
            source_path: PathBuf::from("/videos/movie.mkv"),
            output_path: PathBuf::from("/videos/movie.mp4"),
            trim_range: None,
            force_overwrite: true,
        };
        let cmd = transcode_command(Path::new("ffmpeg"), &job, &config).unwrap();
        assert_eq!(
            cmd.command_line(),
            "ffmpeg -i /videos/movie.mkv -vcodec copy -strict -2 -y /videos/movie.mp4"
        );
    }

    #[test]
    fn aax_without_token_is_a_configuration_error() {
        let mut config = aax_config();
        config.activation_bytes = None;
        let err =
            transcode_command(Path::new("ffmpeg"), &chapter_job(false), &config).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn nonzero_exit_reports_exact_command() {
        let tools = test_support::toolchain(ScriptedRunner::new(|_| {
            Ok(test_support::failed(1, "Invalid data found when processing input"))
        }));
        let config = aax_config();
        let job = chapter_job(false);
        let expected = transcode_command(Path::new("ffmpeg"), &job, &config)
            .unwrap()
            .command_line();

        let err = run_job(&tools, &job, &config).unwrap_err();
        match err {
            Error::TranscodeFailure { command, output } => {
                assert_eq!(command, expected);
                assert!(output.contains("Invalid data"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(tools.runner().calls().len(), 1);
    }
}
