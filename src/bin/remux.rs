//! remux2mp4: copy the streams of MKV/AVI files into MP4 containers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use aaxsplit::io::TerminalPrompt;
use aaxsplit::logging::init_tracing;
use aaxsplit::{BatchConfiguration, Extension, FailurePolicy, SourceKind, Toolchain, run_batch};

#[derive(Parser, Debug)]
#[command(
    name = "remux2mp4",
    version,
    about = "Remux MKV/AVI files to MP4 with ffmpeg, copying the video stream"
)]
struct RemuxArgs {
    /// Video file to remux, or a directory whose .mkv/.avi files are all remuxed
    #[arg(short, long = "input-file", value_name = "PATH")]
    input_file: PathBuf,

    /// Container extension to write
    #[arg(short, long, default_value = "mp4")]
    extension: Extension,

    /// Write each video's output into a new folder named after it
    #[arg(short = 'f', long, default_value_t = false)]
    create_destination_folder: bool,

    /// Print verbose information
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Force overwrite of existing output files
    #[arg(short = 'y', long, default_value_t = false)]
    overwrite: bool,

    /// Keep converting the remaining files when one fails
    #[arg(short = 'k', long, default_value_t = false)]
    continue_on_error: bool,

    /// Path to the ffmpeg executable (default: found on PATH)
    #[arg(long, value_name = "PATH")]
    ffmpeg: Option<PathBuf>,
}

impl RemuxArgs {
    fn into_config(self) -> BatchConfiguration {
        let mut config = BatchConfiguration::new(self.input_file, SourceKind::Remux);
        config.extension = self.extension;
        config.create_destination_folder = self.create_destination_folder;
        config.force_overwrite = self.overwrite;
        config.failure_policy = if self.continue_on_error {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Abort
        };
        config
    }
}

fn run(args: RemuxArgs) -> aaxsplit::Result<bool> {
    init_tracing(args.verbose);
    let ffmpeg = args.ffmpeg.clone();
    let config = args.into_config();
    config.validate()?;
    debug!("Configuration: {:?}", config);

    let tools = Toolchain::resolve(ffmpeg.as_deref(), None, false)?;
    let report = run_batch(&config, &tools, &mut TerminalPrompt::stdio())?;

    for failure in &report.failures {
        eprintln!("{}: {}", failure.source.display(), failure.error);
    }
    Ok(report.is_clean())
}

fn main() -> ExitCode {
    match run(RemuxArgs::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_remux_configuration() {
        let args =
            RemuxArgs::try_parse_from(["remux2mp4", "-i", "/videos", "-e", "mkv", "-y", "-k"])
                .unwrap();
        let config = args.into_config();

        assert_eq!(config.kind, SourceKind::Remux);
        assert_eq!(config.extension.as_str(), ".mkv");
        assert!(config.force_overwrite);
        assert!(!config.split_chapters);
        assert!(config.activation_bytes.is_none());
        assert_eq!(config.failure_policy, FailurePolicy::Continue);
    }
}
