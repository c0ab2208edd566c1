use tracing::{debug, info};

use aaxsplit::io::TerminalPrompt;
use aaxsplit::logging::init_tracing;
use aaxsplit::{BatchConfiguration, BatchReport, FailurePolicy, SourceKind, Toolchain, run_batch};

use super::args::CliArgs;
use super::errors::AppError;

fn build_config(args: &CliArgs) -> BatchConfiguration {
    let mut config = BatchConfiguration::new(&args.input_file, SourceKind::Aax);
    config.extension = args.extension.clone();
    config.split_chapters = args.split_chapters;
    config.create_destination_folder = args.create_destination_folder;
    config.force_overwrite = args.overwrite;
    config.keep_video = args.keep_video;
    config.failure_policy = if args.continue_on_error {
        FailurePolicy::Continue
    } else {
        FailurePolicy::Abort
    };
    config.activation_bytes = Some(args.activation_bytes.clone());
    config
}

/// Turn a finished batch into the process result: any failed file makes
/// the run unsuccessful even when the batch kept going.
pub fn finish(report: BatchReport) -> Result<(), AppError> {
    for failure in &report.failures {
        eprintln!("{}: {}", failure.source.display(), failure.error);
    }
    if report.is_clean() {
        Ok(())
    } else {
        Err(AppError::IncompleteBatch {
            failed: report.errors,
            total: report.processed + report.errors,
        })
    }
}

pub fn run(args: CliArgs) -> Result<(), AppError> {
    init_tracing(args.verbose);

    let config = build_config(&args);
    config.validate()?;
    debug!("Configuration: {:?}", config);

    let tools = Toolchain::resolve(
        args.ffmpeg.as_deref(),
        args.ffprobe.as_deref(),
        config.split_chapters,
    )?;

    if config.split_chapters {
        info!("Splitting chapters...");
    } else {
        info!("Converting file...");
    }

    let mut prompt = TerminalPrompt::stdio();
    let report = run_batch(&config, &tools, &mut prompt)?;
    finish(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["aaxsplit", "-i", "/books/book.aax", "-a", "1a2b3c4d"];
        argv.extend_from_slice(extra);
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn flags_map_onto_configuration() {
        let config = build_config(&parse(&["-e", "..mp3", "-s", "-f", "-y", "-k"]));

        assert_eq!(config.kind, SourceKind::Aax);
        assert_eq!(config.extension.as_str(), ".mp3");
        assert!(config.split_chapters);
        assert!(config.create_destination_folder);
        assert!(config.force_overwrite);
        assert_eq!(config.failure_policy, FailurePolicy::Continue);
        assert_eq!(
            config.activation_bytes.as_ref().map(|a| a.expose()),
            Some("1a2b3c4d")
        );
    }

    #[test]
    fn defaults_convert_whole_file_to_mp4() {
        let config = build_config(&parse(&[]));
        assert_eq!(config.extension.as_str(), ".mp4");
        assert!(!config.split_chapters);
        assert!(!config.force_overwrite);
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
    }

    #[test]
    fn verbose_flag_selects_debug_filter() {
        let quiet = parse(&[]);
        let verbose = parse(&["-v"]);

        assert_eq!(aaxsplit::logging::default_directive(quiet.verbose), "info");
        assert!(aaxsplit::logging::default_directive(verbose.verbose).contains("aaxsplit=debug"));
    }

    #[test]
    fn required_flags_are_enforced() {
        assert!(CliArgs::try_parse_from(["aaxsplit", "-i", "book.aax"]).is_err());
        assert!(CliArgs::try_parse_from(["aaxsplit", "-a", "1a2b3c4d"]).is_err());
        assert!(CliArgs::try_parse_from(["aaxsplit", "-i", "b.aax", "-a", "x", "--bogus"]).is_err());
    }

    #[test]
    fn failed_files_fail_the_run() {
        let report = BatchReport {
            processed: 1,
            errors: 1,
            ..Default::default()
        };
        assert!(matches!(
            finish(report),
            Err(AppError::IncompleteBatch { failed: 1, total: 2 })
        ));
        assert!(finish(BatchReport::default()).is_ok());
    }
}
