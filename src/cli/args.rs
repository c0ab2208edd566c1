use clap::Parser;
use std::path::PathBuf;

use aaxsplit::{ActivationBytes, Extension};

#[derive(Parser, Debug)]
#[command(
    name = "aaxsplit",
    version,
    about = "Convert Audible AAX files with ffmpeg, optionally split by chapter"
)]
pub struct CliArgs {
    /// AAX file to convert, or a directory whose .aax files are all converted
    #[arg(short, long = "input-file", value_name = "PATH")]
    pub input_file: PathBuf,

    /// Authentication key from your Audible account, used by ffmpeg to
    /// decrypt the file. See https://ffmpeg.org/ffmpeg-all.html#Audible-AAX
    #[arg(short, long, value_name = "XXXXXXXX")]
    pub activation_bytes: ActivationBytes,

    /// Extension / audio container to convert to
    #[arg(short, long, default_value = "mp4")]
    pub extension: Extension,

    /// Split the audio into one file per chapter using ffprobe metadata
    #[arg(short, long, default_value_t = false)]
    pub split_chapters: bool,

    /// Write each book's outputs into a new folder named after it
    #[arg(short = 'f', long, default_value_t = false)]
    pub create_destination_folder: bool,

    /// Print verbose information
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Force overwrite of existing output files
    #[arg(short = 'y', long, default_value_t = false)]
    pub overwrite: bool,

    /// Keep converting the remaining files when one fails
    #[arg(short = 'k', long, default_value_t = false)]
    pub continue_on_error: bool,

    /// Copy the video stream (cover art) instead of dropping it
    #[arg(long, default_value_t = false)]
    pub keep_video: bool,

    /// Path to the ffmpeg executable (default: found on PATH)
    #[arg(long, value_name = "PATH")]
    pub ffmpeg: Option<PathBuf>,

    /// Path to the ffprobe executable (default: found on PATH)
    #[arg(long, value_name = "PATH")]
    pub ffprobe: Option<PathBuf>,
}
