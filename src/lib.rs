#![doc = r#"
aaxsplit — batch conversion of Audible AAX and MKV/AVI files through ffmpeg.

All decoding and encoding is done by the external `ffmpeg`/`ffprobe` tools.
This crate decides *what* to run: it reads chapter markers with ffprobe, plans
one output per chapter (or one per file), checks every output against an
overwrite policy, and runs ffmpeg once per planned job, strictly in order.

Two binaries ship with the crate:
- `aaxsplit` decrypts AAX audiobooks with your activation bytes and copies the
  audio stream, optionally split by chapter.
- `remux2mp4` remuxes MKV/AVI video into MP4 without re-encoding.

Requirements
------------
`ffmpeg` on `PATH` (or passed explicitly), and `ffprobe` when splitting by
chapter.

Convert a directory of audiobooks
---------------------------------
```rust,no_run
use aaxsplit::{
    ActivationBytes, BatchConfiguration, DeclineExisting, Extension, SourceKind, Toolchain,
    run_batch,
};

fn main() -> aaxsplit::Result<()> {
    let mut config = BatchConfiguration::new("/audiobooks", SourceKind::Aax);
    config.extension = Extension::parse("m4b")?;
    config.split_chapters = true;
    config.create_destination_folder = true;
    config.activation_bytes = Some(ActivationBytes::new("1a2b3c4d")?);

    let tools = Toolchain::resolve(None, None, config.split_chapters)?;
    let report = run_batch(&config, &tools, &mut DeclineExisting)?;

    println!("processed={} errors={}", report.processed, report.errors);
    Ok(())
}
```

Plan without running anything
-----------------------------
```rust
use std::path::{Path, PathBuf};
use aaxsplit::{BatchConfiguration, ChapterRecord, Extension, SourceKind, plan_jobs};

let mut config = BatchConfiguration::new("/books/book.aax", SourceKind::Aax);
config.extension = Extension::parse("mp3").unwrap();
config.split_chapters = true;

let source = Path::new("/books/book.aax");
let chapters = vec![ChapterRecord {
    id: 1,
    start_time: 0.0,
    end_time: 120.5,
    source_path: source.to_path_buf(),
    output_stem: "book_part1".into(),
    title: None,
}];

let jobs = plan_jobs(source, &config, Some(chapters.as_slice())).unwrap();
assert_eq!(jobs[0].output_path, PathBuf::from("/books/book_part1.mp3"));
```

Error handling
--------------
Every fallible function returns `aaxsplit::Result<T>`. Failures of a whole
input file arrive as `Error::Source { path, source }`; use `Error::root` to
reach the underlying `ProbeFailure`, `TranscodeFailure`, `OverwriteDeclined`
or `Configuration` error.

Useful modules
--------------
- [`api`] — batch driver and per-file conversion.
- [`core`](crate::core) — configuration, chapter planner, overwrite guard.
- [`io`] — ffprobe/ffmpeg invocation and tool discovery.
- [`types`] — records and small value types.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod logging;
pub mod types;

mod test_support;

// Curated public API surface
pub use crate::core::overwrite::{ConfirmOverwrite, DeclineExisting, OverwriteDecision};
pub use crate::core::params::BatchConfiguration;
pub use crate::core::planner::plan_jobs;
pub use crate::error::{Error, Result};
pub use crate::types::{
    ActivationBytes, ChapterRecord, ConversionJob, Extension, FailurePolicy, SourceKind,
    TrimRange,
};

pub use crate::io::ffprobe::probe_chapters;
pub use crate::io::tools::Toolchain;

pub use crate::api::{
    BatchReport, FileFailure, SourceListing, convert_source, iterate_source_files, run_batch,
};
