//! Locating ffmpeg/ffprobe and running them through a `CommandRunner`.
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::io::process::{CommandRunner, SystemRunner, ToolCommand, ToolOutput};

pub const FFMPEG: &str = "ffmpeg";
pub const FFPROBE: &str = "ffprobe";

/// Resolve a tool path: an explicit path wins when it exists, otherwise the
/// name is looked up on `PATH`.
pub fn locate_tool(name: &str, explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(Error::tool_not_found(format!(
            "{name} (no file at {})",
            path.display()
        )));
    }
    which::which(name).map_err(|_| Error::tool_not_found(name))
}

/// The external tools a batch needs and how to run them.
#[derive(Debug, Clone)]
pub struct Toolchain<R = SystemRunner> {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
    runner: R,
}

impl Toolchain<SystemRunner> {
    /// Find the tools on this machine. ffprobe is only looked up when
    /// `needs_probe` is set, so whole-file conversions work without it.
    pub fn resolve(
        ffmpeg: Option<&Path>,
        ffprobe: Option<&Path>,
        needs_probe: bool,
    ) -> Result<Self> {
        let ffmpeg = locate_tool(FFMPEG, ffmpeg)?;
        let ffprobe = if needs_probe {
            locate_tool(FFPROBE, ffprobe)?
        } else {
            ffprobe.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(FFPROBE))
        };
        debug!("Using ffmpeg at {:?}, ffprobe at {:?}", ffmpeg, ffprobe);
        Ok(Self::with_runner(ffmpeg, ffprobe, SystemRunner))
    }
}

impl<R: CommandRunner> Toolchain<R> {
    pub fn with_runner<A, B>(ffmpeg: A, ffprobe: B, runner: R) -> Self
    where
        A: Into<PathBuf>,
        B: Into<PathBuf>,
    {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
            runner,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run `command` to completion. A missing executable becomes
    /// `ToolNotFound`; exit status is left for the caller to judge.
    pub fn execute(&self, command: &ToolCommand) -> Result<ToolOutput> {
        debug!("Running: {}", command.redacted());
        self.runner.run(command).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found(command.tool_name())
            } else {
                Error::Io(e)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("ffmpeg");
        let err = locate_tool(FFMPEG, Some(&missing)).unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { .. }));

        std::fs::write(&missing, b"").unwrap();
        assert_eq!(locate_tool(FFMPEG, Some(&missing)).unwrap(), missing);
    }

    #[test]
    fn unknown_tool_is_not_found() {
        let err = locate_tool("nonexistent_tool_12345", None).unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { tool } if tool == "nonexistent_tool_12345"));
    }

    #[test]
    fn spawn_failure_maps_to_tool_not_found() {
        let tools = Toolchain::with_runner(
            "/definitely/not/here/ffmpeg",
            "/definitely/not/here/ffprobe",
            SystemRunner,
        );
        let err = tools
            .execute(&ToolCommand::new("/definitely/not/here/ffmpeg"))
            .unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { tool } if tool == "ffmpeg"));
    }
}
