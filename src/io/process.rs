//! Subprocess plumbing shared by the probe and transcode stages.
//!
//! Every invocation goes through a `CommandRunner` so the pipeline can be
//! driven without real tools in tests. `SystemRunner` waits for the process
//! and collects all of its output before returning, so no handle outlives a
//! job.
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// A program plus its arguments, rendered for logs and error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// Argument values replaced by `****` in `redacted()`.
    secrets: Vec<OsString>,
}

impl ToolCommand {
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            secrets: Vec::new(),
        }
    }

    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Push an argument that must not show up in logs.
    pub fn secret_arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        let arg = arg.as_ref().to_os_string();
        self.secrets.push(arg.clone());
        self.args.push(arg);
        self
    }

    /// Name used in `ToolNotFound` errors.
    pub fn tool_name(&self) -> String {
        self.program
            .file_name()
            .unwrap_or(self.program.as_os_str())
            .to_string_lossy()
            .into_owned()
    }

    /// The exact command line, space separated.
    pub fn command_line(&self) -> String {
        self.render(false)
    }

    /// The command line with secret arguments masked.
    pub fn redacted(&self) -> String {
        self.render(true)
    }

    fn render(&self, redact: bool) -> String {
        let mut parts = vec![self.program.to_string_lossy().into_owned()];
        for arg in &self.args {
            if redact && self.secrets.contains(arg) {
                parts.push(crate::types::ActivationBytes::REDACTED.to_string());
            } else {
                parts.push(arg.to_string_lossy().into_owned());
            }
        }
        parts.join(" ")
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    /// stderr followed by stdout, lossily decoded, for error reports.
    pub fn diagnostic(&self) -> String {
        let stderr = String::from_utf8_lossy(&self.stderr);
        let stdout = String::from_utf8_lossy(&self.stdout);
        match (stderr.trim().is_empty(), stdout.trim().is_empty()) {
            (false, true) => stderr.trim_end().to_string(),
            (true, false) => stdout.trim_end().to_string(),
            (true, true) => match self.code {
                Some(code) => format!("exited with status {code}"),
                None => "terminated by signal".to_string(),
            },
            (false, false) => format!("{}\n{}", stderr.trim_end(), stdout.trim_end()),
        }
    }
}

pub trait CommandRunner {
    /// Run to completion. `Err` only when the process could not be started.
    fn run(&self, command: &ToolCommand) -> std::io::Result<ToolOutput>;
}

/// Runs commands with `std::process::Command`, stdin closed.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &ToolCommand) -> std::io::Result<ToolOutput> {
        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .output()?;
        Ok(ToolOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command: &ToolCommand) -> std::io::Result<ToolOutput> {
        (**self).run(command)
    }
}
