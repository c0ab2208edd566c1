//! Scripted stand-ins for ffmpeg/ffprobe used by unit tests.

#![cfg(test)]

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;

use crate::io::process::{CommandRunner, ToolCommand, ToolOutput};
use crate::io::tools::Toolchain;

type Responder = Box<dyn Fn(&ToolCommand) -> io::Result<ToolOutput>>;

/// Records every command and answers with a caller-supplied closure.
pub struct ScriptedRunner {
    calls: RefCell<Vec<ToolCommand>>,
    respond: Responder,
}

impl ScriptedRunner {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&ToolCommand) -> io::Result<ToolOutput> + 'static,
    {
        Self {
            calls: RefCell::new(Vec::new()),
            respond: Box::new(respond),
        }
    }

    /// ffprobe prints `probe_json`; ffmpeg succeeds and writes its output file.
    pub fn writing_outputs(probe_json: &str) -> Self {
        let probe_json = probe_json.to_string();
        Self::new(move |cmd| {
            if is_probe(cmd) {
                Ok(ok(&probe_json))
            } else {
                std::fs::write(output_of(cmd), b"converted")?;
                Ok(ok(""))
            }
        })
    }

    pub fn calls(&self) -> Vec<ToolCommand> {
        self.calls.borrow().clone()
    }

    /// Command lines of the ffmpeg invocations, in order.
    pub fn transcodes(&self) -> Vec<ToolCommand> {
        self.calls().into_iter().filter(|c| !is_probe(c)).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &ToolCommand) -> io::Result<ToolOutput> {
        self.calls.borrow_mut().push(command.clone());
        (self.respond)(command)
    }
}

pub fn toolchain(runner: ScriptedRunner) -> Toolchain<ScriptedRunner> {
    Toolchain::with_runner("ffmpeg", "ffprobe", runner)
}

pub fn is_probe(cmd: &ToolCommand) -> bool {
    cmd.tool_name() == "ffprobe"
}

/// The output path is always the last ffmpeg argument.
pub fn output_of(cmd: &ToolCommand) -> PathBuf {
    PathBuf::from(cmd.args.last().cloned().unwrap_or_default())
}

/// The input path follows `-i`.
pub fn input_of(cmd: &ToolCommand) -> PathBuf {
    let at = cmd.args.iter().position(|a| a == "-i").expect("command has -i");
    PathBuf::from(&cmd.args[at + 1])
}

pub fn ok(stdout: &str) -> ToolOutput {
    ToolOutput {
        success: true,
        code: Some(0),
        stdout: stdout.as_bytes().to_vec(),
        stderr: Vec::new(),
    }
}

pub fn failed(code: i32, stderr: &str) -> ToolOutput {
    ToolOutput {
        success: false,
        code: Some(code),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

pub const TWO_CHAPTERS: &str = r#"{
    "chapters": [
        {
            "id": 1,
            "time_base": "1/1000",
            "start": 0,
            "start_time": "0.000000",
            "end": 120500,
            "end_time": "120.500000",
            "tags": { "title": "Opening Credits" }
        },
        {
            "id": 2,
            "time_base": "1/1000",
            "start": 120500,
            "start_time": "120.500000",
            "end": 300000,
            "end_time": "300.000000",
            "tags": { "title": "Chapter 1" }
        }
    ]
}"#;
