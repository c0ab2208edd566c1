//! External tool layer: subprocess plumbing (`process`), tool discovery
//! (`tools`), the ffprobe chapter reader, the ffmpeg job executor and the
//! terminal overwrite prompt.
pub mod ffmpeg;
pub mod ffprobe;
pub mod process;
pub mod prompt;
pub mod tools;

pub use process::{CommandRunner, SystemRunner, ToolCommand, ToolOutput};
pub use prompt::TerminalPrompt;
pub use tools::Toolchain;
