//! Command Line Interface (CLI) layer for aaxsplit.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) that turns the parsed flags into a
//! `BatchConfiguration` and hands it to `aaxsplit::run_batch`.
//!
//! If you are embedding aaxsplit into another application, prefer the
//! library API (`aaxsplit::api`) over the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
