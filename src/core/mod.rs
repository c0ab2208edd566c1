//! Core building blocks that need no external tools: the batch
//! configuration, the chapter planner and the overwrite guard. Consumed by
//! the high-level `api` driver.
pub mod overwrite;
pub mod params;
pub mod planner;
