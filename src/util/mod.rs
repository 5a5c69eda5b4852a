//! Shared utilities

pub mod download;
pub mod fs;
pub mod process;

pub use process::CommandLine;
