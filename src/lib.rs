//! fbxci - CI build and packaging pipeline for the fbx-gltf-conv CLI
//!
//! This crate drives a single-invocation native build of fbx-gltf-conv on
//! Windows, macOS, and Linux: it installs the Autodesk FBX SDK, bootstraps
//! vcpkg, resolves native dependencies (merging per-architecture macOS
//! builds into a universal tree), runs CMake per build configuration,
//! verifies the install output, and optionally archives it.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod platform;
pub mod stages;
pub mod util;

pub use config::{BuildConfiguration, RunConfig};
pub use error::PipelineError;
pub use platform::{OsFamily, PlatformDescriptor};
