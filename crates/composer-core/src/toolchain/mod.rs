//! Package manager and git tooling
//!
//! This module provides:
//! - Package manager detection from the invoking npm-compatible client
//! - Dependency installation with streamed output
//! - Git repository initialization

pub mod git;
pub mod package_manager;
mod process;

pub use package_manager::PackageManager;
pub use process::run_streamed;
