//! Composer Core - feature composition engine for create-faith-app
//!
//! This library turns a set of requested features (auth provider, ORM,
//! styling, component library) into a consistent Next.js project: it merges
//! pinned dependencies into `package.json`, picks one template variant per
//! slot, and composes the `.env` / `.env.example` pair.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Feature model, resolver, dependency merge,
//!   slot selection and env composition. Pure, synchronous, and tested against
//!   [`fs::MemoryFs`]
//! - **Layer 2: Workflow Orchestration** - [`InstallerRunner`] folds the active
//!   installers over a draft and commits it through a [`fs::ProjectFs`] handle;
//!   [`toolchain`] and [`version`] cover package manager, git and registry glue
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use composer_core::{resolve, InstallerRunner, LocalFs, RawConfig, Selections, TemplateLayout};
//!
//! let (features, _config) = resolve(&Selections::recommended(), &raw)?;
//! let fs = LocalFs::new(&project_dir);
//! let layout = TemplateLayout::new("templates");
//! let report = InstallerRunner::new(&fs, &layout).run(&features, None)?;
//! ```

pub mod config;
pub mod deps;
pub mod env;
pub mod error;
pub mod feature;
pub mod finalize;
pub mod fs;
pub mod installers;
pub mod pipeline;
pub mod product;
pub mod resolver;
pub mod templates;
pub mod toolchain;
pub mod version;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{Configuration, ImportAlias, ProjectName};
pub use error::{ComposeError, Result};
pub use feature::{Feature, FeatureSet};
pub use fs::{LocalFs, MemoryFs, ProjectFs};
pub use pipeline::{InstallerRunner, ManifestStamp, RunReport};
pub use product::ProductConfig;
pub use resolver::{resolve, RawConfig, Selections};
pub use templates::TemplateLayout;
pub use toolchain::PackageManager;

#[cfg(feature = "tui")]
pub use tui::run;
