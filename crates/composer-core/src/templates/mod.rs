//! Template locations, slot selection, and base project preparation
//!
//! This module provides:
//! - Template root layout (`base/` skeleton plus `extras/` variants)
//! - Template slots and first-match variant selection
//! - Copying the base skeleton into a fresh project directory

pub mod slots;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub use slots::{select, Predicate, TemplateSlot, ALL_SLOTS};

/// Where the template assets live on disk
#[derive(Debug, Clone)]
pub struct TemplateLayout {
    root: PathBuf,
}

impl TemplateLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Skeleton copied verbatim into every project
    pub fn base_dir(&self) -> PathBuf {
        self.root.join("base")
    }

    pub fn extras_dir(&self) -> PathBuf {
        self.root.join("extras")
    }

    /// Path of a file under `extras/`
    pub fn extra(&self, relative: &str) -> PathBuf {
        self.extras_dir().join(relative)
    }

    /// Path of the chosen variant for `slot`
    pub fn variant(&self, slot: &TemplateSlot, variant: &str) -> PathBuf {
        self.extra(&slot.variant_path(variant))
    }
}

/// Copy the base skeleton into `project_dir`, returning the copied relative paths
pub fn copy_base_template(layout: &TemplateLayout, project_dir: &Path) -> Result<Vec<String>> {
    let base = layout.base_dir();
    if !base.is_dir() {
        anyhow::bail!("Base template not found: {}", base.display());
    }

    std::fs::create_dir_all(project_dir)
        .with_context(|| format!("Failed to create directory: {}", project_dir.display()))?;

    let mut copied = Vec::new();
    for entry in WalkDir::new(&base).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", base.display()))?;
        let relative = entry
            .path()
            .strip_prefix(&base)
            .context("Template entry outside base directory")?;
        if relative.as_os_str().is_empty() {
            continue;
        }

        let target = project_dir.join(relative);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
        } else {
            std::fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to write file: {}", target.display()))?;
            copied.push(relative.to_string_lossy().replace('\\', "/"));
        }
    }

    tracing::debug!(files = copied.len(), dir = %project_dir.display(), "copied base template");
    Ok(copied)
}
