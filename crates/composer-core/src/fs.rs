//! Narrow filesystem handle the engine writes through.
//!
//! Destinations are project-relative paths using `/` separators; copy sources
//! are template paths as given by [`TemplateLayout`](crate::templates::TemplateLayout).

use crate::deps::PackageManifest;
use crate::error::{ComposeError, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub trait ProjectFs {
    fn read_manifest(&self, path: &str) -> Result<PackageManifest>;

    fn write_manifest(&self, path: &str, manifest: &PackageManifest) -> Result<()>;

    /// Copy `source` byte-for-byte to `destination`, creating parent directories
    fn copy_file(&self, source: &Path, destination: &str) -> Result<()>;

    fn write_text_file(&self, destination: &str, content: &str) -> Result<()>;
}

/// Project directory on disk
#[derive(Debug, Clone)]
pub struct LocalFs {
    root: PathBuf,
}

impl LocalFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    fn ensure_parent(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ComposeError::io(parent, e))?;
        }
        Ok(())
    }
}

impl ProjectFs for LocalFs {
    fn read_manifest(&self, path: &str) -> Result<PackageManifest> {
        let full = self.resolve(path);
        let content = std::fs::read_to_string(&full).map_err(|e| ComposeError::io(&full, e))?;
        PackageManifest::from_json(&content).map_err(|source| ComposeError::ManifestFormat {
            path: full,
            source,
        })
    }

    fn write_manifest(&self, path: &str, manifest: &PackageManifest) -> Result<()> {
        let full = self.resolve(path);
        let content = manifest
            .to_json()
            .map_err(|source| ComposeError::ManifestFormat {
                path: full.clone(),
                source,
            })?;
        std::fs::write(&full, content).map_err(|e| ComposeError::io(&full, e))
    }

    fn copy_file(&self, source: &Path, destination: &str) -> Result<()> {
        let full = self.resolve(destination);
        Self::ensure_parent(&full)?;
        std::fs::copy(source, &full).map_err(|e| ComposeError::io(source, e))?;
        Ok(())
    }

    fn write_text_file(&self, destination: &str, content: &str) -> Result<()> {
        let full = self.resolve(destination);
        Self::ensure_parent(&full)?;
        std::fs::write(&full, content).map_err(|e| ComposeError::io(&full, e))
    }
}

/// In-memory project used by tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryFs {
    templates: BTreeMap<PathBuf, Vec<u8>>,
    files: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template source file that `copy_file` can read
    pub fn with_template(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.templates.insert(path.into(), content.into());
        self
    }

    /// Seed a project file (e.g. the base `package.json`)
    pub fn with_file(self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.files.borrow_mut().insert(path.to_string(), content.into());
        self
    }

    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }

    pub fn text(&self, path: &str) -> Option<String> {
        self.file(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Project-relative paths of every file, sorted
    pub fn paths(&self) -> Vec<String> {
        self.files.borrow().keys().cloned().collect()
    }

    fn not_found(path: impl Into<PathBuf>) -> ComposeError {
        ComposeError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        )
    }
}

impl ProjectFs for MemoryFs {
    fn read_manifest(&self, path: &str) -> Result<PackageManifest> {
        let content = self.text(path).ok_or_else(|| Self::not_found(path))?;
        PackageManifest::from_json(&content).map_err(|source| ComposeError::ManifestFormat {
            path: PathBuf::from(path),
            source,
        })
    }

    fn write_manifest(&self, path: &str, manifest: &PackageManifest) -> Result<()> {
        let content = manifest
            .to_json()
            .map_err(|source| ComposeError::ManifestFormat {
                path: PathBuf::from(path),
                source,
            })?;
        self.write_text_file(path, &content)
    }

    fn copy_file(&self, source: &Path, destination: &str) -> Result<()> {
        let content = self
            .templates
            .get(source)
            .cloned()
            .ok_or_else(|| Self::not_found(source))?;
        self.files
            .borrow_mut()
            .insert(destination.to_string(), content);
        Ok(())
    }

    fn write_text_file(&self, destination: &str, content: &str) -> Result<()> {
        self.files
            .borrow_mut()
            .insert(destination.to_string(), content.as_bytes().to_vec());
        Ok(())
    }
}
