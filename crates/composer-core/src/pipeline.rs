//! Installer orchestration
//!
//! The runner reads the manifest once, folds every active installer over an
//! in-memory [`ProjectDraft`] in registry order, then commits the draft through
//! the [`ProjectFs`] handle in a single pass.

use crate::deps::{merge, DependencySpec, PackageManifest, MANIFEST_PATH};
use crate::env::{EnvFiles, ENV_EXAMPLE_PATH, ENV_PATH};
use crate::error::Result;
use crate::feature::FeatureSet;
use crate::fs::ProjectFs;
use crate::installers::{self, InstallContext, Installer};
use crate::templates::slots::{self, TemplateSlot};
use crate::templates::{select, TemplateLayout};
use std::path::PathBuf;

/// A pending template copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCopy {
    pub source: PathBuf,
    pub destination: String,
}

/// Everything a run will write, accumulated before anything is written
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub manifest: PackageManifest,
    pub env: Option<EnvFiles>,
    pub copies: Vec<FileCopy>,
}

impl ProjectDraft {
    pub fn new(manifest: PackageManifest) -> Self {
        Self {
            manifest,
            env: None,
            copies: Vec::new(),
        }
    }

    /// Resolve pinned versions and merge them into the manifest
    pub fn add_dependencies(
        &mut self,
        ctx: &InstallContext<'_>,
        names: &[&str],
        dev: bool,
    ) -> Result<()> {
        let specs = DependencySpec::resolve_all(names, dev, ctx.features)?;
        merge(&mut self.manifest, &specs)
    }

    /// Queue a copy of a fixed file from `extras/`
    pub fn copy_extra(&mut self, ctx: &InstallContext<'_>, source: &str, destination: &str) {
        self.copies.push(FileCopy {
            source: ctx.templates.extra(source),
            destination: destination.to_string(),
        });
    }

    /// Select the variant for `slot` and queue its copy
    pub fn use_slot(
        &mut self,
        ctx: &InstallContext<'_>,
        slot: &TemplateSlot,
    ) -> Result<&'static str> {
        let variant = select(slot, ctx.features)?;
        tracing::debug!(slot = slot.name, variant, "selected template variant");
        self.copies.push(FileCopy {
            source: ctx.templates.variant(slot, variant),
            destination: slot.destination.to_string(),
        });
        Ok(variant)
    }
}

/// Final identity written into the manifest before commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestStamp {
    pub package_name: String,
    pub init_version: String,
    /// e.g. `pnpm@8.10.0`; omitted for bun
    pub package_manager: Option<String>,
}

/// What a run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub installers: Vec<Installer>,
    /// Project-relative paths written, in write order
    pub written: Vec<String>,
}

pub struct InstallerRunner<'a, F: ProjectFs> {
    fs: &'a F,
    templates: &'a TemplateLayout,
}

impl<'a, F: ProjectFs> InstallerRunner<'a, F> {
    pub fn new(fs: &'a F, templates: &'a TemplateLayout) -> Self {
        Self { fs, templates }
    }

    /// Build the draft without writing anything
    pub fn plan(
        &self,
        features: &FeatureSet,
        manifest: PackageManifest,
    ) -> Result<(ProjectDraft, Vec<Installer>)> {
        let ctx = InstallContext {
            features,
            templates: self.templates,
        };
        let mut draft = ProjectDraft::new(manifest);

        let active = installers::active(features);
        for installer in &active {
            installer.apply(&ctx, &mut draft)?;
        }

        draft.use_slot(&ctx, &slots::LAYOUT)?;
        draft.use_slot(&ctx, &slots::PAGE)?;

        Ok((draft, active))
    }

    /// Run every active installer and write the result into the project
    pub fn run(&self, features: &FeatureSet, stamp: Option<&ManifestStamp>) -> Result<RunReport> {
        let manifest = self.fs.read_manifest(MANIFEST_PATH)?;
        let (mut draft, installers) = self.plan(features, manifest)?;

        if let Some(stamp) = stamp {
            draft.manifest.stamp(
                &stamp.package_name,
                &stamp.init_version,
                stamp.package_manager.as_deref(),
            );
        }

        let written = self.commit(&draft)?;
        tracing::info!(
            installers = installers.len(),
            files = written.len(),
            "project composed"
        );

        Ok(RunReport {
            installers,
            written,
        })
    }

    fn commit(&self, draft: &ProjectDraft) -> Result<Vec<String>> {
        let mut written = Vec::with_capacity(draft.copies.len() + 3);

        self.fs.write_manifest(MANIFEST_PATH, &draft.manifest)?;
        written.push(MANIFEST_PATH.to_string());

        for copy in &draft.copies {
            self.fs.copy_file(&copy.source, &copy.destination)?;
            written.push(copy.destination.clone());
        }

        if let Some(env) = &draft.env {
            self.fs.write_text_file(ENV_PATH, &env.env)?;
            self.fs.write_text_file(ENV_EXAMPLE_PATH, &env.example)?;
            written.push(ENV_PATH.to_string());
            written.push(ENV_EXAMPLE_PATH.to_string());
        }

        Ok(written)
    }
}
