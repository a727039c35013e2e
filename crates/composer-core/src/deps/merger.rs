//! Merging pinned dependencies into the manifest

use super::manifest::PackageManifest;
use super::versions::{pinned_version, NEXT_AUTH_BETA};
use crate::error::{ComposeError, Result};
use crate::feature::{Feature, FeatureSet};
use std::collections::HashSet;

/// A dependency to declare, with the version already decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySpec {
    pub name: String,
    pub version: String,
    pub dev: bool,
}

impl DependencySpec {
    /// Look the version up in the table, applying the Auth.js override.
    ///
    /// Auth.js only works against the `next-auth` v5 beta, so while it is
    /// active `next-auth` resolves to [`NEXT_AUTH_BETA`]. This is the single
    /// override; every other identifier takes the table version.
    pub fn resolve(name: &str, dev: bool, features: &FeatureSet) -> Result<Self> {
        let pinned = pinned_version(name)?;
        let version = if name == "next-auth" && features.is_active(Feature::AuthJs) {
            NEXT_AUTH_BETA
        } else {
            pinned
        };
        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
            dev,
        })
    }

    /// Resolve a list of runtime (or dev) dependencies in one go
    pub fn resolve_all(names: &[&str], dev: bool, features: &FeatureSet) -> Result<Vec<Self>> {
        names
            .iter()
            .map(|name| Self::resolve(name, dev, features))
            .collect()
    }
}

/// Merge `specs` into `manifest`.
///
/// Validates the whole request before touching the manifest, so a failed merge
/// leaves it unchanged. Entries not named in `specs` are never modified.
pub fn merge(manifest: &mut PackageManifest, specs: &[DependencySpec]) -> Result<()> {
    let mut seen = HashSet::new();
    for spec in specs {
        if !seen.insert(spec.name.as_str()) {
            return Err(ComposeError::DuplicateDependency {
                name: spec.name.clone(),
            });
        }
        let other_bucket = if spec.dev {
            &manifest.dependencies
        } else {
            &manifest.dev_dependencies
        };
        if other_bucket.contains_key(&spec.name) {
            return Err(ComposeError::BucketClash {
                name: spec.name.clone(),
            });
        }
    }

    for spec in specs {
        let bucket = if spec.dev {
            &mut manifest.dev_dependencies
        } else {
            &mut manifest.dependencies
        };
        tracing::debug!(name = %spec.name, version = %spec.version, dev = spec.dev, "merging dependency");
        bucket.insert(spec.name.clone(), spec.version.clone());
    }

    Ok(())
}
