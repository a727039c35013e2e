//! Dependency versions, the package manifest, and merging between them

pub mod manifest;
pub mod merger;
pub mod versions;

pub use manifest::{PackageManifest, MANIFEST_PATH};
pub use merger::{merge, DependencySpec};
pub use versions::{pinned_version, DEPENDENCY_VERSIONS, NEXT_AUTH_BETA};
