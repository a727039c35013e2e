//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait to give the shared scaffolding flow its
//! identity, template location and upgrade hints.

use std::path::PathBuf;

/// Configuration trait for the scaffolding CLI
///
/// Implementors define:
/// - Product identity (name, display name)
/// - Where bundled templates live and how to override them
/// - The npm package checked for newer releases
/// - Documentation links
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Package published to the npm registry, used for the update check
    fn npm_package(&self) -> &'static str;

    /// Environment variable name for overriding the template directory
    fn template_dir_env(&self) -> &'static str;

    /// Template directory used when neither flag nor env var is set
    fn default_template_dir(&self) -> PathBuf;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }

    /// Resolve the template root: explicit flag, then env var, then the default
    fn template_root(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| std::env::var_os(self.template_dir_env()).map(PathBuf::from))
            .unwrap_or_else(|| self.default_template_dir())
    }
}
