//! Run configuration scalars and their shape checks

use crate::error::{ComposeError, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Project name used when none was given
pub const DEFAULT_APP_NAME: &str = "my-faith-app";

/// Alias the bundled templates are written against
pub const TEMPLATE_IMPORT_ALIAS: &str = "@/";

/// npm package name, optionally scoped
fn package_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:@[a-z0-9\-*~][a-z0-9\-*._~]*/)?[a-z0-9\-~][a-z0-9\-._~]*$")
            .expect("package name pattern is valid")
    })
}

/// Import alias prefix for generated sources (e.g. `@/` or `~/`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportAlias(String);

impl ImportAlias {
    pub fn parse(raw: &str) -> Result<Self> {
        let alias = raw.trim();
        if alias.is_empty() {
            return Err(ComposeError::validation(
                "import alias",
                "import alias can't be empty",
            ));
        }
        if alias.starts_with('.') || alias.starts_with('/') {
            return Err(ComposeError::validation(
                "import alias",
                "import alias can't start with '.' or '/'",
            ));
        }
        if alias.chars().any(char::is_whitespace) {
            return Err(ComposeError::validation(
                "import alias",
                "import alias can't contain whitespace",
            ));
        }
        Ok(Self(alias.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Alias normalized to end with a `/` so prefix replacement stays on segment boundaries
    pub fn with_trailing_slash(&self) -> String {
        if self.0.ends_with('/') {
            self.0.clone()
        } else {
            format!("{}/", self.0)
        }
    }

    /// True when the templates already use this alias and no rewrite is needed
    pub fn is_template_default(&self) -> bool {
        self.with_trailing_slash() == TEMPLATE_IMPORT_ALIAS
    }
}

impl Default for ImportAlias {
    fn default() -> Self {
        Self(TEMPLATE_IMPORT_ALIAS.to_string())
    }
}

impl fmt::Display for ImportAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Package name and target directory derived from the raw project argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName {
    /// Name written into `package.json` (may be scoped)
    pub package_name: String,
    /// Directory to create, relative to where the CLI was run
    pub directory: String,
}

impl ProjectName {
    /// Split `raw` into package name and directory.
    ///
    /// `.` means "scaffold into the working directory", in which case the
    /// package name becomes `working_dir_name`. A path segment starting with
    /// `@` begins a scope that is kept in the package name but dropped from the
    /// directory.
    pub fn parse(raw: &str, working_dir_name: &str) -> Result<Self> {
        let input = raw.trim().trim_end_matches('/');
        let input = if input.is_empty() { DEFAULT_APP_NAME } else { input };
        let segments: Vec<&str> = input.split('/').collect();

        let scope_start = segments.iter().position(|s| s.starts_with('@'));
        let candidate = match scope_start {
            Some(idx) => segments[idx..].join("/"),
            None => segments.last().copied().unwrap_or(input).to_string(),
        };

        if input != "." && !package_name_pattern().is_match(&candidate) {
            return Err(ComposeError::validation(
                "app name",
                "app name must consist of only lowercase alphanumeric characters, '-', and '_'",
            ));
        }

        let package_name = if candidate == "." {
            working_dir_name.to_string()
        } else {
            candidate
        };
        let directory = segments
            .iter()
            .filter(|s| !s.starts_with('@'))
            .copied()
            .collect::<Vec<_>>()
            .join("/");

        Ok(Self {
            package_name,
            directory,
        })
    }
}

/// Scalar settings that are orthogonal to features
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub project: ProjectName,
    pub import_alias: ImportAlias,
    /// Run the package manager's install after scaffolding
    pub install: bool,
    /// Initialize a git repository after scaffolding
    pub git_init: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_alias_rejects_reserved_prefixes() {
        assert!(ImportAlias::parse("./src/").is_err());
        assert!(ImportAlias::parse("/abs/").is_err());
        assert!(ImportAlias::parse("").is_err());
        assert!(ImportAlias::parse("my alias/").is_err());
        assert_eq!(ImportAlias::parse("~/").unwrap().as_str(), "~/");
    }

    #[test]
    fn test_import_alias_error_names_field() {
        match ImportAlias::parse(".").unwrap_err() {
            ComposeError::Validation { field, .. } => assert_eq!(field, "import alias"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_alias_trailing_slash() {
        assert_eq!(ImportAlias::parse("~").unwrap().with_trailing_slash(), "~/");
        assert!(ImportAlias::parse("@").unwrap().is_template_default());
        assert!(!ImportAlias::parse("~/").unwrap().is_template_default());
    }

    #[test]
    fn test_project_name_plain() {
        let name = ProjectName::parse("my-app", "cwd").unwrap();
        assert_eq!(name.package_name, "my-app");
        assert_eq!(name.directory, "my-app");
    }

    #[test]
    fn test_project_name_scoped_with_path() {
        let name = ProjectName::parse("apps/@acme/web/", "cwd").unwrap();
        assert_eq!(name.package_name, "@acme/web");
        assert_eq!(name.directory, "apps/web");
    }

    #[test]
    fn test_project_name_current_dir() {
        let name = ProjectName::parse(".", "workspace").unwrap();
        assert_eq!(name.package_name, "workspace");
        assert_eq!(name.directory, ".");
    }

    #[test]
    fn test_project_name_rejects_uppercase() {
        assert!(ProjectName::parse("MyApp", "cwd").is_err());
    }
}
