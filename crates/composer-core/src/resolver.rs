//! Turns raw selections into a validated feature set and configuration

use crate::config::{Configuration, ImportAlias, ProjectName, DEFAULT_APP_NAME};
use crate::error::{ComposeError, Result};
use crate::feature::{Feature, FeatureSet};

/// Feature answers as they came from flags or prompts.
///
/// `None` means the user never mentioned the feature; it then falls back to
/// [`Feature::default_enabled`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selections {
    requested: [Option<bool>; Feature::COUNT],
}

impl Selections {
    pub fn new() -> Self {
        Self::default()
    }

    /// The preset used by `--default`
    pub fn recommended() -> Self {
        Self::new()
            .with(Feature::NextAuth, true)
            .with(Feature::AuthJs, false)
            .with(Feature::Prisma, true)
            .with(Feature::Tailwind, true)
            .with(Feature::Shadcn, true)
    }

    pub fn with(mut self, feature: Feature, in_use: bool) -> Self {
        self.set(feature, in_use);
        self
    }

    pub fn set(&mut self, feature: Feature, in_use: bool) {
        self.requested[feature as usize] = Some(in_use);
    }

    pub fn get(&self, feature: Feature) -> Option<bool> {
        self.requested[feature as usize]
    }
}

/// Configuration answers as they came from flags or prompts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfig {
    pub app_name: Option<String>,
    pub import_alias: Option<String>,
    /// Only the App Router is scaffolded; `Some(false)` is rejected
    pub app_router: Option<bool>,
    pub install: Option<bool>,
    pub git_init: Option<bool>,
    /// Name of the directory the CLI runs in, used when the app name is `.`
    pub working_dir_name: String,
}

/// Resolve raw input into an immutable feature set and configuration.
///
/// Pure: the result depends only on the arguments.
pub fn resolve(selections: &Selections, raw: &RawConfig) -> Result<(FeatureSet, Configuration)> {
    let mut in_use = [false; Feature::COUNT];
    for feature in Feature::ALL {
        in_use[feature as usize] = selections
            .get(feature)
            .unwrap_or_else(|| feature.default_enabled());
    }
    let features = FeatureSet::checked(in_use)?;

    if raw.app_router == Some(false) {
        return Err(ComposeError::validation(
            "app router",
            "only the App Router is supported; use create-t3-app for the Pages Router",
        ));
    }

    let import_alias = match raw.import_alias.as_deref() {
        Some(alias) => ImportAlias::parse(alias)?,
        None => ImportAlias::default(),
    };
    let project = ProjectName::parse(
        raw.app_name.as_deref().unwrap_or(DEFAULT_APP_NAME),
        &raw.working_dir_name,
    )?;

    let config = Configuration {
        project,
        import_alias,
        install: raw.install.unwrap_or(true),
        git_init: raw.git_init.unwrap_or(true),
    };

    tracing::debug!(
        features = ?features.active().map(|f| f.id()).collect::<Vec<_>>(),
        alias = %config.import_alias,
        "resolved selections"
    );

    Ok((features, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawConfig {
        RawConfig {
            working_dir_name: "cwd".to_string(),
            ..RawConfig::default()
        }
    }

    #[test]
    fn test_defaults_apply_to_unmentioned_features() {
        let (features, config) = resolve(&Selections::new(), &raw()).unwrap();
        assert!(features.is_active(Feature::Tailwind));
        assert!(!features.is_active(Feature::Prisma));
        assert!(!features.is_active(Feature::NextAuth));
        assert_eq!(config.project.package_name, DEFAULT_APP_NAME);
        assert_eq!(config.import_alias.as_str(), "@/");
        assert!(config.install && config.git_init);
    }

    #[test]
    fn test_pages_router_is_rejected() {
        let pages = RawConfig {
            app_router: Some(false),
            ..raw()
        };
        match resolve(&Selections::new(), &pages).unwrap_err() {
            ComposeError::Validation { field, .. } => assert_eq!(field, "app router"),
            other => panic!("unexpected error: {other}"),
        }

        let app = RawConfig {
            app_router: Some(true),
            ..raw()
        };
        assert!(resolve(&Selections::new(), &app).is_ok());
    }

    #[test]
    fn test_explicit_false_overrides_default() {
        let selections = Selections::new().with(Feature::Tailwind, false);
        let (features, _) = resolve(&selections, &raw()).unwrap();
        assert_eq!(features, FeatureSet::empty());
    }

    #[test]
    fn test_conflict_is_reported_with_both_features() {
        let selections = Selections::new()
            .with(Feature::NextAuth, true)
            .with(Feature::AuthJs, true);
        let err = resolve(&selections, &raw()).unwrap_err();
        assert!(matches!(
            err,
            ComposeError::Conflict {
                first: Feature::NextAuth,
                second: Feature::AuthJs
            }
        ));
    }

    #[test]
    fn test_invalid_alias_is_validation_error() {
        let config = RawConfig {
            import_alias: Some("./".to_string()),
            ..raw()
        };
        let err = resolve(&Selections::new(), &config).unwrap_err();
        assert!(matches!(err, ComposeError::Validation { field: "import alias", .. }));
    }

    #[test]
    fn test_recommended_preset() {
        let (features, _) = resolve(&Selections::recommended(), &raw()).unwrap();
        assert_eq!(
            features.active().collect::<Vec<_>>(),
            vec![
                Feature::NextAuth,
                Feature::Prisma,
                Feature::Tailwind,
                Feature::Shadcn
            ]
        );
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let selections = Selections::new().with(Feature::Prisma, true);
        let first = resolve(&selections, &raw()).unwrap();
        let second = resolve(&selections, &raw()).unwrap();
        assert_eq!(first, second);
    }
}
