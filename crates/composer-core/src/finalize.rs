//! Post-scaffold touches on the written project

use crate::config::{Configuration, ImportAlias, TEMPLATE_IMPORT_ALIAS};
use crate::feature::{Feature, FeatureSet};
use crate::toolchain::PackageManager;
use anyhow::{Context, Result};
use std::path::Path;
use walkdir::WalkDir;

/// Directories never rewritten
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

/// Files shipped without a leading dot so packaging keeps them, and their real names
const DOTFILES: &[(&str, &str)] = &[
    ("_eslintrc.cjs", ".eslintrc.cjs"),
    ("_gitignore", ".gitignore"),
];

/// Replace the template alias with `alias` in every text file under `project_dir`.
///
/// Returns the number of files changed. Files that are not UTF-8 are left alone.
pub fn rewrite_import_alias(project_dir: &Path, alias: &ImportAlias) -> Result<usize> {
    if alias.is_template_default() {
        return Ok(0);
    }
    let replacement = alias.with_trailing_slash();

    let walker = WalkDir::new(project_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && SKIPPED_DIRS
                    .iter()
                    .any(|skip| entry.file_name() == std::ffi::OsStr::new(skip)))
        });

    let mut changed = 0;
    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", project_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(entry.path()) else {
            continue;
        };
        if !content.contains(TEMPLATE_IMPORT_ALIAS) {
            continue;
        }
        std::fs::write(
            entry.path(),
            content.replace(TEMPLATE_IMPORT_ALIAS, &replacement),
        )
        .with_context(|| format!("Failed to write file: {}", entry.path().display()))?;
        changed += 1;
    }

    tracing::debug!(files = changed, alias = %alias, "rewrote import alias");
    Ok(changed)
}

/// Rename `_eslintrc.cjs` and `_gitignore` to their dotted names
pub fn rename_dotfiles(project_dir: &Path) -> Result<()> {
    for (shipped, real) in DOTFILES {
        let source = project_dir.join(shipped);
        if !source.exists() {
            continue;
        }
        let target = project_dir.join(real);
        std::fs::rename(&source, &target)
            .with_context(|| format!("Failed to rename {}", source.display()))?;
    }
    Ok(())
}

/// Commands the user runs next, in order
pub fn next_steps(
    config: &Configuration,
    features: &FeatureSet,
    package_manager: PackageManager,
    git_initialized: bool,
) -> Vec<String> {
    let mut steps = Vec::new();

    if config.project.directory != "." {
        steps.push(format!("cd {}", config.project.directory));
    }
    if !config.install {
        steps.push(package_manager.install_hint());
    }
    if features.is_active(Feature::Prisma) {
        steps.push(package_manager.run_script("db:push"));
    }
    steps.push(package_manager.run_script("dev"));
    if !git_initialized {
        steps.push("git init".to_string());
    }
    steps.push("git commit -m \"initial commit\"".to_string());
    steps
}

/// Warning printed after the steps when an auth provider is configured
pub fn auth_warning(features: &FeatureSet) -> Option<&'static str> {
    features
        .any_auth()
        .then_some("You won't be able to test authentication until you fill in the auth variables in .env")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectName;

    fn config(name: &str, install: bool) -> Configuration {
        Configuration {
            project: ProjectName::parse(name, "cwd").unwrap(),
            import_alias: ImportAlias::default(),
            install,
            git_init: true,
        }
    }

    #[test]
    fn test_alias_rewrite_skips_node_modules() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let deps = dir.path().join("node_modules/pkg");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::create_dir_all(&deps).unwrap();
        std::fs::write(src.join("page.tsx"), "import { db } from \"@/server/db\";\n").unwrap();
        std::fs::write(src.join("plain.ts"), "export {};\n").unwrap();
        std::fs::write(deps.join("index.js"), "require(\"@/x\");\n").unwrap();

        let alias = ImportAlias::parse("~").unwrap();
        let changed = rewrite_import_alias(dir.path(), &alias).unwrap();

        assert_eq!(changed, 1);
        assert_eq!(
            std::fs::read_to_string(src.join("page.tsx")).unwrap(),
            "import { db } from \"~/server/db\";\n"
        );
        assert_eq!(
            std::fs::read_to_string(deps.join("index.js")).unwrap(),
            "require(\"@/x\");\n"
        );
    }

    #[test]
    fn test_default_alias_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.ts"), "import \"@/a\";").unwrap();
        assert_eq!(
            rewrite_import_alias(dir.path(), &ImportAlias::default()).unwrap(),
            0
        );
    }

    #[test]
    fn test_rename_dotfiles() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("_eslintrc.cjs"), "module.exports = {};").unwrap();
        rename_dotfiles(dir.path()).unwrap();
        assert!(dir.path().join(".eslintrc.cjs").exists());
        assert!(!dir.path().join("_eslintrc.cjs").exists());
        assert!(!dir.path().join(".gitignore").exists());
        // second call finds nothing to rename
        rename_dotfiles(dir.path()).unwrap();
    }

    #[test]
    fn test_next_steps_with_prisma_and_no_install() {
        let features = FeatureSet::from_active([Feature::Prisma, Feature::Tailwind]).unwrap();
        let steps = next_steps(&config("my-app", false), &features, PackageManager::Pnpm, true);
        assert_eq!(
            steps,
            vec![
                "cd my-app",
                "pnpm install",
                "pnpm db:push",
                "pnpm dev",
                "git commit -m \"initial commit\"",
            ]
        );
    }

    #[test]
    fn test_next_steps_in_place_without_git() {
        let steps = next_steps(&config(".", true), &FeatureSet::empty(), PackageManager::Npm, false);
        assert_eq!(
            steps,
            vec!["npm run dev", "git init", "git commit -m \"initial commit\""]
        );
    }

    #[test]
    fn test_auth_warning() {
        assert!(auth_warning(&FeatureSet::empty()).is_none());
        let features = FeatureSet::from_active([Feature::AuthJs]).unwrap();
        assert!(auth_warning(&features).is_some());
    }
}
