//! Charm-style CLI prompts using cliclack

use crate::config::{ImportAlias, ProjectName, DEFAULT_APP_NAME, TEMPLATE_IMPORT_ALIAS};
use crate::feature::{Feature, FeatureSet};
use crate::fs::LocalFs;
use crate::pipeline::{InstallerRunner, ManifestStamp};
use crate::product::ProductConfig;
use crate::resolver::{resolve, RawConfig, Selections};
use crate::templates::{copy_base_template, TemplateLayout};
use crate::toolchain::{git, PackageManager};
use crate::{finalize, version, Configuration};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project name or path, `.` for the current directory
    pub directory: Option<String>,

    /// Local directory to use for templates instead of the bundled ones
    pub template_dir: Option<PathBuf>,

    /// Feature answers given as flags
    pub selections: Selections,

    pub app_router: Option<bool>,

    pub import_alias: Option<String>,

    /// Skip `<pm> install`
    pub no_install: bool,

    /// Skip `git init`
    pub no_git: bool,

    /// Use the recommended preset without prompting
    pub default: bool,

    /// Non-interactive mode: use the flags as given
    pub ci: bool,
}

impl CreateArgs {
    fn interactive(&self) -> bool {
        !self.ci && !self.default
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Start the update check in the background
    let version_check = {
        let package = config.npm_package();
        let user_agent = config.user_agent();
        let upgrade = config.upgrade_command();
        let cli_version = cli_version.to_string();
        tokio::spawn(async move {
            version::outdated_warning(package, user_agent, &cli_version, upgrade).await
        })
    };

    // Step 2: Locate templates
    let layout = setup_templates(config, &args)?;

    // Step 3: Collect answers and resolve them
    let working_dir = std::env::current_dir().context("Failed to read current directory")?;
    let (selections, raw) = collect_answers(&args, &working_dir)?;
    let (features, project_config) = resolve(&selections, &raw)?;
    log_summary(&features, &project_config)?;

    // Step 4: Prepare the target directory
    let project_dir = select_directory(&working_dir, &project_config, &args)?;

    // Step 5: Compose the project
    let package_manager = PackageManager::detect();
    create_project(
        &layout,
        &project_dir,
        &features,
        &project_config,
        package_manager,
        cli_version,
    )?;

    // Step 6: Install dependencies
    if project_config.install {
        cliclack::log::info(format!("Installing dependencies with {}", package_manager))?;
        package_manager.install(&project_dir).await?;
        cliclack::log::success("Dependencies installed")?;
    }

    // Step 7: Initialize git
    let git_initialized = setup_git(&project_dir, &project_config)?;

    // Step 8: Show next steps
    print_next_steps(&project_config, &features, package_manager, git_initialized)?;
    cliclack::log::info(format!("Docs: {}", config.docs_url()))?;

    if let Ok(Some(warning)) = version_check.await {
        cliclack::log::warning(warning)?;
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}

fn setup_templates<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<TemplateLayout> {
    let root = config.template_root(args.template_dir.clone());
    let layout = TemplateLayout::new(root);
    if !layout.base_dir().is_dir() {
        anyhow::bail!(
            "Templates not found in {}. Set {} or pass --template-dir.",
            layout.root().display(),
            config.template_dir_env()
        );
    }
    if args.template_dir.is_some() {
        cliclack::log::info(format!(
            "Using local templates from {}",
            layout.root().display()
        ))?;
    }
    Ok(layout)
}

fn collect_answers(args: &CreateArgs, working_dir: &Path) -> Result<(Selections, RawConfig)> {
    let working_dir_name = working_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_APP_NAME.to_string());

    let mut raw = RawConfig {
        app_name: args.directory.clone(),
        import_alias: args.import_alias.clone(),
        app_router: args.app_router,
        install: args.no_install.then_some(false),
        git_init: args.no_git.then_some(false),
        working_dir_name,
    };

    if args.ci {
        cliclack::log::info("Running in CI mode, using flags as given")?;
        return Ok((args.selections.clone(), raw));
    }
    if args.default {
        cliclack::log::info("Using the recommended setup")?;
        return Ok((Selections::recommended(), raw));
    }

    let mut selections = args.selections.clone();

    if raw.app_name.is_none() {
        raw.app_name = Some(prompt_name(&raw.working_dir_name)?);
    }

    if selections.get(Feature::Tailwind).is_none() {
        let tailwind: bool = cliclack::confirm("Will you be using Tailwind CSS for styling?")
            .initial_value(true)
            .interact()?;
        selections.set(Feature::Tailwind, tailwind);
    }

    if selections.get(Feature::Shadcn).is_none() {
        let shadcn = if selections.get(Feature::Tailwind) == Some(true) {
            cliclack::confirm("Would you like to use shadcn/ui components?")
                .initial_value(true)
                .interact()?
        } else {
            false
        };
        selections.set(Feature::Shadcn, shadcn);
    }

    if raw.app_router.is_none() {
        let app_router: bool =
            cliclack::confirm("Would you like to use the App Router? (recommended)")
                .initial_value(true)
                .interact()?;
        if !app_router {
            cliclack::note(
                "Pages Router",
                format!(
                    "Since you're not using the App Router we recommend you use: {}",
                    pages_router_alternative(PackageManager::detect())
                ),
            )?;
            anyhow::bail!("The Pages Router is not supported.");
        }
        raw.app_router = Some(app_router);
    }

    if needs_auth_prompt(&selections) {
        let mut select =
            cliclack::select("What authentication provider would you like to use?").item(
                "none",
                "None",
                "",
            );
        if selections.get(Feature::NextAuth).is_none() {
            select = select.item("next-auth", Feature::NextAuth.display_name(), "v4");
        }
        if selections.get(Feature::AuthJs).is_none() {
            select = select.item("auth-js", Feature::AuthJs.display_name(), "v5 beta");
        }
        let auth: &str = select.interact()?;
        selections.set(Feature::NextAuth, auth == "next-auth");
        selections.set(Feature::AuthJs, auth == "auth-js");
    }

    if selections.get(Feature::Prisma).is_none() {
        let orm: &str = cliclack::select("What database ORM would you like to use?")
            .item("none", "None", "")
            .item("prisma", Feature::Prisma.display_name(), "")
            .interact()?;
        selections.set(Feature::Prisma, orm == "prisma");
    }

    if raw.git_init.is_none() {
        let git_init: bool = cliclack::confirm("Should we initialize a Git repository and stage the changes?")
            .initial_value(true)
            .interact()?;
        raw.git_init = Some(git_init);
    }

    if raw.install.is_none() {
        let install: bool = cliclack::confirm(format!(
            "Should we run '{}' for you?",
            PackageManager::detect().install_hint()
        ))
        .initial_value(true)
        .interact()?;
        raw.install = Some(install);
    }

    if raw.import_alias.is_none() {
        let alias: String = cliclack::input("What import alias would you like to use?")
            .placeholder(TEMPLATE_IMPORT_ALIAS)
            .default_input(TEMPLATE_IMPORT_ALIAS)
            .validate(|input: &String| {
                ImportAlias::parse(input)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .interact()?;
        raw.import_alias = Some(alias);
    }

    Ok((selections, raw))
}

/// Ask for a provider unless one is already on or both were ruled out by flags
fn needs_auth_prompt(selections: &Selections) -> bool {
    match (
        selections.get(Feature::NextAuth),
        selections.get(Feature::AuthJs),
    ) {
        (Some(true), _) | (_, Some(true)) => false,
        (Some(false), Some(false)) => false,
        _ => true,
    }
}

fn pages_router_alternative(package_manager: PackageManager) -> String {
    match package_manager {
        PackageManager::Yarn => "yarn create t3-app".to_string(),
        pm => format!("{} create t3-app@latest", pm),
    }
}

fn prompt_name(working_dir_name: &str) -> Result<String> {
    let working_dir_name = working_dir_name.to_string();
    let name: String = cliclack::input("What will your project be called?")
        .placeholder(DEFAULT_APP_NAME)
        .default_input(DEFAULT_APP_NAME)
        .validate(move |input: &String| {
            ProjectName::parse(input, &working_dir_name)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact()?;
    Ok(name)
}

fn log_summary(features: &FeatureSet, config: &Configuration) -> Result<()> {
    let names: Vec<&str> = features.active().map(|f| f.display_name()).collect();
    let summary = if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    };
    cliclack::log::success(format!(
        "{}: {} (import alias {})",
        config.project.package_name, summary, config.import_alias
    ))?;
    Ok(())
}

fn select_directory(
    working_dir: &Path,
    config: &Configuration,
    args: &CreateArgs,
) -> Result<PathBuf> {
    let path = if config.project.directory == "." {
        working_dir.to_path_buf()
    } else {
        working_dir.join(&config.project.directory)
    };

    // Warn if directory exists and has files
    if path.is_dir() {
        let count = std::fs::read_dir(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?
            .count();
        if count > 0 {
            cliclack::log::warning(format!(
                "{} already has {} existing items",
                path.display(),
                count
            ))?;

            if !args.interactive() {
                anyhow::bail!("Target directory is not empty: {}", path.display());
            }

            let confirm: bool = cliclack::confirm("Continue anyway? Existing files may be overwritten")
                .initial_value(false)
                .interact()?;

            if !confirm {
                anyhow::bail!("Setup cancelled.");
            }
        }
    }

    Ok(path)
}

fn create_project(
    layout: &TemplateLayout,
    project_dir: &Path,
    features: &FeatureSet,
    config: &Configuration,
    package_manager: PackageManager,
    cli_version: &str,
) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    let result = compose(layout, project_dir, features, config, package_manager, cli_version);

    match &result {
        Ok(count) => spinner.stop(format!(
            "Created {} files in {}",
            count,
            project_dir.display()
        )),
        Err(_) => spinner.error("Failed to create project"),
    }

    result.map(|_| ())
}

fn compose(
    layout: &TemplateLayout,
    project_dir: &Path,
    features: &FeatureSet,
    config: &Configuration,
    package_manager: PackageManager,
    cli_version: &str,
) -> Result<usize> {
    let base_files = copy_base_template(layout, project_dir)?;

    let fs = LocalFs::new(project_dir);
    let stamp = ManifestStamp {
        package_name: config.project.package_name.clone(),
        init_version: cli_version.to_string(),
        package_manager: package_manager.manifest_field(),
    };
    let report = InstallerRunner::new(&fs, layout).run(features, Some(&stamp))?;

    finalize::rewrite_import_alias(project_dir, &config.import_alias)?;
    finalize::rename_dotfiles(project_dir)?;

    // package.json is rewritten, not added
    Ok(base_files.len() + report.written.len().saturating_sub(1))
}

fn setup_git(project_dir: &Path, config: &Configuration) -> Result<bool> {
    if !config.git_init {
        return Ok(git::is_inside_repo(project_dir));
    }
    if !git::is_installed() {
        cliclack::log::warning("Git is not installed, skipping repository setup")?;
        return Ok(false);
    }
    match git::init(project_dir) {
        Ok(true) => {
            cliclack::log::success("Initialized a git repository")?;
            Ok(true)
        }
        Ok(false) => {
            cliclack::log::info("Already inside a git repository, skipping git init")?;
            Ok(true)
        }
        Err(e) => {
            cliclack::log::warning(format!("Failed to initialize git: {}", e))?;
            Ok(false)
        }
    }
}

fn print_next_steps(
    config: &Configuration,
    features: &FeatureSet,
    package_manager: PackageManager,
    git_initialized: bool,
) -> Result<()> {
    let steps = finalize::next_steps(config, features, package_manager, git_initialized);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
    println!();

    if let Some(warning) = finalize::auth_warning(features) {
        cliclack::log::warning(warning)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_prompt_runs_when_one_provider_is_ruled_out() {
        let only_next_auth_off = Selections::new().with(Feature::NextAuth, false);
        assert!(needs_auth_prompt(&only_next_auth_off));
        assert!(needs_auth_prompt(&Selections::new()));
    }

    #[test]
    fn test_auth_prompt_skipped_when_settled_by_flags() {
        assert!(!needs_auth_prompt(
            &Selections::new().with(Feature::AuthJs, true)
        ));
        assert!(!needs_auth_prompt(
            &Selections::new()
                .with(Feature::NextAuth, false)
                .with(Feature::AuthJs, false)
        ));
    }

    #[test]
    fn test_pages_router_alternative() {
        assert_eq!(
            pages_router_alternative(PackageManager::Yarn),
            "yarn create t3-app"
        );
        assert_eq!(
            pages_router_alternative(PackageManager::Pnpm),
            "pnpm create t3-app@latest"
        );
    }
}
