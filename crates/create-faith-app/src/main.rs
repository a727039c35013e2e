//! create-faith-app - Next.js project scaffolding with composable features

use anyhow::Result;
use clap::Parser;
use composer_core::tui::CreateArgs;
use composer_core::{Feature, ProductConfig, Selections};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// create-faith-app product configuration
#[derive(Clone)]
pub struct FaithConfig;

impl ProductConfig for FaithConfig {
    fn name(&self) -> &'static str {
        "create-faith-app"
    }

    fn display_name(&self) -> &'static str {
        "create-faith-app"
    }

    fn npm_package(&self) -> &'static str {
        "create-faith-app"
    }

    fn template_dir_env(&self) -> &'static str {
        "CREATE_FAITH_APP_TEMPLATE_DIR"
    }

    fn default_template_dir(&self) -> PathBuf {
        // templates/ ships beside the binary; fall back to the workspace copy
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("templates")))
            .filter(|dir| dir.is_dir())
            .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates")))
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/faith-stack/create-faith-app#readme"
    }

    fn upgrade_command(&self) -> &'static str {
        "npm i -g create-faith-app@latest"
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-faith-app")]
#[command(about = "CLI for scaffolding Next.js projects with opt-in auth, database and styling")]
#[command(version)]
pub struct Args {
    /// Project name and directory, `.` for the current directory
    pub dir: Option<String>,

    /// Skip installing dependencies
    #[arg(long)]
    pub no_install: bool,

    /// Skip initializing a git repository
    #[arg(long)]
    pub no_git: bool,

    /// Bypass the prompts and use the recommended setup
    #[arg(short = 'y', long)]
    pub default: bool,

    /// Import alias for generated sources
    #[arg(short = 'i', long)]
    pub import_alias: Option<String>,

    /// Non-interactive mode: features come from the flags below
    #[arg(long = "ci", alias = "CI")]
    pub ci: bool,

    /// Include Tailwind CSS
    #[arg(long, value_name = "BOOL")]
    pub tailwind: Option<bool>,

    /// Include NextAuth.js
    #[arg(long = "next-auth", alias = "nextAuth", value_name = "BOOL")]
    pub next_auth: Option<bool>,

    /// Include Auth.js (v5 beta)
    #[arg(long = "authjs", alias = "authJs", value_name = "BOOL")]
    pub auth_js: Option<bool>,

    /// Include Prisma
    #[arg(long, value_name = "BOOL")]
    pub prisma: Option<bool>,

    /// Include shadcn/ui
    #[arg(long, value_name = "BOOL")]
    pub shadcn: Option<bool>,

    /// Use the App Router layout and page
    #[arg(long = "app-router", alias = "appRouter", value_name = "BOOL")]
    pub app_router: Option<bool>,

    /// Local directory to use for templates instead of the bundled ones (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

impl Args {
    fn selections(&self) -> Selections {
        let mut selections = Selections::new();
        for (feature, flag) in [
            (Feature::Tailwind, self.tailwind),
            (Feature::NextAuth, self.next_auth),
            (Feature::AuthJs, self.auth_js),
            (Feature::Prisma, self.prisma),
            (Feature::Shadcn, self.shadcn),
        ] {
            if let Some(in_use) = flag {
                selections.set(feature, in_use);
            }
        }
        selections
    }
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            selections: args.selections(),
            directory: args.dir,
            template_dir: args.template_dir,
            app_router: args.app_router,
            import_alias: args.import_alias,
            no_install: args.no_install,
            no_git: args.no_git,
            default: args.default,
            ci: args.ci,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = FaithConfig;

    let result = composer_core::run(&config, args.into(), CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
