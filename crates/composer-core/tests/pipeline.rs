//! End-to-end composition against the bundled templates on disk

use composer_core::deps::{PackageManifest, NEXT_AUTH_BETA};
use composer_core::templates::copy_base_template;
use composer_core::{
    finalize, resolve, Feature, InstallerRunner, LocalFs, ManifestStamp, RawConfig, Selections,
    TemplateLayout,
};
use std::path::{Path, PathBuf};

fn bundled_templates() -> TemplateLayout {
    TemplateLayout::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../templates"))
}

fn raw(name: &str) -> RawConfig {
    RawConfig {
        app_name: Some(name.to_string()),
        install: Some(false),
        git_init: Some(false),
        working_dir_name: "workspace".to_string(),
        ..RawConfig::default()
    }
}

fn read(dir: &Path, relative: &str) -> String {
    std::fs::read_to_string(dir.join(relative))
        .unwrap_or_else(|e| panic!("missing {}: {}", relative, e))
}

fn manifest(dir: &Path) -> PackageManifest {
    PackageManifest::from_json(&read(dir, "package.json")).unwrap()
}

#[test]
fn test_recommended_setup_writes_a_complete_project() {
    let layout = bundled_templates();
    let dir = tempfile::tempdir().unwrap();
    let (features, _) = resolve(&Selections::recommended(), &raw("my-app")).unwrap();

    copy_base_template(&layout, dir.path()).unwrap();
    let fs = LocalFs::new(dir.path());
    let stamp = ManifestStamp {
        package_name: "my-app".to_string(),
        init_version: "0.3.0".to_string(),
        package_manager: Some("pnpm@8.10.0".to_string()),
    };
    let report = InstallerRunner::new(&fs, &layout)
        .run(&features, Some(&stamp))
        .unwrap();
    finalize::rename_dotfiles(dir.path()).unwrap();

    assert!(report.written.contains(&"src/server/auth.ts".to_string()));

    let pkg = manifest(dir.path());
    assert_eq!(pkg.name, "my-app");
    assert_eq!(pkg.dependencies["next-auth"], "^4.24.5");
    assert_eq!(pkg.dependencies["@next-auth/prisma-adapter"], "^1.0.7");
    assert!(pkg.dev_dependencies.contains_key("tailwindcss"));
    assert!(pkg.dev_dependencies.contains_key("clsx"));
    assert_eq!(pkg.script("db:push"), Some("prisma db push"));
    assert_eq!(pkg.metadata["packageManager"], "pnpm@8.10.0");
    assert_eq!(pkg.metadata["cfaithaMetadata"]["initVersion"], "0.3.0");

    assert!(read(dir.path(), "src/env.js").contains("DATABASE_URL"));
    assert!(read(dir.path(), "src/env.js").contains("NEXTAUTH_URL"));
    assert!(read(dir.path(), "src/server/auth.ts").contains("PrismaAdapter"));
    assert!(read(dir.path(), "prisma/schema.prisma").contains("model Account"));
    assert!(read(dir.path(), "src/app/page.tsx").contains("@/components/ui/card"));
    assert!(read(dir.path(), "src/app/layout.tsx").contains("globals.css"));
    assert!(read(dir.path(), ".env").contains("DISCORD_CLIENT_ID"));
    assert!(read(dir.path(), ".env.example").contains("changeme"));
    assert!(dir.path().join(".eslintrc.cjs").exists());
    assert!(dir.path().join(".gitignore").exists());
}

#[test]
fn test_authjs_gets_beta_next_auth_and_root_config() {
    let layout = bundled_templates();
    let dir = tempfile::tempdir().unwrap();
    let selections = Selections::new()
        .with(Feature::AuthJs, true)
        .with(Feature::Prisma, true)
        .with(Feature::Tailwind, false);
    let (features, _) = resolve(&selections, &raw("beta-app")).unwrap();

    copy_base_template(&layout, dir.path()).unwrap();
    let fs = LocalFs::new(dir.path());
    InstallerRunner::new(&fs, &layout)
        .run(&features, None)
        .unwrap();

    let pkg = manifest(dir.path());
    assert_eq!(pkg.dependencies["next-auth"], NEXT_AUTH_BETA);
    assert!(pkg.dependencies.contains_key("@auth/prisma-adapter"));
    assert!(!pkg.dev_dependencies.contains_key("tailwindcss"));

    assert!(read(dir.path(), "src/auth.ts").contains("PrismaAdapter(db)"));
    assert!(read(dir.path(), "src/app/api/auth/[...nextauth]/route.ts").contains("@/auth"));
    assert!(read(dir.path(), "src/env.js").contains("AUTH_SECRET"));
    assert!(!dir.path().join("src/server/auth.ts").exists());
    assert!(!read(dir.path(), "src/app/layout.tsx").contains("globals.css"));
}

#[test]
fn test_alias_rewrite_reaches_generated_sources() {
    let layout = bundled_templates();
    let dir = tempfile::tempdir().unwrap();
    let selections = Selections::new().with(Feature::Prisma, true);
    let mut raw = raw("alias-app");
    raw.import_alias = Some("~/".to_string());
    let (features, config) = resolve(&selections, &raw).unwrap();

    copy_base_template(&layout, dir.path()).unwrap();
    let fs = LocalFs::new(dir.path());
    InstallerRunner::new(&fs, &layout)
        .run(&features, None)
        .unwrap();
    let changed = finalize::rewrite_import_alias(dir.path(), &config.import_alias).unwrap();

    assert!(changed > 0);
    assert!(read(dir.path(), "src/server/db.ts").contains("from \"~/env\""));
    assert!(read(dir.path(), "tsconfig.json").contains("\"~/*\""));
}

#[test]
fn test_conflicting_auth_is_rejected_before_anything_is_written() {
    let selections = Selections::new()
        .with(Feature::NextAuth, true)
        .with(Feature::AuthJs, true);
    assert!(resolve(&selections, &raw("clash")).is_err());
}

#[test]
fn test_pages_router_request_is_refused() {
    let mut raw = raw("pages-app");
    raw.app_router = Some(false);
    assert!(resolve(&Selections::new(), &raw).is_err());
}

#[test]
fn test_minimal_project_still_has_a_route() {
    let layout = bundled_templates();
    let dir = tempfile::tempdir().unwrap();
    let selections = Selections::new().with(Feature::Tailwind, false);
    let (features, _) = resolve(&selections, &raw("bare-app")).unwrap();

    copy_base_template(&layout, dir.path()).unwrap();
    let fs = LocalFs::new(dir.path());
    InstallerRunner::new(&fs, &layout).run(&features, None).unwrap();

    assert!(read(dir.path(), "src/app/page.tsx").contains("export default function HomePage"));
    assert!(read(dir.path(), "src/app/layout.tsx").contains("RootLayout"));
}
