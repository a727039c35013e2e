use super::InstallContext;
use crate::error::Result;
use crate::pipeline::ProjectDraft;

const DEV_DEPENDENCIES: &[&str] = &[
    "tailwindcss",
    "postcss",
    "autoprefixer",
    "prettier",
    "prettier-plugin-tailwindcss",
];

/// (source under extras/, project destination)
const FILES: &[(&str, &str)] = &[
    ("config/tailwind.config.ts", "tailwind.config.ts"),
    ("config/postcss.config.cjs", "postcss.config.cjs"),
    ("config/_prettier.config.js", "prettier.config.js"),
    ("src/styles/globals.css", "src/styles/globals.css"),
];

pub(super) fn install(ctx: &InstallContext<'_>, draft: &mut ProjectDraft) -> Result<()> {
    draft.add_dependencies(ctx, DEV_DEPENDENCIES, true)?;
    for (source, destination) in FILES {
        draft.copy_extra(ctx, source, destination);
    }
    Ok(())
}
