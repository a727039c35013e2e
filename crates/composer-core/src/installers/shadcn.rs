use super::InstallContext;
use crate::error::Result;
use crate::pipeline::ProjectDraft;

const DEV_DEPENDENCIES: &[&str] = &[
    "clsx",
    "@radix-ui/react-icons",
    "class-variance-authority",
    "tailwind-merge",
    "tailwindcss-animate",
];

const FILES: &[(&str, &str)] = &[
    ("config/components.json", "components.json"),
    ("src/lib/utils.ts", "src/lib/utils.ts"),
    ("src/components/ui/card.tsx", "src/components/ui/card.tsx"),
];

pub(super) fn install(ctx: &InstallContext<'_>, draft: &mut ProjectDraft) -> Result<()> {
    draft.add_dependencies(ctx, DEV_DEPENDENCIES, true)?;
    for (source, destination) in FILES {
        draft.copy_extra(ctx, source, destination);
    }
    Ok(())
}
