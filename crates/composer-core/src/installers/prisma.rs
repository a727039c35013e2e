use super::InstallContext;
use crate::error::Result;
use crate::pipeline::ProjectDraft;
use crate::templates::slots::PRISMA_SCHEMA;

const SCRIPTS: &[(&str, &str)] = &[
    ("db:push", "prisma db push"),
    ("db:studio", "prisma studio"),
    ("postinstall", "prisma generate"),
];

pub(super) fn install(ctx: &InstallContext<'_>, draft: &mut ProjectDraft) -> Result<()> {
    draft.add_dependencies(ctx, &["prisma"], true)?;
    draft.add_dependencies(ctx, &["@prisma/client"], false)?;

    draft.use_slot(ctx, &PRISMA_SCHEMA)?;
    draft.copy_extra(ctx, "src/server/db.ts", "src/server/db.ts");

    for (name, command) in SCRIPTS {
        draft.manifest.set_script(name, command);
    }
    Ok(())
}
