use super::InstallContext;
use crate::env;
use crate::error::Result;
use crate::pipeline::ProjectDraft;
use crate::templates::slots::ENV_SCHEMA;

pub(super) fn install(ctx: &InstallContext<'_>, draft: &mut ProjectDraft) -> Result<()> {
    draft.use_slot(ctx, &ENV_SCHEMA)?;
    draft.env = Some(env::compose(ctx.features));
    Ok(())
}
