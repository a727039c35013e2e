//! NextAuth.js and Auth.js installers

use super::InstallContext;
use crate::error::Result;
use crate::feature::Feature;
use crate::pipeline::ProjectDraft;
use crate::templates::slots::{AUTH_CONFIG, AUTH_ROUTE, SERVER_AUTH};

const EXTENDED_TYPES: &str = "types/next-auth.d.ts";

pub(super) fn next_auth(ctx: &InstallContext<'_>, draft: &mut ProjectDraft) -> Result<()> {
    let mut deps = vec!["next-auth"];
    if ctx.features.is_active(Feature::Prisma) {
        deps.push("@next-auth/prisma-adapter");
    }
    draft.add_dependencies(ctx, &deps, false)?;

    draft.use_slot(ctx, &AUTH_ROUTE)?;
    draft.use_slot(ctx, &SERVER_AUTH)?;
    draft.copy_extra(ctx, EXTENDED_TYPES, EXTENDED_TYPES);
    Ok(())
}

pub(super) fn auth_js(ctx: &InstallContext<'_>, draft: &mut ProjectDraft) -> Result<()> {
    let mut deps = vec!["@auth/core"];
    if ctx.features.is_active(Feature::Prisma) {
        deps.push("@auth/prisma-adapter");
    }
    // resolves to the v5 beta while Auth.js is active
    deps.push("next-auth");
    draft.add_dependencies(ctx, &deps, false)?;

    draft.use_slot(ctx, &AUTH_ROUTE)?;
    draft.use_slot(ctx, &AUTH_CONFIG)?;
    draft.copy_extra(ctx, EXTENDED_TYPES, EXTENDED_TYPES);
    Ok(())
}
