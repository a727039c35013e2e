//! Template slots and variant selection

use crate::error::{ComposeError, Result};
use crate::feature::{Feature, FeatureSet};

/// Conjunction of features that must all be active.
///
/// The empty conjunction always holds and serves as the catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predicate {
    pub all_of: &'static [Feature],
}

impl Predicate {
    pub const ALWAYS: Predicate = Predicate { all_of: &[] };

    pub const fn all_of(features: &'static [Feature]) -> Self {
        Self { all_of: features }
    }

    pub fn holds(&self, features: &FeatureSet) -> bool {
        features.all_active(self.all_of)
    }

    pub fn is_catch_all(&self) -> bool {
        self.all_of.is_empty()
    }
}

/// A project file whose content depends on the active features
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateSlot {
    pub name: &'static str,
    /// Directory under `extras/` holding the variants
    pub source_dir: &'static str,
    /// Project-relative output path
    pub destination: &'static str,
    /// Checked in order; more specific predicates come first
    pub variants: &'static [(Predicate, &'static str)],
}

impl TemplateSlot {
    /// Path of a variant relative to the extras directory
    pub fn variant_path(&self, variant: &str) -> String {
        format!("{}/{}", self.source_dir, variant)
    }
}

/// Pick the first variant whose predicate holds
pub fn select(slot: &TemplateSlot, features: &FeatureSet) -> Result<&'static str> {
    slot.variants
        .iter()
        .find(|(predicate, _)| predicate.holds(features))
        .map(|(_, variant)| *variant)
        .ok_or(ComposeError::SelectionExhausted { slot: slot.name })
}

use Feature::{AuthJs, NextAuth, Prisma, Shadcn, Tailwind};

pub const LAYOUT: TemplateSlot = TemplateSlot {
    name: "layout",
    source_dir: "src/app/layout",
    destination: "src/app/layout.tsx",
    variants: &[
        (Predicate::all_of(&[Tailwind]), "with-tw.tsx"),
        (Predicate::ALWAYS, "base.tsx"),
    ],
};

pub const PAGE: TemplateSlot = TemplateSlot {
    name: "page",
    source_dir: "src/app/page",
    destination: "src/app/page.tsx",
    variants: &[
        (Predicate::all_of(&[Tailwind, Shadcn]), "with-tw-shadcn.tsx"),
        (Predicate::all_of(&[Tailwind]), "with-tw.tsx"),
        (Predicate::ALWAYS, "base.tsx"),
    ],
};

pub const ENV_SCHEMA: TemplateSlot = TemplateSlot {
    name: "env-schema",
    source_dir: "src/env",
    destination: "src/env.js",
    variants: &[
        (Predicate::all_of(&[AuthJs, Prisma]), "with-authjs-db.js"),
        (Predicate::all_of(&[AuthJs]), "with-authjs.js"),
        (Predicate::all_of(&[NextAuth, Prisma]), "with-auth-db.js"),
        (Predicate::all_of(&[NextAuth]), "with-auth.js"),
        (Predicate::all_of(&[Prisma]), "with-db.js"),
        (Predicate::ALWAYS, "base.js"),
    ],
};

pub const AUTH_ROUTE: TemplateSlot = TemplateSlot {
    name: "auth-route",
    source_dir: "src/app/api/auth/[...nextauth]",
    destination: "src/app/api/auth/[...nextauth]/route.ts",
    variants: &[
        (Predicate::all_of(&[AuthJs]), "authjs.ts"),
        (Predicate::ALWAYS, "route.ts"),
    ],
};

pub const AUTH_CONFIG: TemplateSlot = TemplateSlot {
    name: "auth-config",
    source_dir: "src",
    destination: "src/auth.ts",
    variants: &[
        (Predicate::all_of(&[Prisma]), "auth-with-prisma.ts"),
        (Predicate::ALWAYS, "auth.ts"),
    ],
};

pub const SERVER_AUTH: TemplateSlot = TemplateSlot {
    name: "server-auth",
    source_dir: "src/server/auth",
    destination: "src/server/auth.ts",
    variants: &[
        (Predicate::all_of(&[Prisma]), "with-prisma.ts"),
        (Predicate::ALWAYS, "base.ts"),
    ],
};

pub const PRISMA_SCHEMA: TemplateSlot = TemplateSlot {
    name: "prisma-schema",
    source_dir: "prisma/schema",
    destination: "prisma/schema.prisma",
    variants: &[
        (Predicate::all_of(&[NextAuth]), "with-auth.prisma"),
        (Predicate::all_of(&[AuthJs]), "with-auth.prisma"),
        (Predicate::ALWAYS, "base.prisma"),
    ],
};

/// Every slot the installers and boilerplate step can materialize
pub const ALL_SLOTS: &[TemplateSlot] = &[
    LAYOUT,
    PAGE,
    ENV_SCHEMA,
    AUTH_ROUTE,
    AUTH_CONFIG,
    SERVER_AUTH,
    PRISMA_SCHEMA,
];
