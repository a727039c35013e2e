//! Installer registry
//!
//! Each feature maps to one installer. Installers are pure transforms over a
//! [`ProjectDraft`]: they merge dependencies, queue file copies and compose
//! env files, but never touch the filesystem themselves.

mod auth;
mod env_vars;
mod prisma;
mod shadcn;
mod tailwind;

use crate::error::Result;
use crate::feature::{Feature, FeatureSet};
use crate::pipeline::ProjectDraft;
use crate::templates::TemplateLayout;
use std::fmt;

/// Read-only inputs every installer sees
#[derive(Debug, Clone, Copy)]
pub struct InstallContext<'a> {
    pub features: &'a FeatureSet,
    pub templates: &'a TemplateLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Installer {
    NextAuth,
    AuthJs,
    Shadcn,
    Prisma,
    Tailwind,
    EnvVars,
}

impl Installer {
    pub fn name(&self) -> &'static str {
        match self {
            Installer::NextAuth => "next-auth",
            Installer::AuthJs => "auth-js",
            Installer::Shadcn => "shadcn",
            Installer::Prisma => "prisma",
            Installer::Tailwind => "tailwind",
            Installer::EnvVars => "env-vars",
        }
    }

    /// Apply this installer to the draft
    pub fn apply(&self, ctx: &InstallContext<'_>, draft: &mut ProjectDraft) -> Result<()> {
        tracing::debug!(installer = self.name(), "applying installer");
        match self {
            Installer::NextAuth => auth::next_auth(ctx, draft),
            Installer::AuthJs => auth::auth_js(ctx, draft),
            Installer::Shadcn => shadcn::install(ctx, draft),
            Installer::Prisma => prisma::install(ctx, draft),
            Installer::Tailwind => tailwind::install(ctx, draft),
            Installer::EnvVars => env_vars::install(ctx, draft),
        }
    }
}

impl fmt::Display for Installer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallerEntry {
    /// `None` for unconditional installers
    pub feature: Option<Feature>,
    pub in_use: bool,
    pub installer: Installer,
}

/// Registry rows in execution order.
///
/// Dependency-merging installers come first; env composition is last and
/// always runs, since every project needs at least a baseline `.env` pair.
const REGISTRY: &[(Option<Feature>, Installer)] = &[
    (Some(Feature::NextAuth), Installer::NextAuth),
    (Some(Feature::AuthJs), Installer::AuthJs),
    (Some(Feature::Shadcn), Installer::Shadcn),
    (Some(Feature::Prisma), Installer::Prisma),
    (Some(Feature::Tailwind), Installer::Tailwind),
    (None, Installer::EnvVars),
];

pub fn build(features: &FeatureSet) -> Vec<InstallerEntry> {
    REGISTRY
        .iter()
        .map(|(feature, installer)| InstallerEntry {
            feature: *feature,
            in_use: feature.is_none_or(|f| features.is_active(f)),
            installer: *installer,
        })
        .collect()
}

/// Installers that will run, in registry order
pub fn active(features: &FeatureSet) -> Vec<Installer> {
    build(features)
        .into_iter()
        .filter(|entry| entry.in_use)
        .map(|entry| entry.installer)
        .collect()
}
