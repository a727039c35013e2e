//! Selectable features and the total feature assignment

use crate::error::{ComposeError, Result};
use std::fmt;
use std::str::FromStr;

/// A user-selectable capability toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    NextAuth,
    AuthJs,
    Prisma,
    Tailwind,
    Shadcn,
}

impl Feature {
    pub const COUNT: usize = 5;

    /// Every feature, in canonical order
    pub const ALL: [Feature; Feature::COUNT] = [
        Feature::NextAuth,
        Feature::AuthJs,
        Feature::Prisma,
        Feature::Tailwind,
        Feature::Shadcn,
    ];

    /// Stable identifier used in errors, flags and logs
    pub fn id(&self) -> &'static str {
        match self {
            Feature::NextAuth => "next-auth",
            Feature::AuthJs => "auth-js",
            Feature::Prisma => "prisma",
            Feature::Tailwind => "tailwind",
            Feature::Shadcn => "shadcn",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Feature::NextAuth => "NextAuth.js",
            Feature::AuthJs => "Auth.js",
            Feature::Prisma => "Prisma",
            Feature::Tailwind => "Tailwind CSS",
            Feature::Shadcn => "shadcn/ui",
        }
    }

    /// Value used when the user never mentioned the feature.
    ///
    /// This table is part of the resolver contract and must stay stable.
    pub fn default_enabled(&self) -> bool {
        match self {
            Feature::Tailwind => true,
            Feature::NextAuth | Feature::AuthJs | Feature::Prisma | Feature::Shadcn => false,
        }
    }

    /// Whether this feature is an authentication provider
    pub fn is_auth_provider(&self) -> bool {
        matches!(self, Feature::NextAuth | Feature::AuthJs)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Feature {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "next-auth" | "nextauth" => Ok(Feature::NextAuth),
            "auth-js" | "authjs" => Ok(Feature::AuthJs),
            "prisma" => Ok(Feature::Prisma),
            "tailwind" | "tailwindcss" => Ok(Feature::Tailwind),
            "shadcn" | "shadcn/ui" => Ok(Feature::Shadcn),
            other => Err(ComposeError::validation(
                "feature",
                format!("unknown feature '{}'", other),
            )),
        }
    }
}

/// Pairs of features that must never be active together
pub const CONFLICTS: &[(Feature, Feature)] = &[(Feature::NextAuth, Feature::AuthJs)];

/// Total assignment of "in use" to every known feature.
///
/// The only constructors check [`CONFLICTS`], so a value of this type is
/// always conflict-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FeatureSet {
    in_use: [bool; Feature::COUNT],
}

impl FeatureSet {
    /// The set with every feature off
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from the features that should be on
    pub fn from_active<I>(features: I) -> Result<Self>
    where
        I: IntoIterator<Item = Feature>,
    {
        let mut in_use = [false; Feature::COUNT];
        for feature in features {
            in_use[feature.index()] = true;
        }
        Self::checked(in_use)
    }

    pub(crate) fn checked(in_use: [bool; Feature::COUNT]) -> Result<Self> {
        for (first, second) in CONFLICTS {
            if in_use[first.index()] && in_use[second.index()] {
                return Err(ComposeError::Conflict {
                    first: *first,
                    second: *second,
                });
            }
        }
        Ok(Self { in_use })
    }

    pub fn is_active(&self, feature: Feature) -> bool {
        self.in_use[feature.index()]
    }

    /// True when every listed feature is active (an empty list always holds)
    pub fn all_active(&self, features: &[Feature]) -> bool {
        features.iter().all(|f| self.is_active(*f))
    }

    pub fn any_auth(&self) -> bool {
        Feature::ALL
            .iter()
            .any(|f| f.is_auth_provider() && self.is_active(*f))
    }

    /// Active features in canonical order
    pub fn active(&self) -> impl Iterator<Item = Feature> + '_ {
        Feature::ALL.into_iter().filter(|f| self.is_active(*f))
    }
}
