//! Pinned dependency versions.
//!
//! Looking versions up here instead of asking the npm registry keeps every
//! generated project reproducible.

use crate::error::{ComposeError, Result};

/// `next-auth` release required when Auth.js is selected
pub const NEXT_AUTH_BETA: &str = "^5.0.0-beta.3";

pub const DEPENDENCY_VERSIONS: &[(&str, &str)] = &[
    // NextAuth.js
    ("next-auth", "^4.24.5"),
    ("@next-auth/prisma-adapter", "^1.0.7"),
    // Auth.js
    ("@auth/core", "^0.18.3"),
    ("@auth/prisma-adapter", "^1.0.7"),
    // shadcn/ui
    ("clsx", "^2.0.0"),
    ("tailwind-merge", "^2.0.0"),
    ("tailwindcss-animate", "^1.0.7"),
    ("@radix-ui/react-icons", "^1.3.0"),
    ("class-variance-authority", "^0.7.0"),
    // Prisma
    ("prisma", "^5.6.0"),
    ("@prisma/client", "^5.6.0"),
    // Tailwind CSS
    ("tailwindcss", "^3.3.5"),
    ("autoprefixer", "^10.4.14"),
    ("postcss", "^8.4.31"),
    ("prettier", "^3.1.0"),
    ("prettier-plugin-tailwindcss", "^0.5.7"),
];

/// Strict lookup; unknown identifiers are an internal defect
pub fn pinned_version(name: &str) -> Result<&'static str> {
    DEPENDENCY_VERSIONS
        .iter()
        .find(|(dep, _)| *dep == name)
        .map(|(_, version)| *version)
        .ok_or_else(|| ComposeError::UnknownDependency {
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_known_dependency() {
        assert_eq!(pinned_version("prisma").unwrap(), "^5.6.0");
    }

    #[test]
    fn test_unknown_dependency_is_error() {
        let err = pinned_version("left-pad").unwrap_err();
        assert!(matches!(err, ComposeError::UnknownDependency { name } if name == "left-pad"));
    }

    #[test]
    fn test_table_has_no_duplicate_identifiers() {
        let unique: HashSet<_> = DEPENDENCY_VERSIONS.iter().map(|(name, _)| name).collect();
        assert_eq!(unique.len(), DEPENDENCY_VERSIONS.len());
    }
}
