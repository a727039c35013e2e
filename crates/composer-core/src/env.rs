//! `.env` / `.env.example` composition

use crate::feature::{Feature, FeatureSet};

pub const ENV_PATH: &str = ".env";
pub const ENV_EXAMPLE_PATH: &str = ".env.example";

/// Value every assignment in `.env.example` is replaced with
pub const REDACTED_VALUE: &str = "changeme";

/// A fragment of environment documentation, included when its gate holds
#[derive(Debug, Clone, Copy)]
pub struct EnvBlock {
    pub name: &'static str,
    pub gate: fn(&FeatureSet) -> bool,
    pub content: &'static str,
}

const BASE: &str = "\
# When adding additional environment variables, the schema in \"/src/env.js\"
# should be updated accordingly.
";

const PRISMA: &str = "
# Prisma
# https://www.prisma.io/docs/reference/database-reference/connection-urls#env
DATABASE_URL=\"file:./db.sqlite\"
";

const NEXT_AUTH: &str = "
# Next Auth
# On unix systems you can type: openssl rand -base64 32
# if you're using Windows you can generate one online: https://generate-secret.vercel.app/32
# Next Auth SECRET docs: https://next-auth.js.org/configuration/options#secret
# NEXTAUTH_SECRET=\"\"
NEXTAUTH_URL=\"http://localhost:3000\"

# Next Auth Discord Provider
DISCORD_CLIENT_ID=\"\"
DISCORD_CLIENT_SECRET=\"\"
";

const AUTH_JS: &str = "
# Auth.js
# On unix systems you can type: openssl rand -hex 32
# if you're using Windows you can generate one online: https://generate-secret.vercel.app/32
# Auth.js SECRET docs: https://authjs.dev/reference/core#secret
AUTH_SECRET=\"\"

# Auth.js Discord Provider
AUTH_DISCORD_ID=\"\"
AUTH_DISCORD_SECRET=\"\"
";

const NO_OPTIONAL_FEATURES: &str = "
# Example:
# SERVERVAR=\"foo\"
# NEXT_PUBLIC_CLIENTVAR=\"bar\"
";

const EXAMPLE_DISCLAIMER: &str = "\
# Since the \".env\" file is gitignored, you can use the \".env.example\" file to
# build a new \".env\" file when you clone the repo. Keep this file up-to-date
# when you add new variables to `.env`.

# This file will be committed to version control, so make sure not to have any
# secrets in it. If you are cloning this repo, create a copy of this file named
# \".env\" and populate it with your secrets.

";

/// Blocks in output order. Composition walks this list, never the feature set.
pub const ENV_BLOCKS: &[EnvBlock] = &[
    EnvBlock {
        name: "base",
        gate: |_| true,
        content: BASE,
    },
    EnvBlock {
        name: "prisma",
        gate: |f| f.is_active(Feature::Prisma),
        content: PRISMA,
    },
    EnvBlock {
        name: "next-auth",
        gate: |f| f.is_active(Feature::NextAuth),
        content: NEXT_AUTH,
    },
    EnvBlock {
        name: "auth-js",
        gate: |f| f.is_active(Feature::AuthJs),
        content: AUTH_JS,
    },
    EnvBlock {
        name: "no-optional-features",
        gate: |f| !f.is_active(Feature::Prisma) && !f.any_auth(),
        content: NO_OPTIONAL_FEATURES,
    },
];

/// Composed contents for both env files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFiles {
    pub env: String,
    pub example: String,
}

/// Names of the blocks that apply, in output order
pub fn active_blocks(features: &FeatureSet) -> Vec<&'static str> {
    ENV_BLOCKS
        .iter()
        .filter(|block| (block.gate)(features))
        .map(|block| block.name)
        .collect()
}

pub fn compose(features: &FeatureSet) -> EnvFiles {
    let mut env = String::new();
    let mut example = String::from(EXAMPLE_DISCLAIMER);

    for block in ENV_BLOCKS.iter().filter(|block| (block.gate)(features)) {
        env.push_str(block.content);
        example.push_str(&redact(block.content));
    }

    EnvFiles { env, example }
}

/// Replace the value of every `KEY=value` line, leaving comments alone
fn redact(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for line in content.split_inclusive('\n') {
        match assignment_key(line) {
            Some(key) => {
                out.push_str(&format!("{}=\"{}\"", key, REDACTED_VALUE));
                if line.ends_with('\n') {
                    out.push('\n');
                }
            }
            None => out.push_str(line),
        }
    }
    out
}

fn assignment_key(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        return None;
    }
    let (key, _) = trimmed.split_once('=')?;
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
    valid.then_some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_features_emits_base_and_placeholder() {
        let files = compose(&FeatureSet::empty());
        assert_eq!(files.env, format!("{}{}", BASE, NO_OPTIONAL_FEATURES));
        assert_eq!(
            files.example,
            format!("{}{}{}", EXAMPLE_DISCLAIMER, BASE, NO_OPTIONAL_FEATURES)
        );
        assert_eq!(
            active_blocks(&FeatureSet::empty()),
            vec!["base", "no-optional-features"]
        );
    }

    #[test]
    fn test_block_order_is_fixed() {
        let features = FeatureSet::from_active([Feature::AuthJs, Feature::Prisma]).unwrap();
        let files = compose(&features);

        let base = files.env.find("# When adding").unwrap();
        let prisma = files.env.find("# Prisma").unwrap();
        let auth = files.env.find("# Auth.js").unwrap();
        assert!(base < prisma && prisma < auth);
        assert!(!files.env.contains("# Example:"));
    }

    #[test]
    fn test_order_invariant_under_insertion_permutations() {
        let orders: [[Feature; 3]; 3] = [
            [Feature::NextAuth, Feature::Prisma, Feature::Tailwind],
            [Feature::Tailwind, Feature::NextAuth, Feature::Prisma],
            [Feature::Prisma, Feature::Tailwind, Feature::NextAuth],
        ];
        let outputs: Vec<EnvFiles> = orders
            .iter()
            .map(|order| compose(&FeatureSet::from_active(order.iter().copied()).unwrap()))
            .collect();
        assert!(outputs.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn test_auth_only_suppresses_placeholder() {
        let features = FeatureSet::from_active([Feature::AuthJs]).unwrap();
        assert_eq!(active_blocks(&features), vec!["base", "auth-js"]);
    }

    #[test]
    fn test_example_redacts_values_and_keeps_comments() {
        let features = FeatureSet::from_active([Feature::NextAuth, Feature::Prisma]).unwrap();
        let files = compose(&features);

        assert!(files.env.contains("DATABASE_URL=\"file:./db.sqlite\""));
        assert!(files.example.starts_with(EXAMPLE_DISCLAIMER));
        assert!(files.example.contains("DATABASE_URL=\"changeme\""));
        assert!(files.example.contains("NEXTAUTH_URL=\"changeme\""));
        assert!(files.example.contains("# NEXTAUTH_SECRET=\"\""));
        assert!(!files.example.contains("file:./db.sqlite"));
    }

    #[test]
    fn test_redact_ignores_non_assignments() {
        assert_eq!(redact("# A=1\nB=2\nlower=3\n"), "# A=1\nB=\"changeme\"\nlower=3\n");
    }
}
