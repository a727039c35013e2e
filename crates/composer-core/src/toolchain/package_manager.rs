//! Detection of the package manager that launched the CLI

use std::fmt;
use std::str::FromStr;

/// Environment variable npm-compatible clients set for child processes
pub const USER_AGENT_ENV: &str = "npm_config_user_agent";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    /// Detect from the current process environment, falling back to npm
    pub fn detect() -> Self {
        std::env::var(USER_AGENT_ENV)
            .map(|agent| Self::from_user_agent(&agent))
            .unwrap_or_default()
    }

    /// Parse an `npm_config_user_agent` value such as `pnpm/8.10.0 npm/? node/v20.9.0`
    pub fn from_user_agent(agent: &str) -> Self {
        if agent.starts_with("yarn") {
            PackageManager::Yarn
        } else if agent.starts_with("pnpm") {
            PackageManager::Pnpm
        } else if agent.starts_with("bun") {
            PackageManager::Bun
        } else {
            PackageManager::Npm
        }
    }

    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Install invocation shown in next steps; yarn installs when run bare
    pub fn install_hint(&self) -> String {
        match self {
            PackageManager::Yarn => "yarn".to_string(),
            _ => format!("{} install", self.command()),
        }
    }

    /// Script invocation, e.g. `npm run dev` or `pnpm dev`
    pub fn run_script(&self, script: &str) -> String {
        match self {
            PackageManager::Npm | PackageManager::Bun => {
                format!("{} run {}", self.command(), script)
            }
            PackageManager::Pnpm | PackageManager::Yarn => {
                format!("{} {}", self.command(), script)
            }
        }
    }

    /// Installed version as reported by `<pm> -v`
    pub fn version(&self) -> Option<String> {
        std::process::Command::new(self.command())
            .arg("-v")
            .output()
            .ok()
            .and_then(|output| {
                if output.status.success() {
                    String::from_utf8(output.stdout)
                        .ok()
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                } else {
                    None
                }
            })
    }

    /// Value for the manifest's `packageManager` field.
    ///
    /// Bun does not read the field, so it is left out for bun projects.
    pub fn manifest_field(&self) -> Option<String> {
        if *self == PackageManager::Bun {
            return None;
        }
        self.version()
            .map(|version| format!("{}@{}", self.command(), version))
    }

    /// Run `<pm> install` in `project_dir`, streaming its output
    pub async fn install(&self, project_dir: &std::path::Path) -> anyhow::Result<()> {
        super::run_streamed(self.command(), &["install"], project_dir).await
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

impl FromStr for PackageManager {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "npm" => Ok(PackageManager::Npm),
            "pnpm" => Ok(PackageManager::Pnpm),
            "yarn" => Ok(PackageManager::Yarn),
            "bun" => Ok(PackageManager::Bun),
            other => anyhow::bail!("Unknown package manager: {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_user_agent() {
        assert_eq!(
            PackageManager::from_user_agent("pnpm/8.10.0 npm/? node/v20.9.0 linux x64"),
            PackageManager::Pnpm
        );
        assert_eq!(
            PackageManager::from_user_agent("yarn/1.22.19 npm/? node/v18.17.0"),
            PackageManager::Yarn
        );
        assert_eq!(
            PackageManager::from_user_agent("bun/1.0.11 npm/? node/v21.0.0"),
            PackageManager::Bun
        );
        assert_eq!(
            PackageManager::from_user_agent("npm/10.2.3 node/v20.9.0"),
            PackageManager::Npm
        );
        assert_eq!(PackageManager::from_user_agent(""), PackageManager::Npm);
    }

    #[test]
    fn test_script_invocations() {
        assert_eq!(PackageManager::Npm.run_script("dev"), "npm run dev");
        assert_eq!(PackageManager::Bun.run_script("db:push"), "bun run db:push");
        assert_eq!(PackageManager::Pnpm.run_script("dev"), "pnpm dev");
        assert_eq!(PackageManager::Yarn.run_script("db:push"), "yarn db:push");
    }

    #[test]
    fn test_install_hint() {
        assert_eq!(PackageManager::Yarn.install_hint(), "yarn");
        assert_eq!(PackageManager::Pnpm.install_hint(), "pnpm install");
    }

    #[test]
    fn test_bun_has_no_manifest_field() {
        assert_eq!(PackageManager::Bun.manifest_field(), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("PNPM".parse::<PackageManager>().unwrap(), PackageManager::Pnpm);
        assert!("cargo".parse::<PackageManager>().is_err());
    }
}
