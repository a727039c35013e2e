//! CLI version checks against the npm registry

use anyhow::{Context, Result};
use semver::Version;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// The check is advisory; a slow registry must not hold up scaffolding
const REGISTRY_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Deserialize)]
struct DistTags {
    latest: String,
}

/// Compare the running CLI version against the latest published one.
/// Returns a warning message if the CLI is older
pub fn check_outdated(
    cli_version: &str,
    latest_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli_ver = parse_version(cli_version).ok()?;
    let latest_ver = parse_version(latest_version).ok()?;

    if cli_ver < latest_ver {
        Some(format!(
            "You are using an outdated version ({}). The latest version is {}.\n\
             Consider updating: {}",
            cli_version, latest_version, upgrade_command
        ))
    } else {
        None
    }
}

/// Parse version string, handling a leading `v`
pub fn parse_version(version_str: &str) -> Result<Version> {
    let cleaned = version_str.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}

/// `<registry>/-/package/<name>/dist-tags`, keeping scoped names as one segment
pub fn dist_tags_url(registry: &Url, package: &str) -> Result<Url> {
    let mut url = registry.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", registry))?
        .pop_if_empty()
        .extend(["-", "package", package, "dist-tags"]);
    Ok(url)
}

/// Fetch the `latest` dist-tag of `package`
pub async fn fetch_latest_version(package: &str, user_agent: &str) -> Result<String> {
    let registry = Url::parse(NPM_REGISTRY_URL)?;
    let url = dist_tags_url(&registry, package)?;

    let client = reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(REGISTRY_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new());

    let response = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Failed to fetch {}: HTTP {}", url, response.status());
    }

    let tags: DistTags = response
        .json()
        .await
        .context("Failed to parse npm dist-tags")?;
    Ok(tags.latest)
}

/// Fetch the latest release and build the outdated warning, if any.
/// Network failures are logged and swallowed
pub async fn outdated_warning(
    package: &str,
    user_agent: &str,
    cli_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    match fetch_latest_version(package, user_agent).await {
        Ok(latest) => check_outdated(cli_version, &latest, upgrade_command),
        Err(e) => {
            tracing::debug!(error = %e, "version check skipped");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_older_than_latest() {
        let warning = check_outdated("0.1.0", "0.2.0", "npm i -g create-faith-app@latest");
        assert!(warning.is_some());
        assert!(warning.unwrap().contains("0.2.0"));
    }

    #[test]
    fn test_cli_same_as_latest() {
        assert!(check_outdated("0.2.0", "0.2.0", "upgrade").is_none());
    }

    #[test]
    fn test_cli_newer_than_latest() {
        assert!(check_outdated("0.3.0", "v0.2.0", "upgrade").is_none());
    }

    #[test]
    fn test_invalid_versions() {
        assert!(check_outdated("invalid", "0.1.0", "upgrade").is_none());
    }

    #[test]
    fn test_dist_tags_url_keeps_scope_in_one_segment() {
        let registry = Url::parse(NPM_REGISTRY_URL).unwrap();
        assert_eq!(
            dist_tags_url(&registry, "create-faith-app").unwrap().as_str(),
            "https://registry.npmjs.org/-/package/create-faith-app/dist-tags"
        );
        assert_eq!(
            dist_tags_url(&registry, "@faith/create").unwrap().as_str(),
            "https://registry.npmjs.org/-/package/@faith%2Fcreate/dist-tags"
        );
    }
}
