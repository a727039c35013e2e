//! Git repository setup for freshly scaffolded projects

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// True if `git` is on PATH
pub fn is_installed() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// True if `dir` already sits inside a git work tree
pub fn is_inside_repo(dir: &Path) -> bool {
    Command::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .current_dir(dir)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) -> Result<()> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .with_context(|| format!("Failed to run git {}", args.join(" ")))?;
    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}

/// Initialize a repository in `dir` and stage everything.
///
/// Returns `false` without touching anything when `dir` is already inside a
/// repository.
pub fn init(dir: &Path) -> Result<bool> {
    if is_inside_repo(dir) {
        tracing::debug!(dir = %dir.display(), "already inside a git repository");
        return Ok(false);
    }
    git(dir, &["init"])?;
    git(dir, &["add", "."])?;
    Ok(true)
}
