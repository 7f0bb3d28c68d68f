//! Starter scaffolding
//!
//! Creates a new site by cloning a starter repository. Starters are named
//! either as an `owner/repository` GitHub shorthand or as a full git URL.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::process::Command;
use url::Url;

use crate::reporter;

static GITHUB_SHORTHAND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+$").unwrap());

/// Options for [`init_starter`].
#[derive(Debug, Clone, Default)]
pub struct StarterOptions {
    /// Directory to create the site in. Defaults to the starter's
    /// repository name.
    pub root_path: Option<String>,
}

/// Clone `starter` into a fresh directory and detach it from its origin.
pub async fn init_starter(starter: &str, options: StarterOptions) -> Result<()> {
    let clone_url = starter_url(starter)?;
    let root_path = options
        .root_path
        .unwrap_or_else(|| default_root_path(starter));
    let target = PathBuf::from(&root_path);

    if target.exists() {
        bail!("directory {root_path} already exists; remove it or pick another rootPath");
    }

    reporter::info(&format!("Creating new site from git: {clone_url}"));

    clone_starter(&clone_url, &target).await?;
    detach_from_origin(&target).await?;

    reporter::success(&format!("Created starter site in {root_path}"));

    eprintln!("\n  Next steps:");
    eprintln!("    {} cd {}", "→".dimmed(), root_path.cyan());
    eprintln!("    {} gatsby develop", "→".dimmed());
    eprintln!();

    Ok(())
}

/// Normalize a starter identifier to a cloneable URL.
fn starter_url(starter: &str) -> Result<String> {
    if GITHUB_SHORTHAND.is_match(starter) {
        return Ok(format!("https://github.com/{starter}.git"));
    }

    Url::parse(starter)
        .map(|url| url.to_string())
        .with_context(|| {
            format!("{starter} is not an owner/repository shorthand or a valid git URL")
        })
}

/// Directory name used when no rootPath is given: the repository part of the
/// starter, without any `.git` suffix.
fn default_root_path(starter: &str) -> String {
    let name = starter
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(starter);
    name.trim_end_matches(".git").to_string()
}

async fn clone_starter(clone_url: &str, target: &Path) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.dim} {msg}")
            .context("invalid spinner template")?,
    );
    spinner.set_message(format!("Cloning {clone_url}"));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let output = Command::new("git")
        .arg("clone")
        .arg("--depth")
        .arg("1")
        .arg("--quiet")
        .arg(clone_url)
        .arg(target)
        .output()
        .await
        .context("failed to launch git; is it installed?")?;

    spinner.finish_and_clear();

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("git clone of {clone_url} failed: {}", stderr.trim());
    }

    Ok(())
}

/// Strip the starter's git history so the new site starts clean.
async fn detach_from_origin(target: &Path) -> Result<()> {
    let git_dir = target.join(".git");
    if git_dir.exists() {
        tokio::fs::remove_dir_all(&git_dir)
            .await
            .with_context(|| format!("failed to remove {}", git_dir.display()))?;
    }
    Ok(())
}
