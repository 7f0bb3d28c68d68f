//! Local command resolution
//!
//! Finds the implementation of a command inside the site's own Gatsby
//! installation and hands back an invokable handle. The search is a fixed,
//! ordered candidate list: the current command layout first, then the
//! legacy one.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tokio::process::Command;

use crate::bundle::ArgumentBundle;
use crate::error::FatalError;
use crate::reporter;
use crate::resolver::Resolver;
use crate::site::SiteContext;

/// Candidate module locations, in priority order.
const CANDIDATE_ROOTS: [&str; 2] = ["gatsby/dist/commands", "gatsby/dist/utils"];

/// Inline runner handed to `node`: require the resolved module, call it with
/// the argument bundle, and map the settled outcome to an exit code.
const NODE_RUNNER: &str = "\
const mod = require(process.argv[1]);\
const run = mod && mod.__esModule && mod.default ? mod.default : mod;\
Promise.resolve(run(JSON.parse(process.argv[2]))).then(\
() => process.exit(0),\
(err) => { console.error(err && err.stack ? err.stack : err); process.exit(1); });";

/// Outcome of looking a command up in the local installation.
#[derive(Debug)]
pub enum Resolution {
    /// The first candidate that resolved, ready to invoke.
    Resolved(LocalCommand),
    /// Neither candidate location exists.
    NotFound,
    /// A candidate resolved but could not be loaded.
    LoadError(anyhow::Error),
}

/// A command implementation resolved from the site's own installation.
#[derive(Debug, Clone)]
pub struct LocalCommand {
    name: String,
    path: PathBuf,
}

impl LocalCommand {
    /// Open the resolved module and announce it on the verbose channel.
    fn load(name: &str, path: PathBuf) -> Result<Self> {
        fs::File::open(&path)
            .with_context(|| format!("failed to open {}", path.display()))?;

        reporter::verbose(&format!("loading local command from: {}", path.display()));

        Ok(Self {
            name: name.to_string(),
            path,
        })
    }

    /// Where the implementation was resolved from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run the implementation with the given bundle and await its outcome.
    ///
    /// The module is a function of one argument; a returned promise is
    /// awaited and its settlement becomes the child's exit status.
    pub async fn invoke(&self, bundle: &ArgumentBundle) -> Result<()> {
        let payload = serde_json::to_string(&bundle.to_json())
            .context("failed to serialize argument bundle")?;

        let status = Command::new("node")
            .arg("-e")
            .arg(NODE_RUNNER)
            .arg(&self.path)
            .arg(&payload)
            .status()
            .await
            .with_context(|| format!("failed to launch node for the {} command", self.name))?;

        if status.success() {
            Ok(())
        } else {
            bail!("the local {} command exited with {}", self.name, status)
        }
    }
}

/// Search the ordered candidate list for `command`.
pub fn resolve(site_dir: &Path, command: &str) -> Resolution {
    let resolver = Resolver::new(site_dir);

    for root in &CANDIDATE_ROOTS {
        let specifier = format!("{}/{}", root, command);
        match resolver.resolve(&specifier) {
            Ok(Some(path)) => {
                return match LocalCommand::load(command, path) {
                    Ok(local) => Resolution::Resolved(local),
                    Err(err) => Resolution::LoadError(err),
                }
            }
            Ok(None) => continue,
            Err(err) => return Resolution::LoadError(err),
        }
    }

    Resolution::NotFound
}

/// Enforce the local-site precondition and resolve `command`, mapping every
/// failure to its fatal kind. Resolution is never attempted outside a local
/// site.
pub fn require_local_command(
    site: &SiteContext,
    command: &'static str,
) -> std::result::Result<LocalCommand, FatalError> {
    if !site.is_local_site {
        reporter::verbose(&format!("current directory: {}", site.directory.display()));
        return Err(FatalError::NotALocalSite { command });
    }

    match resolve(&site.directory, command) {
        Resolution::Resolved(local) => Ok(local),
        Resolution::NotFound => Err(FatalError::CommandNotFound { command }),
        Resolution::LoadError(source) => Err(FatalError::CommandLoadError { command, source }),
    }
}
