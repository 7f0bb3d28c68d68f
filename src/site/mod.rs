//! Local site detection
//!
//! Decides whether a working directory is a Gatsby site by reading its
//! package.json. Detection never fails: a missing or unparsable manifest
//! simply means "not a local site".

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

/// Browser targets applied when a site's package.json does not provide a
/// `browserslist` of its own.
pub const DEFAULT_BROWSERS: [&str; 3] = ["> 1%", "last 2 versions", "IE >= 9"];

/// Package name whose presence in a manifest marks a site as local.
const HOST_PACKAGE: &str = "gatsby";

/// A site's parsed package.json.
///
/// The full document is retained so delegated commands receive the manifest
/// exactly as written, not just the fields the dispatcher looks at.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub raw: Value,
}

impl Manifest {
    fn dependency(&self, section: &str, name: &str) -> Option<&Value> {
        self.raw.get(section)?.get(name)
    }

    /// JS-truthy check: `"gatsby": ""` does not count as a dependency.
    fn declares(&self, name: &str) -> bool {
        ["dependencies", "devDependencies"]
            .iter()
            .filter_map(|section| self.dependency(section, name))
            .any(is_truthy)
    }

    fn browserslist(&self) -> Option<Vec<String>> {
        let entries: Vec<String> = self
            .raw
            .get("browserslist")?
            .as_array()?
            .iter()
            .filter_map(|v| v.as_str().map(str::to_owned))
            .collect();
        if entries.is_empty() {
            None
        } else {
            Some(entries)
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Everything the dispatcher knows about the invocation environment.
/// Computed once per process and read-only afterwards.
#[derive(Debug, Clone)]
pub struct SiteContext {
    /// Whether the directory's manifest declares a dependency on gatsby.
    pub is_local_site: bool,

    /// The working directory the CLI was invoked from.
    pub directory: PathBuf,

    /// The parsed manifest, when one could be read.
    pub manifest: Option<Manifest>,

    /// Browser targets for delegated commands.
    pub browser_targets: Vec<String>,
}

impl SiteContext {
    /// Inspect `directory` for a package.json declaring gatsby.
    pub fn detect(directory: &Path) -> Self {
        let manifest = read_manifest(directory);

        let is_local_site = manifest
            .as_ref()
            .map(|m| m.declares(HOST_PACKAGE))
            .unwrap_or(false);

        let browser_targets = manifest
            .as_ref()
            .and_then(Manifest::browserslist)
            .unwrap_or_else(|| DEFAULT_BROWSERS.iter().map(|s| s.to_string()).collect());

        Self {
            is_local_site,
            directory: directory.to_path_buf(),
            manifest,
            browser_targets,
        }
    }
}

/// Read and parse `<directory>/package.json`. Any failure is a silent
/// non-local fallback, not an error.
fn read_manifest(directory: &Path) -> Option<Manifest> {
    let path = directory.join("package.json");
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) => {
            debug!("no readable package.json at {}: {err}", path.display());
            return None;
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(raw) => Some(Manifest { raw }),
        Err(err) => {
            debug!("ignoring unparsable package.json at {}: {err}", path.display());
            None
        }
    }
}
