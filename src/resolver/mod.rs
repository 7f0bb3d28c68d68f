//! Node-style module resolution
//!
//! Resolves bare specifiers such as `gatsby/dist/commands/develop` against a
//! site's own node_modules tree. Resolution walks up from the site directory
//! the way `require` does, so two projects with different framework versions
//! each find their own installed implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Extensions tried when a specifier does not name a file directly.
const EXTENSIONS: [&str; 4] = ["js", "mjs", "cjs", "json"];

/// The entry-point fields of a package's package.json.
#[derive(Debug, Default, Deserialize)]
struct PackageEntryPoints {
    module: Option<String>,
    main: Option<String>,
}

/// Module resolver rooted at a single directory.
pub struct Resolver {
    base_dir: PathBuf,
}

impl Resolver {
    /// Create a resolver that resolves as `base_dir` would.
    pub fn new(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
        }
    }

    /// Resolve a bare specifier to the file `require` would load.
    ///
    /// `Ok(None)` means no installed package satisfies the specifier. An
    /// error means a matching package exists but could not be read - the
    /// equivalent of `require` throwing mid-load.
    pub fn resolve(&self, specifier: &str) -> Result<Option<PathBuf>> {
        debug!("resolving '{}' from '{}'", specifier, self.base_dir.display());

        let mut current = self.base_dir.clone();

        // Walk up the directory tree looking for node_modules
        loop {
            let node_modules = current.join("node_modules");

            if node_modules.is_dir() {
                if let Some(resolved) = self.resolve_in_node_modules(&node_modules, specifier)? {
                    debug!("resolved to: {}", resolved.display());
                    return Ok(Some(resolved));
                }
            }

            if !current.pop() {
                break;
            }
        }

        Ok(None)
    }

    /// Resolve a specifier within one node_modules directory.
    fn resolve_in_node_modules(
        &self,
        node_modules: &Path,
        specifier: &str,
    ) -> Result<Option<PathBuf>> {
        // Split specifier into package name and subpath
        let (package_name, subpath) = if specifier.starts_with('@') {
            // Scoped package: @scope/name or @scope/name/subpath
            let parts: Vec<&str> = specifier.splitn(3, '/').collect();
            if parts.len() < 2 {
                return Ok(None);
            }
            let name = format!("{}/{}", parts[0], parts[1]);
            (name, parts.get(2).map(|s| s.to_string()))
        } else {
            // Regular package: name or name/subpath
            let parts: Vec<&str> = specifier.splitn(2, '/').collect();
            (parts[0].to_string(), parts.get(1).map(|s| s.to_string()))
        };

        let package_dir = node_modules.join(&package_name);

        if !package_dir.is_dir() {
            return Ok(None);
        }

        // A subpath bypasses the package entry points entirely
        if let Some(sub) = subpath {
            return self.resolve_relative(&sub, &package_dir);
        }

        // Otherwise consult package.json for the module/main entry
        let package_json = package_dir.join("package.json");

        if package_json.is_file() {
            let content = fs::read_to_string(&package_json)
                .with_context(|| format!("failed to read {}", package_json.display()))?;
            let pkg: PackageEntryPoints = serde_json::from_str(&content)
                .with_context(|| format!("failed to parse {}", package_json.display()))?;

            if let Some(module) = &pkg.module {
                let module_path = package_dir.join(module);
                if module_path.is_file() {
                    return Ok(Some(module_path));
                }
            }

            if let Some(main) = &pkg.main {
                if let Some(resolved) = self.resolve_relative(main, &package_dir)? {
                    return Ok(Some(resolved));
                }
            }
        }

        // Default entry point
        self.resolve_relative("index.js", &package_dir)
    }

    /// Resolve a path relative to `base_dir`, trying extensions and
    /// directory index files.
    fn resolve_relative(&self, specifier: &str, base_dir: &Path) -> Result<Option<PathBuf>> {
        let target = base_dir.join(specifier);

        // Exact path first
        if target.is_file() {
            return Ok(Some(target));
        }

        for ext in &EXTENSIONS {
            let with_ext = target.with_extension(ext);
            if with_ext.is_file() {
                return Ok(Some(with_ext));
            }
        }

        if target.is_dir() {
            for ext in &EXTENSIONS {
                let index = target.join(format!("index.{}", ext));
                if index.is_file() {
                    return Ok(Some(index));
                }
            }
        }

        Ok(None)
    }
}
