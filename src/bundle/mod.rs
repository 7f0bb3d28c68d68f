//! Argument bundling
//!
//! Merges parsed CLI flags with the site context into the single JSON object
//! handed to a delegated command. The merge is pure: a fresh bundle is built
//! for every invocation and the delegate gets its own copy.

use serde_json::{json, Map, Value};

use crate::site::SiteContext;

/// The argument object a delegated command receives.
#[derive(Debug, Clone)]
pub struct ArgumentBundle {
    values: Map<String, Value>,
}

impl ArgumentBundle {
    /// Union of `flags` with the contextual fields every delegate expects:
    /// `directory`, `sitePackageJson`, and `browserslist`.
    pub fn build(flags: Map<String, Value>, site: &SiteContext) -> Self {
        let mut values = flags;

        values.insert(
            "directory".to_string(),
            json!(site.directory.display().to_string()),
        );
        values.insert(
            "sitePackageJson".to_string(),
            site.manifest
                .as_ref()
                .map(|m| m.raw.clone())
                .unwrap_or_else(|| json!({})),
        );
        values.insert("browserslist".to_string(), json!(site.browser_targets));

        Self { values }
    }

    /// Look up a single bundled value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// The bundle as the JSON object passed to the delegate.
    pub fn to_json(&self) -> Value {
        Value::Object(self.values.clone())
    }
}
