//! `gatsby build` - delegate to the site's own production build.

use std::env;

use clap::Args;
use serde_json::{json, Map, Value};

use crate::bundle::ArgumentBundle;
use crate::error::FatalError;
use crate::locator;
use crate::site::SiteContext;

/// Build a Gatsby project.
#[derive(Args, Debug)]
pub struct BuildCommand {
    /// Build site with link paths prefixed (set prefix in your config).
    #[arg(long)]
    pub prefix_paths: bool,
}

impl BuildCommand {
    pub async fn execute(&self, site: &SiteContext) -> Result<(), FatalError> {
        // Production mode must be visible to the delegate, so it is set
        // before resolution even starts.
        env::set_var("NODE_ENV", "production");

        let command = locator::require_local_command(site, "build")?;
        let bundle = ArgumentBundle::build(self.flags(), site);
        command.invoke(&bundle).await?;
        Ok(())
    }

    fn flags(&self) -> Map<String, Value> {
        let mut flags = Map::new();
        flags.insert("prefixPaths".to_string(), json!(self.prefix_paths));
        flags
    }
}
