//! `gatsby serve` - delegate to the site's own static server.

use clap::Args;
use serde_json::{json, Map, Value};

use crate::bundle::ArgumentBundle;
use crate::error::FatalError;
use crate::locator;
use crate::site::SiteContext;

/// Serve previously built Gatsby site.
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// Set host. Defaults to localhost
    #[arg(short = 'H', long, default_value = "localhost")]
    pub host: String,

    /// Set port. Defaults to 8000
    #[arg(short = 'p', long, default_value = "8000")]
    pub port: String,

    /// Open the site in your browser for you.
    #[arg(short = 'o', long)]
    pub open: bool,
}

impl ServeCommand {
    pub async fn execute(&self, site: &SiteContext) -> Result<(), FatalError> {
        let command = locator::require_local_command(site, "serve")?;
        let bundle = ArgumentBundle::build(self.flags(), site);
        command.invoke(&bundle).await?;
        Ok(())
    }

    fn flags(&self) -> Map<String, Value> {
        let mut flags = Map::new();
        flags.insert("host".to_string(), json!(self.host));
        flags.insert("port".to_string(), json!(self.port));
        flags.insert("open".to_string(), json!(self.open));
        flags
    }
}
