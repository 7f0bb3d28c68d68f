//! `gatsby new` - scaffold a fresh site from a starter.
//!
//! The one command that never touches the local installation: it always
//! hands off to the scaffolding collaborator, local site or not.

use clap::Args;

use crate::error::FatalError;
use crate::scaffold::{self, StarterOptions};

/// Starter cloned when none is named.
pub const DEFAULT_STARTER: &str = "gatsbyjs/gatsby-starter-default";

/// Create new Gatsby project.
#[derive(Args, Debug)]
pub struct NewCommand {
    /// Directory to create the site in
    #[arg(value_name = "ROOT_PATH")]
    pub root_path: Option<String>,

    /// Starter to clone: owner/repository shorthand or a full git URL
    #[arg(value_name = "STARTER", default_value = DEFAULT_STARTER)]
    pub starter: String,
}

impl NewCommand {
    pub async fn execute(&self) -> Result<(), FatalError> {
        scaffold::init_starter(
            &self.starter,
            StarterOptions {
                root_path: self.root_path.clone(),
            },
        )
        .await?;
        Ok(())
    }
}
