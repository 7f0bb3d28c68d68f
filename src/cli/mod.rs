//! Command-line interface for the Gatsby CLI
//!
//! Registers the fixed command set with its flag schemas and drives each
//! invocation through site detection, local-command resolution, argument
//! bundling, and delegation:
//! - `develop`: local development server
//! - `build`: production build
//! - `serve`: serve a built site
//! - `new`: scaffold a project from a starter

mod build;
mod develop;
mod new;
mod serve;

use std::env;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

pub use build::BuildCommand;
pub use develop::DevelopCommand;
pub use new::NewCommand;
pub use serve::ServeCommand;

use crate::error::FatalError;
use crate::site::SiteContext;

/// Build blazing fast, modern apps and websites
#[derive(Parser, Debug)]
#[command(name = "gatsby")]
#[command(author, about, long_about = None)]
#[command(version, disable_version_flag = true)]
#[command(override_usage = "gatsby <command> [options]")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Turn on verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Show version number
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start development server. Watches files, rebuilds, and hot reloads
    /// if something changes
    Develop(DevelopCommand),

    /// Build a Gatsby project.
    Build(BuildCommand),

    /// Serve previously built Gatsby site.
    Serve(ServeCommand),

    /// Create new Gatsby project.
    New(NewCommand),
}

impl Cli {
    /// Execute the matched command.
    ///
    /// The site context is computed exactly once here and handed to the
    /// command by reference; nothing downstream re-reads the manifest.
    pub async fn execute(&self) -> Result<(), FatalError> {
        let directory = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let site = SiteContext::detect(&directory);

        match &self.command {
            Some(Commands::Develop(cmd)) => cmd.execute(&site).await,
            Some(Commands::Build(cmd)) => cmd.execute(&site).await,
            Some(Commands::Serve(cmd)) => cmd.execute(&site).await,
            Some(Commands::New(cmd)) => cmd.execute().await,
            None => Err(FatalError::NoCommandMatched),
        }
    }
}
