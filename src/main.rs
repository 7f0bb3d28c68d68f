//! Gatsby CLI - the `gatsby` command
//!
//! A thin dispatcher: it decides whether an invocation should be handled by
//! the current site's own Gatsby installation (develop, build, serve) or by
//! a globally available fallback (new), and terminates the process with a
//! meaningful exit code either way.
//!
//! # Features
//! - Local site detection from package.json
//! - Command resolution against the site's node_modules (per-project versions)
//! - Starter scaffolding for fresh projects

use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod bundle;
mod cli;
mod error;
mod locator;
mod reporter;
mod resolver;
mod scaffold;
mod site;

use cli::Cli;

/// Initialize the logging/tracing system
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("gatsby=debug,gatsby_cli=debug"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("gatsby=info,gatsby_cli=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match cli.execute().await {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            if err.shows_help() {
                let mut cmd = Cli::command();
                eprintln!("{}", cmd.render_long_help());
            }
            reporter::panic(&err);
        }
    }
}
