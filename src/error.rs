//! Fatal error taxonomy
//!
//! Every way a `gatsby` invocation can fail, each with its exact user-facing
//! message. All of these end the process through `reporter::panic`; the only
//! per-kind variation is whether top-level help is printed first.

use thiserror::Error;

/// Terminal failures of a single CLI invocation.
#[derive(Debug, Error)]
pub enum FatalError {
    /// A local-only command was run outside a recognized Gatsby site.
    #[error(
        "gatsby <{command}> can only be run for a gatsby site.\n\
         Either the current working directory does not contain a package.json \
         or 'gatsby' is not specified as a dependency"
    )]
    NotALocalSite { command: &'static str },

    /// No candidate module path resolved inside the local installation.
    #[error(
        "There was a problem loading the local {command} command. \
         Gatsby may not be installed."
    )]
    CommandNotFound { command: &'static str },

    /// A candidate resolved but could not be loaded.
    ///
    /// Deliberately shares its message with `CommandNotFound`; the underlying
    /// cause is attached for diagnostics.
    #[error(
        "There was a problem loading the local {command} command. \
         Gatsby may not be installed."
    )]
    CommandLoadError {
        command: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// The delegated command itself failed; forwarded verbatim.
    #[error(transparent)]
    Delegate(#[from] anyhow::Error),

    /// argv matched no registered command.
    #[error("Pass --help to see all available commands and options.")]
    NoCommandMatched,
}

impl FatalError {
    /// Whether top-level help is shown before panicking.
    pub fn shows_help(&self) -> bool {
        match self {
            FatalError::NotALocalSite { .. }
            | FatalError::CommandLoadError { .. }
            | FatalError::NoCommandMatched => true,
            FatalError::CommandNotFound { .. } | FatalError::Delegate(_) => false,
        }
    }
}
