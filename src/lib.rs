//! Glossa Library
//!
//! Locale catalogues with caching, fallback resolution, pluralization and
//! message indexing, plus the `glossa` command-line tool built on top.
//!
//! ## Usage
//!
//! ```bash
//! glossa locales                                   # List locales
//! glossa --locale ru trans "Hello {name}" -p name=Ann
//! glossa choice "{n} dog|{n} dogs" 2220            # 2,220 dogs
//! glossa index manifest.yaml --dump locale/en
//! ```
//!
//! ## Library
//!
//! ```
//! use std::rc::Rc;
//!
//! use glossa::cache::MemoryCache;
//! use glossa::catalogue::{CatalogueData, CatalogueManager, StaticLoader};
//! use glossa::config::TranslatorConfig;
//! use glossa::translator::{Params, Translator};
//!
//! let mut messages = CatalogueData::new();
//! messages.entry("messages".into()).or_default().insert("Hello".into(), "Привет".into());
//!
//! let loader = StaticLoader::new()
//!     .with_catalogue("en", CatalogueData::new())
//!     .with_catalogue("ru", messages);
//! let manager = CatalogueManager::new(Box::new(loader), Rc::new(MemoryCache::new()));
//!
//! let config = TranslatorConfig::builder().locale("ru").build();
//! let translator = Translator::new(config, Rc::new(manager))?;
//! assert_eq!(translator.trans("Hello", &Params::new(), None, None)?, "Привет");
//! # Ok::<(), glossa::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod catalogue;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod formats;
pub mod indexer;
pub mod matcher;
pub mod output;
pub mod translator;

pub use cli::Cli;
pub use error::{Error, Result};

/// CLI version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the CLI with the given arguments.
///
/// This is the main entry point for the CLI, parsing arguments and
/// dispatching to the appropriate command handler.
pub fn run(args: Vec<String>) -> Result<()> {
    use clap::Parser;

    let cli_args = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) => {
            // Print clap error (includes help/version)
            e.print().ok();
            use clap::error::ErrorKind;
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => return Ok(()),
                _ => return Err(Error::other("")),
            }
        },
    };

    if cli_args.debug {
        init_logging();
    }

    // Completion scripts need neither configuration nor catalogues.
    if let cli::Commands::Completion { shell } = &cli_args.command {
        commands::completion(shell);
        return Ok(());
    }

    let ctx = context::Context::from_cli(&cli_args)?;
    commands::execute(&ctx, &cli_args.command)
}

/// Initialize tracing/logging for debug mode.
fn init_logging() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("glossa=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}
