//! Command-line argument parsing and command definitions.
//!
//! Uses clap with derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Glossa - locale catalogues and translation tooling
#[derive(Parser, Debug)]
#[command(name = "glossa")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Configuration file, merged over the user and project files
    #[arg(long, global = true, env = "GLOSSA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Locales root directory
    #[arg(long, global = true)]
    pub directory: Option<PathBuf>,

    /// Active locale
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Output format
    #[arg(
        short,
        long,
        global = true,
        default_value = "table",
        value_parser = ["table", "json", "yaml", "jsonl"]
    )]
    pub output: String,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List known locales with their domains and message counts
    Locales,

    /// Show the messages of a locale
    Show {
        /// Locale to show
        locale: String,

        /// Only show this domain
        #[arg(long)]
        domain: Option<String>,
    },

    /// Translate a message in the active locale
    Trans {
        /// Message id
        id: String,

        /// Placeholder value (key=value), may be repeated
        #[arg(long = "param", short = 'p', value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Translation domain
        #[arg(long)]
        domain: Option<String>,
    },

    /// Translate a plural message for a number
    Choice {
        /// Message id (forms separated by `|`)
        id: String,

        /// Number selecting the plural form
        #[arg(allow_negative_numbers = true)]
        number: i64,

        /// Placeholder value (key=value), may be repeated
        #[arg(long = "param", short = 'p', value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Translation domain
        #[arg(long)]
        domain: Option<String>,
    },

    /// Index messages from a source manifest into the active locale
    Index {
        /// Manifest file (YAML or JSON) describing classes and call-sites
        manifest: PathBuf,

        /// Report what would be indexed without saving
        #[arg(long)]
        dry_run: bool,

        /// Also write the catalogue under this locales root, one file per domain
        #[arg(long, value_name = "DIR")]
        dump: Option<PathBuf>,

        /// File format used with --dump
        #[arg(long, short, default_value = "yaml")]
        format: String,
    },

    /// Write the catalogue of a locale as one file per domain
    Export {
        /// Locale to export
        locale: String,

        /// Target locales root; files are written to <DIR>/<locale>/
        dir: PathBuf,

        /// File format
        #[arg(long, short, default_value = "yaml")]
        format: String,
    },

    /// Clear cached locales and catalogues
    Reset,

    /// Resolve the domain of a bundle name
    Domain {
        /// Bundle name (e.g. a module path or class name)
        bundle: String,
    },

    /// Generate shell completion script
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion.
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// `PowerShell`
    #[value(name = "powershell")]
    PowerShell,
}

/// Split `key=value` parameter arguments.
pub fn parse_params(raw: &[String]) -> crate::Result<Vec<(String, String)>> {
    raw.iter()
        .map(|param| {
            param
                .split_once('=')
                .map(|(key, value)| (key.trim().to_string(), value.to_string()))
                .filter(|(key, _)| !key.is_empty())
                .ok_or_else(|| {
                    crate::Error::invalid_arg(format!(
                        "Parameter '{param}' must have the form key=value"
                    ))
                })
        })
        .collect()
}
