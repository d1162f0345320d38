//! Command implementations for the Glossa CLI.
//!
//! Each submodule implements a group of related commands.

mod catalogue;
mod index;
mod translate;

pub use catalogue::{ExportRow, export, locales, reset, show, write_catalogue};
pub use index::index;
pub use translate::{choice, domain, trans};

use crate::cli::{Cli, Commands, Shell};
use crate::context::Context;
use crate::error::Result;

/// Execute a CLI command.
pub fn execute(ctx: &Context, command: &Commands) -> Result<()> {
    match command {
        Commands::Locales => locales(ctx),
        Commands::Show { locale, domain } => show(ctx, locale, domain.as_deref()),

        Commands::Trans { id, params, domain } => trans(ctx, id, params, domain.as_deref()),
        Commands::Choice { id, number, params, domain } => {
            choice(ctx, id, *number, params, domain.as_deref())
        },
        Commands::Domain { bundle } => domain(ctx, bundle),

        Commands::Index { manifest, dry_run, dump, format } => {
            index(ctx, manifest, *dry_run, dump.as_deref(), format)
        },
        Commands::Export { locale, dir, format } => export(ctx, locale, dir, format),
        Commands::Reset => reset(ctx),

        Commands::Completion { shell } => {
            completion(shell);
            Ok(())
        },
    }
}

/// Print a shell completion script to stdout.
pub fn completion(shell: &Shell) {
    use clap::CommandFactory;
    use clap_complete::{Generator, generate};

    fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
        let name = cmd.get_name().to_string();
        generate(generator, cmd, name, &mut std::io::stdout());
    }

    let mut cmd = Cli::command();
    match shell {
        Shell::Bash => print_completions(clap_complete::shells::Bash, &mut cmd),
        Shell::Zsh => print_completions(clap_complete::shells::Zsh, &mut cmd),
        Shell::Fish => print_completions(clap_complete::shells::Fish, &mut cmd),
        Shell::PowerShell => print_completions(clap_complete::shells::PowerShell, &mut cmd),
    }
}
