//! Catalogue inspection and export commands.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::catalogue::{Catalogue, normalize_locale};
use crate::context::Context;
use crate::error::Result;
use crate::formats::FileDumper;
use crate::output::Displayable;

#[derive(Debug, Clone, Serialize)]
struct LocaleRow {
    locale: String,
    domains: Vec<String>,
    messages: usize,
    active: bool,
}

impl Displayable for LocaleRow {
    fn table_row(&self) -> Vec<String> {
        let marker = if self.active { "*" } else { "" };
        vec![
            format!("{}{}", self.locale, marker),
            self.domains.join(", "),
            self.messages.to_string(),
        ]
    }

    fn table_headers() -> Vec<&'static str> {
        vec!["LOCALE", "DOMAINS", "MESSAGES"]
    }
}

#[derive(Debug, Clone, Serialize)]
struct MessageRow {
    domain: String,
    id: String,
    translation: String,
}

impl Displayable for MessageRow {
    fn table_row(&self) -> Vec<String> {
        vec![self.domain.clone(), self.id.clone(), self.translation.clone()]
    }

    fn table_headers() -> Vec<&'static str> {
        vec!["DOMAIN", "ID", "TRANSLATION"]
    }
}

/// A file written by an export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRow {
    /// Exported domain.
    pub domain: String,
    /// Written file.
    pub file: PathBuf,
    /// Number of messages in the file.
    pub messages: usize,
}

impl Displayable for ExportRow {
    fn table_row(&self) -> Vec<String> {
        vec![self.domain.clone(), self.file.display().to_string(), self.messages.to_string()]
    }

    fn table_headers() -> Vec<&'static str> {
        vec!["DOMAIN", "FILE", "MESSAGES"]
    }
}

/// List known locales.
pub fn locales(ctx: &Context) -> Result<()> {
    let locales = ctx.catalogues.locales()?;
    if locales.is_empty() {
        ctx.output.info(&format!("No locales found in {}", ctx.config.directory.display()));
        return Ok(());
    }

    let active = normalize_locale(ctx.config.default_locale());
    let mut rows = Vec::with_capacity(locales.len());
    for locale in locales {
        let catalogue = ctx.catalogues.load(&locale)?;
        let catalogue = catalogue.borrow();
        rows.push(LocaleRow {
            active: locale == active,
            domains: catalogue.domains().to_vec(),
            messages: catalogue.len(),
            locale,
        });
    }

    ctx.output.table(&rows)?;

    if !ctx.output.is_quiet() {
        ctx.output.info("");
        ctx.output.info("* = active locale");
    }

    Ok(())
}

/// Show the messages of a locale, optionally limited to one domain.
pub fn show(ctx: &Context, locale: &str, domain: Option<&str>) -> Result<()> {
    let catalogue = ctx.catalogues.load(locale)?;
    let catalogue = catalogue.borrow();

    let rows: Vec<MessageRow> = catalogue
        .domains()
        .iter()
        .filter(|name| domain.is_none_or(|domain| domain == name.as_str()))
        .filter_map(|name| catalogue.messages(name).map(|messages| (name, messages)))
        .flat_map(|(name, messages)| {
            messages.iter().map(move |(id, translation)| MessageRow {
                domain: name.clone(),
                id: id.clone(),
                translation: translation.clone(),
            })
        })
        .collect();

    if rows.is_empty() {
        ctx.output.info(&format!("No messages in locale '{}'", catalogue.locale()));
        return Ok(());
    }

    ctx.output.table(&rows)
}

/// Dump a locale into one file per domain.
pub fn export(ctx: &Context, locale: &str, dir: &Path, format: &str) -> Result<()> {
    let dumper = ctx.config.dumper(format)?;
    let catalogue = ctx.catalogues.load(locale)?;
    let rows = write_catalogue(&catalogue.borrow(), dir, dumper.as_ref())?;

    ctx.output.table(&rows)?;
    ctx.output.success(&format!(
        "Exported {} domain(s) of '{}' to {}",
        rows.len(),
        catalogue.borrow().locale(),
        dir.display()
    ));
    Ok(())
}

/// Clear cached locales and catalogues.
pub fn reset(ctx: &Context) -> Result<()> {
    ctx.catalogues.reset()?;

    match &ctx.config.cache_directory {
        Some(directory) => {
            ctx.output.success(&format!("Cleared catalogue cache in {}", directory.display()));
        },
        None => ctx.output.info("No cache directory configured, nothing to clear."),
    }
    Ok(())
}

/// Write every domain of a catalogue to `<root>/<locale>/<domain>.<extension>`.
///
/// The result can be read back with a directory loader rooted at `root`.
pub fn write_catalogue(
    catalogue: &Catalogue,
    root: &Path,
    dumper: &dyn FileDumper,
) -> Result<Vec<ExportRow>> {
    let dir = root.join(catalogue.locale());
    std::fs::create_dir_all(&dir)?;

    let mut rows = Vec::new();
    for domain in catalogue.domains() {
        let file = dir.join(format!("{domain}.{}", dumper.extension()));
        std::fs::write(&file, dumper.dump(catalogue, domain)?)?;
        tracing::debug!(domain = %domain, file = %file.display(), "Exported domain");

        rows.push(ExportRow {
            domain: domain.clone(),
            messages: catalogue.messages(domain).map_or(0, |messages| messages.len()),
            file,
        });
    }
    Ok(rows)
}
