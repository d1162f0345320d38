//! Message indexing command.

use std::path::Path;

use serde::Serialize;

use super::catalogue::write_catalogue;
use crate::catalogue::normalize_locale;
use crate::context::Context;
use crate::error::Result;
use crate::indexer::{IndexStats, Indexer, SourceManifest};

#[derive(Debug, Serialize)]
struct IndexReport {
    locale: String,
    #[serde(flatten)]
    stats: IndexStats,
    saved: bool,
}

/// Index a source manifest into the active locale and save the catalogue.
///
/// With `dump` set, the resulting catalogue is also written as one file per
/// domain in `format`.
pub fn index(
    ctx: &Context,
    manifest: &Path,
    dry_run: bool,
    dump: Option<&Path>,
    format: &str,
) -> Result<()> {
    let manifest = SourceManifest::load(manifest)?;
    let locale = normalize_locale(ctx.config.default_locale());
    let shared = ctx.catalogues.load(&locale)?;

    let mut indexer = Indexer::new(&ctx.config, shared.borrow().clone());
    indexer.index_classes(&manifest);
    indexer.index_invocations(&manifest);
    let stats = indexer.stats();

    if !dry_run {
        *shared.borrow_mut() = indexer.into_catalogue();
        ctx.catalogues.save(&locale)?;

        if let Some(dir) = dump {
            let dumper = ctx.config.dumper(format)?;
            let rows = write_catalogue(&shared.borrow(), dir, dumper.as_ref())?;
            ctx.output.info(&format!("Wrote {} file(s) to {}", rows.len(), dir.display()));
        } else if ctx.config.cache_directory.is_none() {
            ctx.output.warn("No cache directory configured; use --dump to keep indexed messages.");
        }
    }

    ctx.output.value(&IndexReport { locale: locale.clone(), stats, saved: !dry_run })?;
    ctx.output.success(&format!(
        "Indexed {} message(s) into '{}', {} new",
        stats.found, locale, stats.registered
    ));
    Ok(())
}
