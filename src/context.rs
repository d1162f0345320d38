//! Command execution context.

use std::rc::Rc;

use crate::cache::{CatalogueCache, FileCache, NullCache};
use crate::catalogue::{CatalogueManager, DirectoryLoader};
use crate::cli::Cli;
use crate::config::TranslatorConfig;
use crate::error::Result;
use crate::output::Output;
use crate::translator::Translator;

/// Everything a command needs: the effective configuration, the catalogue
/// manager built from it and the output writer.
#[derive(Debug)]
pub struct Context {
    /// Effective configuration after CLI overrides.
    pub config: TranslatorConfig,

    /// Catalogues of the configured locales directory.
    pub catalogues: Rc<CatalogueManager>,

    /// Output configuration.
    pub output: Output,
}

impl Context {
    /// Create a context for a configuration.
    ///
    /// Catalogues are cached on disk when `cache_directory` is set.
    pub fn new(config: TranslatorConfig, output: Output) -> Result<Self> {
        let cache: Rc<dyn CatalogueCache> = match &config.cache_directory {
            Some(directory) => Rc::new(FileCache::new(directory.clone())),
            None => Rc::new(NullCache),
        };

        let loader = DirectoryLoader::new(config.directory.clone(), config.format_registry()?);
        let catalogues = CatalogueManager::new(Box::new(loader), cache)
            .with_cache_locales(config.cache_locales);

        Ok(Self { config, catalogues: Rc::new(catalogues), output })
    }

    /// Create a context from CLI options.
    ///
    /// `--directory` and `--locale` win over every configuration source.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = TranslatorConfig::load(cli.config.as_deref())?;
        if let Some(directory) = &cli.directory {
            config.directory.clone_from(directory);
        }
        if let Some(locale) = &cli.locale {
            config.locale.clone_from(locale);
        }
        config.validate()?;

        tracing::debug!(
            directory = %config.directory.display(),
            locale = %config.locale,
            "Resolved configuration"
        );

        let output = Output::from_cli(&cli.output, cli.quiet)?;
        Self::new(config, output)
    }

    /// Create a translator over the context's catalogues.
    ///
    /// Fails with [`crate::Error::UnknownLocale`] when the configured locale
    /// has no catalogue.
    pub fn translator(&self) -> Result<Translator> {
        Translator::new(self.config.clone(), Rc::clone(&self.catalogues))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("en")).unwrap();
        std::fs::write(dir.path().join("en/messages.yaml"), "hello: Hello\n").unwrap();
        dir
    }

    #[test]
    fn test_context_translates() {
        let dir = fixture();
        let config = TranslatorConfig::builder().directory(dir.path()).build();
        let ctx = Context::new(config, Output::default()).unwrap();

        assert_eq!(ctx.catalogues.locales().unwrap(), vec!["en".to_string()]);
        let translator = ctx.translator().unwrap();
        assert_eq!(
            translator.trans("hello", &crate::translator::Params::new(), None, None).unwrap(),
            "Hello"
        );
    }

    #[test]
    fn test_file_cache_is_used() {
        let dir = fixture();
        let cache = TempDir::new().unwrap();
        let config = TranslatorConfig::builder()
            .directory(dir.path())
            .cache_directory(cache.path())
            .build();
        let ctx = Context::new(config, Output::default()).unwrap();

        ctx.catalogues.locales().unwrap();
        assert!(cache.path().join("locales.json").exists());
    }

    #[test]
    fn test_unknown_locale() {
        let dir = fixture();
        let config = TranslatorConfig::builder().directory(dir.path()).locale("fr").build();
        let ctx = Context::new(config, Output::default()).unwrap();
        assert!(matches!(ctx.translator(), Err(crate::Error::UnknownLocale(_))));
    }
}
