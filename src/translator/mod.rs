//! Message translation.
//!
//! The [`Translator`] resolves a message through the active locale, then the
//! fallback locale, and finally registers it as its own translation when
//! auto-registration is enabled:
//!
//! ```text
//! trans("hello")
//!   ├─ ru/messages has "hello"?  → use it
//!   ├─ en/messages has "hello"?  → use it      (fallback)
//!   ├─ auto_register?            → en/messages["hello"] = "hello", save(en)
//!   └─ "hello"                                 (passthrough)
//! ```

mod params;
pub mod plural;

pub use params::{Param, Params, interpolate, interpolate_with};
pub use plural::{DefaultPluralRules, PluralRule};

use std::rc::Rc;

use crate::catalogue::{CatalogueManager, normalize_locale};
use crate::config::TranslatorConfig;
use crate::error::{Error, Result};

/// Opening delimiter of an indexable message.
pub const MESSAGE_PREFIX: &str = "[[";

/// Closing delimiter of an indexable message.
pub const MESSAGE_POSTFIX: &str = "]]";

/// Check if a string is wrapped in `[[` and `]]`.
pub fn is_message(string: &str) -> bool {
    string.len() >= MESSAGE_PREFIX.len() + MESSAGE_POSTFIX.len()
        && string.starts_with(MESSAGE_PREFIX)
        && string.ends_with(MESSAGE_POSTFIX)
}

/// Remove the `[[ ]]` delimiters from a message, if present.
pub fn strip_message(string: &str) -> &str {
    if is_message(string) {
        &string[MESSAGE_PREFIX.len()..string.len() - MESSAGE_POSTFIX.len()]
    } else {
        string
    }
}

/// Render an integer with `,` thousands separators.
pub fn format_number(number: i64) -> String {
    let digits = number.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if number < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Translates messages using catalogues from a [`CatalogueManager`].
pub struct Translator {
    config: TranslatorConfig,
    catalogues: Rc<CatalogueManager>,
    plural_rules: Box<dyn PluralRule>,
    locale: String,
}

impl Translator {
    /// Create a translator and activate the configured default locale.
    ///
    /// Fails with [`Error::UnknownLocale`] if the default locale has no
    /// catalogue.
    pub fn new(config: TranslatorConfig, catalogues: Rc<CatalogueManager>) -> Result<Self> {
        let locale = config.default_locale().to_string();
        let mut translator = Self {
            config,
            catalogues,
            plural_rules: Box::new(DefaultPluralRules),
            locale: String::new(),
        };
        translator.set_locale(&locale)?;
        Ok(translator)
    }

    /// Replace the plural rules.
    #[must_use]
    pub fn with_plural_rules(mut self, rules: Box<dyn PluralRule>) -> Self {
        self.plural_rules = rules;
        self
    }

    /// Switch the active locale, loading its catalogue.
    pub fn set_locale(&mut self, locale: &str) -> Result<()> {
        let locale = normalize_locale(locale);
        if !self.catalogues.has(&locale)? {
            return Err(Error::UnknownLocale(locale));
        }

        self.catalogues.load(&locale)?;
        tracing::debug!(locale = %locale, "Active locale changed");
        self.locale = locale;
        Ok(())
    }

    /// Active locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Translator configuration.
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Map a bundle name to its translation domain.
    pub fn resolve_domain(&self, bundle: &str) -> String {
        self.config.resolve_domain(bundle)
    }

    /// Catalogue manager backing this translator.
    pub fn catalogues(&self) -> &CatalogueManager {
        &self.catalogues
    }

    /// Translate a message and interpolate `params`.
    ///
    /// `domain` defaults to the configured default domain and `locale` to
    /// the active locale.
    pub fn trans(
        &self,
        id: &str,
        params: &Params,
        domain: Option<&str>,
        locale: Option<&str>,
    ) -> Result<String> {
        let domain = domain.unwrap_or(&self.config.default_domain);
        let locale = locale.unwrap_or(&self.locale);

        let (message, _) = self.resolve(locale, domain, id)?;
        Ok(interpolate(&message, params))
    }

    /// Translate a plural template and pick the form for `number`.
    ///
    /// The form is chosen with the plural rule of the locale the message was
    /// found in. Unless `params` defines `n`, `{n}` renders `number` with
    /// thousands separators.
    pub fn trans_choice(
        &self,
        id: &str,
        number: i64,
        params: &Params,
        domain: Option<&str>,
        locale: Option<&str>,
    ) -> Result<String> {
        let domain = domain.unwrap_or(&self.config.default_domain);
        let locale = locale.unwrap_or(&self.locale);

        let (message, found_in) = self.resolve(locale, domain, id)?;
        let form = plural::choose(&message, number, &found_in, self.plural_rules.as_ref())?;

        if params.contains_key("n") {
            Ok(interpolate(&form, params))
        } else {
            let params = params.clone().with("n", format_number(number));
            Ok(interpolate(&form, &params))
        }
    }

    /// Find a message, returning it with the locale it was resolved in.
    fn resolve(&self, locale: &str, domain: &str, id: &str) -> Result<(String, String)> {
        let catalogue = self.catalogues.get(locale)?;
        if let Ok(message) = catalogue.borrow().get(domain, id) {
            return Ok((message.to_string(), catalogue.borrow().locale().to_string()));
        }

        let fallback = normalize_locale(self.config.fallback_locale());
        let catalogue = self.catalogues.get(&fallback)?;
        if let Ok(message) = catalogue.borrow().get(domain, id) {
            return Ok((message.to_string(), fallback));
        }

        if self.config.auto_register {
            catalogue.borrow_mut().set(domain, id, id);
            self.catalogues.save(&fallback)?;
            tracing::debug!(locale = %fallback, domain = domain, id = id, "Registered message");
        }

        Ok((id.to_string(), fallback))
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("locale", &self.locale)
            .field("config", &self.config)
            .field("catalogues", &self.catalogues)
            .finish_non_exhaustive()
    }
}

/// Types that translate their own messages.
///
/// The domain is resolved from [`Translatable::bundle`], which defaults to
/// the implementing type's path.
///
/// ```
/// use glossa::translator::Translatable;
///
/// struct Dashboard;
/// impl Translatable for Dashboard {}
///
/// assert!(Dashboard.bundle().ends_with("Dashboard"));
/// ```
pub trait Translatable {
    /// Bundle name used to resolve the translation domain.
    fn bundle(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }

    /// Translate a message in this type's domain.
    ///
    /// `[[ ]]` delimiters around `message` are removed first.
    fn say(&self, translator: &Translator, message: &str, params: &Params) -> Result<String> {
        let domain = translator.resolve_domain(&self.bundle());
        translator.trans(strip_message(message), params, Some(&domain), None)
    }
}
