//! Gettext PO translation files.
//!
//! Supported subset:
//! - `msgid` / `msgstr` pairs with multi-line continuation strings
//! - `msgid_plural` / `msgstr[N]`; plural forms are joined by `|` into one
//!   message so they can be used with `trans_choice`
//! - C-style escapes (`\n`, `\t`, `\r`, `\"`, `\\`)
//!
//! The header entry (empty `msgid`), entries flagged `fuzzy`, and entries
//! with an empty translation are skipped. `msgctxt` is accepted but ignored.

use std::collections::BTreeMap;
use std::path::Path;

use super::{FileDumper, FileLoader, read_file, single_domain};
use crate::catalogue::{Catalogue, CatalogueData};
use crate::error::{Error, Result};

/// Loads gettext `.po` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoFileLoader;

impl FileLoader for PoFileLoader {
    fn load(&self, path: &Path, _locale: &str, domain: &str) -> Result<CatalogueData> {
        let contents = read_file(path)?;
        let messages = parse_po(&contents).map_err(|e| Error::format(path, e))?;
        Ok(single_domain(domain, messages))
    }
}

/// Field a continuation string is appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    None,
    Context,
    Id,
    Plural,
    Str(usize),
}

#[derive(Debug, Default)]
struct Entry {
    id: Option<String>,
    forms: Vec<String>,
    fuzzy: bool,
}

impl Entry {
    fn has_translation(&self) -> bool {
        !self.forms.is_empty()
    }

    fn form_mut(&mut self, index: usize) -> &mut String {
        if self.forms.len() <= index {
            self.forms.resize(index + 1, String::new());
        }
        &mut self.forms[index]
    }

    fn flush_into(self, messages: &mut BTreeMap<String, String>) {
        let Some(id) = self.id else {
            return;
        };
        if id.is_empty() || self.fuzzy || self.forms.iter().all(String::is_empty) {
            return;
        }
        messages.insert(id, self.forms.join("|"));
    }
}

/// Parse PO file contents into message id → translation.
pub fn parse_po(contents: &str) -> std::result::Result<BTreeMap<String, String>, String> {
    let mut messages = BTreeMap::new();
    let mut entry = Entry::default();
    let mut field = Field::None;

    for (number, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        let line_no = number + 1;

        if line.is_empty() {
            std::mem::take(&mut entry).flush_into(&mut messages);
            field = Field::None;
            continue;
        }

        if let Some(flags) = line.strip_prefix("#,") {
            if entry.has_translation() {
                std::mem::take(&mut entry).flush_into(&mut messages);
            }
            if flags.split(',').any(|flag| flag.trim() == "fuzzy") {
                entry.fuzzy = true;
            }
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix("msgctxt") {
            if entry.has_translation() {
                std::mem::take(&mut entry).flush_into(&mut messages);
            }
            unquote(rest.trim(), line_no)?;
            field = Field::Context;
        } else if let Some(rest) = line.strip_prefix("msgid_plural") {
            unquote(rest.trim(), line_no)?;
            field = Field::Plural;
        } else if let Some(rest) = line.strip_prefix("msgid") {
            if entry.has_translation() {
                std::mem::take(&mut entry).flush_into(&mut messages);
            }
            entry.id = Some(unquote(rest.trim(), line_no)?);
            field = Field::Id;
        } else if let Some(rest) = line.strip_prefix("msgstr[") {
            let (index, value) = rest
                .split_once(']')
                .ok_or_else(|| format!("line {line_no}: malformed msgstr index"))?;
            let index: usize = index
                .trim()
                .parse()
                .map_err(|_| format!("line {line_no}: invalid plural index '{index}'"))?;
            let text = unquote(value.trim(), line_no)?;
            entry.form_mut(index).push_str(&text);
            field = Field::Str(index);
        } else if let Some(rest) = line.strip_prefix("msgstr") {
            let text = unquote(rest.trim(), line_no)?;
            entry.form_mut(0).push_str(&text);
            field = Field::Str(0);
        } else if line.starts_with('"') {
            let text = unquote(line, line_no)?;
            match field {
                Field::Id => entry.id.get_or_insert_with(String::new).push_str(&text),
                Field::Str(index) => entry.form_mut(index).push_str(&text),
                Field::Context | Field::Plural => {},
                Field::None => {
                    return Err(format!("line {line_no}: string without a keyword"));
                },
            }
        } else {
            return Err(format!("line {line_no}: unexpected content '{line}'"));
        }
    }

    entry.flush_into(&mut messages);
    Ok(messages)
}

/// Strip the surrounding quotes of a PO string and resolve escapes.
fn unquote(quoted: &str, line_no: usize) -> std::result::Result<String, String> {
    let inner = quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .filter(|_| quoted.len() >= 2)
        .ok_or_else(|| format!("line {line_no}: expected a quoted string"))?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            },
            None => return Err(format!("line {line_no}: dangling escape")),
        }
    }
    Ok(out)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

/// Writes a domain as a gettext PO file.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoFileDumper;

impl FileDumper for PoFileDumper {
    fn extension(&self) -> &'static str {
        "po"
    }

    fn dump(&self, catalogue: &Catalogue, domain: &str) -> Result<String> {
        let mut out = String::new();
        out.push_str("msgid \"\"\nmsgstr \"\"\n");
        out.push_str("\"Content-Type: text/plain; charset=UTF-8\\n\"\n");
        out.push_str(&format!("\"Language: {}\\n\"\n", escape(catalogue.locale())));

        if let Some(messages) = catalogue.messages(domain) {
            for (id, value) in messages {
                out.push_str(&format!(
                    "\nmsgid \"{}\"\nmsgstr \"{}\"\n",
                    escape(id),
                    escape(value)
                ));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let po = r#"
msgid ""
msgstr ""
"Content-Type: text/plain; charset=UTF-8\n"

# translator comment
msgid "Welcome To Spiral"
msgstr "Добро пожаловать в Spiral Framework"

msgid "Twig Version"
msgstr "Twig версия"
"#;
        let messages = parse_po(po).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages["Welcome To Spiral"], "Добро пожаловать в Spiral Framework");
        assert_eq!(messages["Twig Version"], "Twig версия");
    }

    #[test]
    fn test_multiline_and_escapes() {
        let po = "msgid \"\"\n\"Hello \"\n\"\\\"World\\\"\"\nmsgstr \"Line\\nBreak\"\n";
        let messages = parse_po(po).unwrap();
        assert_eq!(messages["Hello \"World\""], "Line\nBreak");
    }

    #[test]
    fn test_plural_forms_join_with_pipe() {
        let po = r#"
msgid "{n} dog"
msgid_plural "{n} dogs"
msgstr[0] "{n} собака"
msgstr[1] "{n} собаки"
msgstr[2] "{n} собак"
"#;
        let messages = parse_po(po).unwrap();
        assert_eq!(messages["{n} dog"], "{n} собака|{n} собаки|{n} собак");
    }

    #[test]
    fn test_skips_fuzzy_and_untranslated() {
        let po = r#"
#, fuzzy
msgid "maybe"
msgstr "peut-être"

msgid "empty"
msgstr ""

msgctxt "menu"
msgid "open"
msgstr "ouvrir"
"#;
        let messages = parse_po(po).unwrap();
        assert!(!messages.contains_key("maybe"));
        assert!(!messages.contains_key("empty"));
        assert_eq!(messages["open"], "ouvrir");
    }

    #[test]
    fn test_entries_without_blank_separator() {
        let po = "msgid \"a\"\nmsgstr \"A\"\nmsgid \"b\"\nmsgstr \"B\"\n";
        let messages = parse_po(po).unwrap();
        assert_eq!(messages["a"], "A");
        assert_eq!(messages["b"], "B");
    }

    #[test]
    fn test_malformed() {
        assert!(parse_po("msgid hello\nmsgstr \"x\"").is_err());
        assert!(parse_po("garbage line").is_err());
        assert!(parse_po("\"orphan\"").is_err());
    }

    #[test]
    fn test_dump_round_trips_through_parser() {
        let mut catalogue = Catalogue::new("ru");
        catalogue.set("views", "Say \"hi\"", "Скажи \"привет\"\n");
        let out = PoFileDumper.dump(&catalogue, "views").unwrap();
        assert!(out.contains("\"Language: ru\\n\"\n\nmsgid \"Say \\\"hi\\\"\"\n"));
        let messages = parse_po(&out).unwrap();
        assert_eq!(messages["Say \"hi\""], "Скажи \"привет\"\n");
    }
}
