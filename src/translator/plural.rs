//! Plural form selection.
//!
//! A plural template lists its forms separated by `|`:
//!
//! ```text
//! {n} dog|{n} dogs
//! {0} no dogs|{1} one dog|]1,Inf[ {n} dogs
//! one: {n} dog|many: {n} dogs
//! ```
//!
//! Forms prefixed with an interval (`{0}`, `{1,2}`, `[3,10]`, `]10,Inf[`) are
//! picked when the number falls inside the interval. The remaining forms are
//! positional and indexed by the locale's [`PluralRule`]; an optional
//! `word:` label in front of a positional form is dropped.

use crate::error::{Error, Result};

/// Maps a locale and a count to the index of a plural form.
pub trait PluralRule {
    /// Index of the plural form to use for `number` in `locale`.
    fn form_index(&self, locale: &str, number: i64) -> usize;
}

/// Built-in plural rules for common languages.
///
/// Unknown languages use the Germanic rule (`1` is singular, anything else
/// plural).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPluralRules;

impl PluralRule for DefaultPluralRules {
    fn form_index(&self, locale: &str, number: i64) -> usize {
        let locale = locale.to_lowercase();
        let lang = locale.split(['-', '_']).next().unwrap_or(&locale);
        let n = number.unsigned_abs();
        let n10 = n % 10;
        let n100 = n % 100;

        match lang {
            "ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms" | "tr" | "fa" | "ka" => 0,

            "fr" => usize::from(n > 1),

            "pt" if locale == "pt_br" || locale == "pt-br" => usize::from(n > 1),

            "ru" | "uk" | "be" | "sr" | "hr" | "bs" => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if (2..=4).contains(&n10) && !(10..20).contains(&n100) {
                    1
                } else {
                    2
                }
            },

            "pl" => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&n10) && !(10..20).contains(&n100) {
                    1
                } else {
                    2
                }
            },

            "cs" | "sk" => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },

            "sl" => match n100 {
                1 => 0,
                2 => 1,
                3 | 4 => 2,
                _ => 3,
            },

            "ga" => match n {
                1 => 0,
                2 => 1,
                3..=6 => 2,
                7..=10 => 3,
                _ => 4,
            },

            "ar" => match n {
                0 => 0,
                1 => 1,
                2 => 2,
                _ if (3..=10).contains(&n100) => 3,
                _ if n100 >= 11 => 4,
                _ => 5,
            },

            _ => usize::from(n != 1),
        }
    }
}

/// Choose the form of `template` to use for `number` in `locale`.
pub fn choose(template: &str, number: i64, locale: &str, rules: &dyn PluralRule) -> Result<String> {
    let parts: Vec<&str> = template.split('|').collect();
    let mut positional = Vec::new();

    for part in &parts {
        match parse_interval(part) {
            Some((interval, message)) => {
                if interval.contains(number as f64) {
                    return Ok(message.to_string());
                }
            },
            None => positional.push(strip_label(part)),
        }
    }

    let index = rules.form_index(locale, number);
    match positional.get(index) {
        Some(form) => Ok((*form).to_string()),
        None if parts.len() == 1 && !positional.is_empty() => Ok(positional[0].to_string()),
        None => Err(Error::pluralization(format!(
            "Unable to choose a translation for \"{template}\" with locale \"{locale}\" for \
             value \"{number}\". Double check that this translation has the correct plural \
             options (e.g. \"There is one apple|There are {{n}} apples\")."
        ))),
    }
}

/// Drop a leading `word:` label from a positional form.
fn strip_label(part: &str) -> &str {
    let trimmed = part.trim_start();
    if let Some((label, rest)) = trimmed.split_once(':')
        && !label.is_empty()
        && label.chars().all(|c| c.is_alphanumeric() || c == '_')
    {
        return rest.trim_start();
    }
    part
}

/// Numeric range an explicit form applies to.
#[derive(Debug, Clone, PartialEq)]
enum Interval {
    Set(Vec<f64>),
    Range { start: f64, start_inclusive: bool, end: f64, end_inclusive: bool },
}

impl Interval {
    fn contains(&self, number: f64) -> bool {
        match self {
            Interval::Set(values) => values.iter().any(|v| (*v - number).abs() < f64::EPSILON),
            Interval::Range { start, start_inclusive, end, end_inclusive } => {
                let above = if *start_inclusive { number >= *start } else { number > *start };
                let below = if *end_inclusive { number <= *end } else { number < *end };
                above && below
            },
        }
    }
}

/// Split `{1,2} text` or `]1,Inf[ text` into its interval and message.
fn parse_interval(part: &str) -> Option<(Interval, &str)> {
    let trimmed = part.trim_start();
    let first = trimmed.chars().next()?;

    match first {
        '{' => {
            let close = trimmed.find('}')?;
            let values = trimmed[1..close]
                .split(',')
                .map(|v| v.trim().parse::<f64>().ok())
                .collect::<Option<Vec<_>>>()?;
            Some((Interval::Set(values), trimmed[close + 1..].trim_start()))
        },
        '[' | ']' => {
            let comma = trimmed.find(',')?;
            let close = comma + trimmed[comma..].find([']', '['])?;
            let start = parse_bound(&trimmed[1..comma])?;
            let end = parse_bound(&trimmed[comma + 1..close])?;
            let start_inclusive = first == '[';
            let end_inclusive = trimmed[close..].starts_with(']');
            Some((
                Interval::Range { start, start_inclusive, end, end_inclusive },
                trimmed[close + 1..].trim_start(),
            ))
        },
        _ => None,
    }
}

fn parse_bound(bound: &str) -> Option<f64> {
    match bound.trim() {
        "-Inf" | "-inf" => Some(f64::NEG_INFINITY),
        "Inf" | "+Inf" | "inf" | "+inf" | "*" => Some(f64::INFINITY),
        other => other.parse().ok(),
    }
}
