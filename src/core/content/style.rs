use std::collections::BTreeMap;
use std::sync::LazyLock;

use rand::{Rng, RngCore};
use regex::Regex;

use super::slots::capitalize_first;
use super::tables::ContentTables;
use crate::core::signals::StyleConfig;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!](?:\s|$)").expect("sentence-end pattern is valid"));

static ANY_SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?](?:\s|$)").expect("sentence-end pattern is valid"));

/// Bernoulli trial that tolerates out-of-range probabilities.
pub(crate) fn chance(rng: &mut dyn RngCore, p: f64) -> bool {
    p.is_finite() && p > 0.0 && rng.random_bool(p.min(1.0))
}

/// Post-fill stylistic jitter: opening swap, then hedging, then question
/// reframing. The three trials always run in this order.
pub struct StyleJitter<'a> {
    tables: &'a ContentTables,
}

impl<'a> StyleJitter<'a> {
    pub fn new(tables: &'a ContentTables) -> Self {
        Self { tables }
    }

    pub fn apply(&self, text: &str, style: &StyleConfig, rng: &mut dyn RngCore) -> String {
        let mut out = text.to_string();
        if chance(rng, style.style_jitter) {
            out = self.swap_opening(&out);
        }
        if chance(rng, style.hedge_prob) {
            out = self.hedge(&out);
        }
        if chance(rng, style.question_prob) && !out.contains('?') {
            out = self.as_question(&out);
        }
        out
    }

    pub fn swap_opening(&self, text: &str) -> String {
        let trimmed = text.trim_start();
        let first = trimmed.split_whitespace().next().unwrap_or_default();
        match self.tables.opening_substitutions.get(first) {
            Some(replacement) => format!("{replacement}{}", &trimmed[first.len()..]),
            None => text.to_string(),
        }
    }

    /// Soften absolute wording. A word that opens a question is left alone so
    /// "Will you try it?" keeps its modal.
    pub fn hedge(&self, text: &str) -> String {
        replace_words_unless(text, &self.tables.hedge_substitutions, opens_question)
    }

    /// Turn the first sentence into a question led by the configured phrase.
    pub fn as_question(&self, text: &str) -> String {
        let trimmed = text.trim();
        let (first, rest) = match SENTENCE_END.find(trimmed) {
            Some(m) => (&trimmed[..m.start()], &trimmed[m.end()..]),
            None => (trimmed, ""),
        };
        let body = lowercase_first(first.trim());
        let question = format!("{} {body}?", self.tables.question_lead);
        if rest.trim().is_empty() {
            question
        } else {
            format!("{question} {}", rest.trim())
        }
    }
}

/// Whole-word, case-insensitive substitution that keeps a leading capital.
pub(crate) fn replace_words(text: &str, substitutions: &BTreeMap<String, String>) -> String {
    replace_words_unless(text, substitutions, |_, _| false)
}

fn replace_words_unless(
    text: &str,
    substitutions: &BTreeMap<String, String>,
    skip: impl Fn(&str, regex::Match<'_>) -> bool,
) -> String {
    let mut out = text.to_string();
    for (from, to) in substitutions {
        let Ok(pattern) = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(from))) else {
            continue;
        };
        let current = out;
        out = pattern
            .replace_all(&current, |caps: &regex::Captures<'_>| match caps.get(0) {
                Some(m) if skip(&current, m) => m.as_str().to_string(),
                _ if caps[0].starts_with(char::is_uppercase) => capitalize_first(to),
                _ => to.clone(),
            })
            .into_owned();
    }
    out
}

/// Whether `word` is the first word of a sentence that ends in `?`.
fn opens_question(text: &str, word: regex::Match<'_>) -> bool {
    let before = text[..word.start()].trim_end();
    let at_sentence_start = before.is_empty() || before.ends_with(['.', '!', '?']);
    at_sentence_start
        && ANY_SENTENCE_END
            .find(&text[word.end()..])
            .is_some_and(|end| end.as_str().starts_with('?'))
}

/// Lowercase the leading letter unless the first word is "I" or an acronym.
fn lowercase_first(text: &str) -> String {
    let first_word = text.split_whitespace().next().unwrap_or_default();
    let keep = first_word == "I"
        || first_word.starts_with("I'")
        || (first_word.chars().count() > 1 && first_word.chars().all(|c| !c.is_lowercase()));
    if keep {
        return text.to_string();
    }
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
