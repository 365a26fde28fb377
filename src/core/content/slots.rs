use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tera::{Context, Tera};

use super::tables::ContentTables;
use crate::core::decision::{Persona, Pillar};
use crate::error::EngineError;

/// Named values available to templates for one draft.
pub type SlotValues = BTreeMap<String, String>;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{-?\s*([A-Za-z_][A-Za-z0-9_]*)").expect("placeholder pattern is valid")
});

/// Template slot-filling over the Tera engine.
///
/// Every placeholder a template names resolves to something: the pillar's
/// fact table first, then the per-slot fallback, then the generic fallback
/// phrase. Rendering therefore never fails on a missing variable.
pub struct SlotFiller<'a> {
    tables: &'a ContentTables,
}

impl<'a> SlotFiller<'a> {
    pub fn new(tables: &'a ContentTables) -> Self {
        Self { tables }
    }

    pub fn values(&self, topic: &str, pillar: Pillar, persona: Persona) -> SlotValues {
        let mut values = self.tables.facts_for(pillar).clone();
        values.insert("topic".into(), topic.to_string());
        values.insert("pillar".into(), pillar.to_string());
        values.insert("persona".into(), persona.to_string());
        values
    }

    pub fn fill(&self, template: &str, values: &SlotValues) -> Result<String, EngineError> {
        let mut context = Context::new();
        for (name, value) in values {
            context.insert(name.as_str(), value);
        }
        for capture in PLACEHOLDER.captures_iter(template) {
            let name = &capture[1];
            if !values.contains_key(name) {
                context.insert(name, self.fallback_for(name));
            }
        }

        let rendered = Tera::one_off(template, &context, false)?;
        Ok(tidy(&rendered))
    }

    fn fallback_for(&self, name: &str) -> &str {
        self.tables
            .slot_fallbacks
            .get(name)
            .map_or(self.tables.generic_fallback.as_str(), String::as_str)
    }
}

static PERIOD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.+").expect("period-run pattern is valid"));

/// Collapse whitespace, drop doubled periods and capitalize the first letter.
/// Ellipses (three or more periods) are left alone.
fn tidy(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let collapsed = PERIOD_RUN.replace_all(&collapsed, |caps: &regex::Captures<'_>| {
        if caps[0].len() == 2 {
            ".".to_string()
        } else {
            caps[0].to_string()
        }
    });
    capitalize_first(&collapsed.replace(" .", "."))
}

pub(crate) fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
