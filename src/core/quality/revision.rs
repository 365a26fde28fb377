use super::checks::{has_second_person, step_marker};
use crate::core::content::{ContentTables, enforce_length, replace_words};
use crate::core::decision::{ContentDraft, ContentFormat};
use crate::core::signals::LengthLimits;

/// The single bounded rewrite applied to a draft that scored low on vibe.
pub struct Reviser<'a> {
    tables: &'a ContentTables,
    ellipsis: &'a str,
}

impl<'a> Reviser<'a> {
    pub fn new(tables: &'a ContentTables, ellipsis: &'a str) -> Self {
        Self { tables, ellipsis }
    }

    pub fn revise(
        &self,
        draft: &ContentDraft,
        format: ContentFormat,
        limits: &LengthLimits,
    ) -> ContentDraft {
        let mut revised = draft.clone();
        for tweet in &mut revised.tweets {
            let stripped = strip_step_markers(&tweet.text);
            tweet.text = replace_words(&stripped, &self.tables.clinical_substitutions);
        }

        if let Some(lead) = revised.tweets.first_mut()
            && !has_second_person(&lead.text)
        {
            lead.text = format!("{} {}", self.tables.second_person_lead, lead.text);
        }

        let ceiling = limits.ceiling_for(format, revised.tweets.len());
        for tweet in &mut revised.tweets {
            tweet.text = enforce_length(&tweet.text, ceiling, self.ellipsis);
        }
        revised.renumber();
        revised
    }
}

fn strip_step_markers(text: &str) -> String {
    let stripped = step_marker().replace_all(text, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
