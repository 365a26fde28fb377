use serde::{Deserialize, Serialize};

use super::types::{ContentFormat, DecisionRecord, HookArchetype, Persona, Pillar};

/// Row the publishing collaborator stores next to a published post so later
/// engagement can be credited to the arms that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostAttribution {
    pub topic: String,
    pub hook_pattern: HookArchetype,
    pub format: ContentFormat,
    pub persona: Persona,
    pub pillar: Pillar,
    pub generator_used: String,
    pub n_tweets: usize,
    pub explore: bool,
    pub revised: bool,
}

impl DecisionRecord {
    /// `None` for hold records; there is nothing to attribute.
    pub fn attribution(&self) -> Option<PostAttribution> {
        if !self.post_now || self.draft.is_empty() {
            return None;
        }
        let decision = &self.decision;
        Some(PostAttribution {
            topic: decision.topic.clone(),
            hook_pattern: decision.hook,
            format: decision.format,
            persona: decision.persona,
            pillar: decision.pillar,
            generator_used: self.generator.clone(),
            n_tweets: decision.n_tweets,
            explore: decision.explore,
            revised: self.revised,
        })
    }
}
