use tracing::debug;

use super::checks::{VibeScorer, ValueSignals, count_emoji, word_similarity};
use super::revision::Reviser;
use crate::config::QualityConfig;
use crate::core::content::ContentTables;
use crate::core::decision::{ContentDraft, ContentFormat, QualityCheck};
use crate::core::signals::SignalSnapshot;

/// A draft together with the check that describes it.
#[derive(Debug, Clone, PartialEq)]
pub struct GateOutcome {
    pub draft: ContentDraft,
    pub check: QualityCheck,
    pub revised: bool,
}

pub struct QualityGate<'a> {
    config: &'a QualityConfig,
    tables: &'a ContentTables,
    signals: &'a ValueSignals,
    ellipsis: &'a str,
}

impl<'a> QualityGate<'a> {
    pub fn new(
        config: &'a QualityConfig,
        tables: &'a ContentTables,
        signals: &'a ValueSignals,
        ellipsis: &'a str,
    ) -> Self {
        Self {
            config,
            tables,
            signals,
            ellipsis,
        }
    }

    /// Score a draft. Segment 1 stands in for the whole draft on every axis
    /// except length, which covers all segments.
    pub fn evaluate(
        &self,
        draft: &ContentDraft,
        format: ContentFormat,
        snapshot: &SignalSnapshot,
    ) -> QualityCheck {
        let ceiling = snapshot.limits.ceiling_for(format, draft.tweets.len());
        let lead = draft.lead_text();

        QualityCheck {
            length_ok: draft.tweets.iter().all(|t| t.char_len() <= ceiling),
            emoji_ok: count_emoji(lead) <= snapshot.style.emoji_max,
            no_hashtags: !snapshot.style.ban_hashtags || !lead.contains('#'),
            non_redundant: snapshot
                .recent_posts_text
                .iter()
                .all(|recent| word_similarity(lead, recent) <= self.config.redundancy_threshold),
            front_loaded: self
                .signals
                .is_front_loaded(lead, snapshot.limits.first_visible_chars),
            human_vibe_score: self.human_vibe_score(lead),
        }
    }

    pub fn human_vibe_score(&self, text: &str) -> f64 {
        VibeScorer::new(self.config, &self.tables.link_bait_phrases).score(text)
    }

    pub fn revise(
        &self,
        draft: &ContentDraft,
        format: ContentFormat,
        snapshot: &SignalSnapshot,
    ) -> ContentDraft {
        Reviser::new(self.tables, self.ellipsis).revise(draft, format, &snapshot.limits)
    }

    /// Evaluate, and when the vibe score is under threshold run exactly one
    /// revision and re-evaluate. There is never a second revision.
    pub fn gate(
        &self,
        draft: ContentDraft,
        format: ContentFormat,
        snapshot: &SignalSnapshot,
    ) -> GateOutcome {
        let check = self.evaluate(&draft, format, snapshot);
        if check.human_vibe_score >= self.config.vibe_threshold {
            return GateOutcome {
                draft,
                check,
                revised: false,
            };
        }

        let revised = self.revise(&draft, format, snapshot);
        let recheck = self.evaluate(&revised, format, snapshot);
        debug!(
            before = check.human_vibe_score,
            after = recheck.human_vibe_score,
            "draft revised once"
        );
        GateOutcome {
            draft: revised,
            check: recheck,
            revised: true,
        }
    }
}
