use rand::RngCore;
use rand::seq::{IndexedRandom, SliceRandom};
use tracing::debug;

use super::slots::{SlotFiller, SlotValues};
use super::style::{StyleJitter, chance};
use super::tables::ContentTables;
use crate::config::ContentConfig;
use crate::core::decision::{ContentDecision, ContentDraft, ContentFormat, TweetSegment};
use crate::core::quality::ValueSignals;
use crate::core::signals::SignalSnapshot;
use crate::error::EngineError;

/// Recorded on drafts that carry no call-to-action segment.
pub const NO_CTA_NOTE: &str = "no explicit cta";

/// Cut `text` to at most `ceiling` characters, ending in `ellipsis` when cut.
pub fn enforce_length(text: &str, ceiling: usize, ellipsis: &str) -> String {
    if text.chars().count() <= ceiling {
        return text.to_string();
    }
    let tail = ellipsis.chars().count();
    if ceiling <= tail {
        return text.chars().take(ceiling).collect();
    }
    let kept: String = text.chars().take(ceiling - tail).collect();
    format!("{}{ellipsis}", kept.trim_end())
}

fn pick<'t>(pool: &'t [String], what: &str, rng: &mut dyn RngCore) -> Result<&'t str, EngineError> {
    pool.choose(rng)
        .map(String::as_str)
        .ok_or_else(|| EngineError::Generation(format!("{what} pool is empty")))
}

/// Expands a `ContentDecision` into draft segments.
pub struct ContentAssembler<'a> {
    tables: &'a ContentTables,
    config: &'a ContentConfig,
    signals: &'a ValueSignals,
}

impl<'a> ContentAssembler<'a> {
    pub fn new(
        tables: &'a ContentTables,
        config: &'a ContentConfig,
        signals: &'a ValueSignals,
    ) -> Self {
        Self {
            tables,
            config,
            signals,
        }
    }

    pub fn assemble(
        &self,
        decision: &ContentDecision,
        snapshot: &SignalSnapshot,
        rng: &mut dyn RngCore,
    ) -> Result<ContentDraft, EngineError> {
        let filler = SlotFiller::new(self.tables);
        let values = filler.values(&decision.topic, decision.pillar, decision.persona);
        let lead = self.lead(decision, snapshot, &filler, &values, rng)?;

        let (texts, cta_note) = match decision.format {
            ContentFormat::Thread => self.thread(lead, decision, &filler, &values, rng)?,
            ContentFormat::Longform => (vec![self.longform(&lead, &filler, &values)?], None),
            ContentFormat::Single => (vec![lead], None),
            ContentFormat::Reply => (vec![self.reply(&lead, snapshot, rng)?], None),
            ContentFormat::Quote => {
                let opener = pick(&self.tables.quote_openers, "quote opener", rng)?;
                (vec![format!("{opener} {lead}")], None)
            }
        };

        let ceiling = snapshot.limits.ceiling_for(decision.format, texts.len());
        let tweets = texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                TweetSegment::new(i + 1, enforce_length(text, ceiling, &self.config.ellipsis))
            })
            .collect();

        let mut citations = Vec::new();
        if chance(rng, self.config.citation_prob)
            && let Some(source) = self.tables.citation_sources.choose(rng)
        {
            citations.push(source.clone());
        }

        let draft = ContentDraft {
            tweets,
            citations,
            cta_note: cta_note.unwrap_or_else(|| NO_CTA_NOTE.to_string()),
        };
        debug!(
            format = %decision.format,
            segments = draft.tweets.len(),
            citations = draft.citations.len(),
            "draft assembled"
        );
        Ok(draft)
    }

    /// Hook text: fill, jitter, then front-load a takeaway if the visible
    /// budget carries no value signal.
    fn lead(
        &self,
        decision: &ContentDecision,
        snapshot: &SignalSnapshot,
        filler: &SlotFiller<'_>,
        values: &SlotValues,
        rng: &mut dyn RngCore,
    ) -> Result<String, EngineError> {
        let template = pick(
            self.tables.hook_pool(decision.persona, decision.hook),
            "hook template",
            rng,
        )?;
        let filled = filler.fill(template, values)?;
        let styled = StyleJitter::new(self.tables).apply(&filled, &snapshot.style, rng);

        let budget = snapshot.limits.first_visible_chars;
        if self.signals.is_front_loaded(&styled, budget) {
            return Ok(styled);
        }
        let takeaway = pick(&self.tables.takeaway_templates, "takeaway template", rng)?;
        let takeaway = filler.fill(takeaway, values)?;
        debug!(budget, "hook not front-loaded; takeaway prepended");
        Ok(format!("{takeaway} {styled}"))
    }

    fn thread(
        &self,
        lead: String,
        decision: &ContentDecision,
        filler: &SlotFiller<'_>,
        values: &SlotValues,
        rng: &mut dyn RngCore,
    ) -> Result<(Vec<String>, Option<String>), EngineError> {
        let n = decision.n_tweets.max(1);
        let with_cta = n > 2;
        let body_count = if with_cta { n - 2 } else { n - 1 };

        let mut segments = Vec::with_capacity(n);
        segments.push(lead);

        if body_count > 0 {
            let mut pool = self.tables.thread_pool(decision.pillar, decision.persona);
            if pool.is_empty() {
                return Err(EngineError::Generation("thread body pool is empty".into()));
            }
            pool.shuffle(rng);
            for template in pool.iter().cycle().take(body_count) {
                segments.push(filler.fill(template, values)?);
            }
        }

        let mut cta_note = None;
        if with_cta {
            let cta = filler.fill(pick(&self.tables.cta_pool, "cta", rng)?, values)?;
            cta_note = Some(cta.clone());
            segments.push(cta);
        }
        Ok((segments, cta_note))
    }

    fn longform(
        &self,
        lead: &str,
        filler: &SlotFiller<'_>,
        values: &SlotValues,
    ) -> Result<String, EngineError> {
        if self.tables.longform_sections.is_empty() {
            return Err(EngineError::Generation("longform sections are empty".into()));
        }
        let mut parts = vec![lead.to_string()];
        for section in &self.tables.longform_sections {
            let body = filler.fill(&section.template, values)?;
            parts.push(format!("{}\n{body}", section.header));
        }
        Ok(parts.join("\n\n"))
    }

    fn reply(
        &self,
        lead: &str,
        snapshot: &SignalSnapshot,
        rng: &mut dyn RngCore,
    ) -> Result<String, EngineError> {
        let opener = pick(&self.tables.reply_openers, "reply opener", rng)?;
        let author = snapshot
            .reply_context
            .as_ref()
            .and_then(|ctx| ctx.author.as_deref())
            .map(|a| a.trim_start_matches('@'))
            .filter(|a| !a.is_empty());
        Ok(match author {
            Some(author) => format!("@{author} {opener} {lead}"),
            None => format!("{opener} {lead}"),
        })
    }
}
