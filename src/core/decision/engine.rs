use std::sync::Arc;

use rand::RngCore;
use tracing::{debug, info, warn};

use super::types::{ContentDecision, ContentDraft, DecisionRecord, PacingDecision};
use crate::config::Config;
use crate::core::bandit::BanditSelector;
use crate::core::content::{TemplateSynthesizer, TextSynthesizer, enforce_length};
use crate::core::pacing::{PROCESSING_ERROR_REASON, PacingModel, PacingOutcome, TopicMatcher};
use crate::core::quality::{QualityGate, ValueSignals};
use crate::core::signals::SignalSnapshot;
use crate::core::trends::TopicRanker;
use crate::error::{EngineError, PostcraftError};

/// Orchestrates one decision: validate, pace, rank and sample, synthesize,
/// gate, record.
///
/// Holds only immutable configuration, so one engine can serve any number of
/// snapshots concurrently.
pub struct DecisionEngine {
    config: Config,
    signals: ValueSignals,
    topics: TopicMatcher,
    synthesizer: Arc<dyn TextSynthesizer>,
}

impl DecisionEngine {
    /// Rejects configs that fail `Config::validate`, so `decide` never sees
    /// an empty pool or an inverted range.
    pub fn new(config: &Config) -> Result<Self, PostcraftError> {
        config.validate()?;
        let signals = ValueSignals::new(&config.tables.value_signal_patterns)?;
        let topics = TopicMatcher::new(&config.tables)?;
        let synthesizer =
            TemplateSynthesizer::new(config.tables.clone(), config.content.clone())?;
        Ok(Self {
            config: config.clone(),
            signals,
            topics,
            synthesizer: Arc::new(synthesizer),
        })
    }

    /// Swap the text source without touching the decision logic.
    #[must_use]
    pub fn with_synthesizer(mut self, synthesizer: Arc<dyn TextSynthesizer>) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    pub fn generator(&self) -> &str {
        self.synthesizer.name()
    }

    /// Decide from raw snapshot JSON. Text that does not parse into a
    /// snapshot holds exactly like a snapshot that fails validation.
    pub fn decide_json(&self, raw: &str, rng: &mut dyn RngCore) -> DecisionRecord {
        match serde_json::from_str::<SignalSnapshot>(raw) {
            Ok(snapshot) => self.decide(&snapshot, rng),
            Err(e) => self.reject(&EngineError::invalid("snapshot", e.to_string())),
        }
    }

    /// Produce a well-formed record for any snapshot. Errors never escape:
    /// bad input holds with the validation message, any later failure holds
    /// with the processing-error reason.
    pub fn decide(&self, snapshot: &SignalSnapshot, rng: &mut dyn RngCore) -> DecisionRecord {
        if let Err(e) = snapshot.validate() {
            return self.reject(&e);
        }

        let pacing = PacingModel::new(&self.config.pacing, &self.topics).evaluate(snapshot);
        if !pacing.post_now {
            info!(
                reason = %pacing.reason,
                delay_min = pacing.delay_min,
                opportunity = pacing.pacing.opportunity,
                "holding"
            );
            return DecisionRecord::hold(pacing.reason, pacing.delay_min, pacing.pacing);
        }

        match self.compose(snapshot, &pacing, rng) {
            Ok(record) => {
                info!(
                    format = %record.decision.format,
                    topic = %record.decision.topic,
                    persona = %record.decision.persona,
                    forced = pacing.forced,
                    revised = record.revised,
                    hard_checks = record.quality.hard_checks_pass(),
                    "posting"
                );
                record
            }
            Err(e) if e.is_input_error() => {
                warn!(error = %e, "synthesizer rejected input; holding");
                DecisionRecord::hold(
                    e.to_string(),
                    self.config.pacing.error_delay_minutes,
                    pacing.pacing,
                )
            }
            Err(e) => {
                warn!(error = %e, "decision pipeline failed; holding");
                DecisionRecord::hold(
                    PROCESSING_ERROR_REASON,
                    self.config.pacing.error_delay_minutes,
                    pacing.pacing,
                )
            }
        }
    }

    fn reject(&self, error: &EngineError) -> DecisionRecord {
        warn!(error = %error, "snapshot rejected");
        DecisionRecord::hold(
            error.to_string(),
            self.config.pacing.error_delay_minutes,
            PacingDecision::default(),
        )
    }

    fn compose(
        &self,
        snapshot: &SignalSnapshot,
        pacing: &PacingOutcome,
        rng: &mut dyn RngCore,
    ) -> Result<DecisionRecord, EngineError> {
        let tables = &self.config.tables;
        let topic = TopicRanker::new(
            &self.topics,
            &tables.default_topic,
            self.config.pacing.news_discount,
        )
        .select(snapshot);
        let arms = BanditSelector::new(&self.config.bandit).choose(snapshot, rng);

        let decision = ContentDecision {
            format: arms.format,
            n_tweets: arms.n_tweets,
            topic: topic.phrase,
            pillar: topic.pillar,
            persona: arms.persona,
            hook: arms.hook,
            explore: topic.momentum > self.config.bandit.explore_momentum,
            pacing: pacing.pacing.clone(),
        };
        debug!(
            topic = %decision.topic,
            source = %topic.source,
            explore = decision.explore,
            "content decision"
        );

        let draft = self.synthesizer.synthesize(&decision, snapshot, rng)?;
        if draft.tweets.len() != decision.n_tweets {
            return Err(EngineError::Generation(format!(
                "{} produced {} segments, expected {}",
                self.synthesizer.name(),
                draft.tweets.len(),
                decision.n_tweets
            )));
        }
        let draft = self.clamp_lengths(draft, &decision, snapshot);

        let gate = QualityGate::new(
            &self.config.quality,
            tables,
            &self.signals,
            &self.config.content.ellipsis,
        );
        let outcome = gate.gate(draft, decision.format, snapshot);

        Ok(DecisionRecord {
            post_now: true,
            reason: pacing.reason.clone(),
            delay_min: 0,
            decision,
            draft: outcome.draft,
            quality: outcome.check,
            revised: outcome.revised,
            generator: self.synthesizer.name().to_string(),
        })
    }

    /// Length safety net for synthesizers that do not enforce ceilings.
    fn clamp_lengths(
        &self,
        mut draft: ContentDraft,
        decision: &ContentDecision,
        snapshot: &SignalSnapshot,
    ) -> ContentDraft {
        let ceiling = snapshot
            .limits
            .ceiling_for(decision.format, draft.tweets.len());
        for tweet in &mut draft.tweets {
            tweet.text = enforce_length(&tweet.text, ceiling, &self.config.content.ellipsis);
        }
        draft.renumber();
        draft
    }
}
