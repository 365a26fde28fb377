use rand::RngCore;

use super::assembler::ContentAssembler;
use super::tables::ContentTables;
use crate::config::ContentConfig;
use crate::core::decision::{ContentDecision, ContentDraft};
use crate::core::quality::ValueSignals;
use crate::core::signals::SignalSnapshot;
use crate::error::EngineError;

/// Source of draft text for a content decision.
///
/// The engine only relies on the returned draft having `decision.n_tweets`
/// segments; length ceilings are re-checked by the quality gate either way.
pub trait TextSynthesizer: Send + Sync {
    fn name(&self) -> &str;

    fn synthesize(
        &self,
        decision: &ContentDecision,
        snapshot: &SignalSnapshot,
        rng: &mut dyn RngCore,
    ) -> Result<ContentDraft, EngineError>;
}

/// Fixed-table synthesizer backed by the content assembler.
pub struct TemplateSynthesizer {
    tables: ContentTables,
    config: ContentConfig,
    signals: ValueSignals,
}

impl TemplateSynthesizer {
    pub fn new(tables: ContentTables, config: ContentConfig) -> Result<Self, EngineError> {
        let signals = ValueSignals::new(&tables.value_signal_patterns)?;
        Ok(Self {
            tables,
            config,
            signals,
        })
    }
}

impl TextSynthesizer for TemplateSynthesizer {
    fn name(&self) -> &str {
        "template"
    }

    fn synthesize(
        &self,
        decision: &ContentDecision,
        snapshot: &SignalSnapshot,
        rng: &mut dyn RngCore,
    ) -> Result<ContentDraft, EngineError> {
        ContentAssembler::new(&self.tables, &self.config, &self.signals)
            .assemble(decision, snapshot, rng)
    }
}
