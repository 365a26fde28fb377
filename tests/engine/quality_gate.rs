use std::sync::Arc;

use rand::RngCore;

use super::snapshot_fixtures::{decide_seeded, engine, postable_snapshot};
use postcraft::core::content::TextSynthesizer;
use postcraft::core::decision::{ContentDecision, ContentDraft, TweetSegment};
use postcraft::core::quality::{QualityGate, ValueSignals};
use postcraft::core::signals::SignalSnapshot;
use postcraft::{Config, EngineError};

struct Robotic;

impl TextSynthesizer for Robotic {
    fn name(&self) -> &str {
        "robotic"
    }

    fn synthesize(
        &self,
        decision: &ContentDecision,
        _snapshot: &SignalSnapshot,
        _rng: &mut dyn RngCore,
    ) -> Result<ContentDraft, EngineError> {
        let text = "AI protocol. Step 1: utilize cold water. Step 2: commence walking. Step 3: rest";
        Ok(ContentDraft {
            tweets: (1..=decision.n_tweets)
                .map(|i| TweetSegment::new(i, text))
                .collect(),
            ..ContentDraft::default()
        })
    }
}

#[test]
fn check_describes_the_revised_draft() {
    let config = Config::default();
    let engine = engine().with_synthesizer(Arc::new(Robotic));
    let snapshot = postable_snapshot();
    let record = decide_seeded(&engine, &snapshot, 6);

    assert!(record.post_now);
    assert!(record.revised);
    let lead = record.draft.lead_text();
    assert!(lead.starts_with("Here's one for you:"));
    assert!(!lead.to_lowercase().contains("step 1:"));
    assert!(lead.contains("use cold water"));
    assert!(lead.contains("start walking"));

    let signals = ValueSignals::new(&config.tables.value_signal_patterns).unwrap();
    let gate = QualityGate::new(
        &config.quality,
        &config.tables,
        &signals,
        &config.content.ellipsis,
    );
    let recheck = gate.evaluate(&record.draft, record.decision.format, &snapshot);
    assert_eq!(record.quality, recheck);
}

#[test]
fn revision_happens_at_most_once() {
    let engine = engine().with_synthesizer(Arc::new(Robotic));
    let record = decide_seeded(&engine, &postable_snapshot(), 9);
    // One pass adds the second-person lead exactly once.
    assert_eq!(record.draft.lead_text().matches("Here's one for you:").count(), 1);
    assert!(record.quality.human_vibe_score < 8.0);
}

#[test]
fn template_drafts_keep_vibe_or_are_marked_revised() {
    let engine = engine();
    let snapshot = postable_snapshot();
    for seed in 0..30 {
        let record = decide_seeded(&engine, &snapshot, seed);
        assert!(record.post_now);
        assert!(record.quality.length_ok);
        if !record.revised {
            assert!(record.quality.human_vibe_score >= 8.0);
        }
    }
}
