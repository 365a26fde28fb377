//! End-to-end decisions for the documented worked examples.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use super::snapshot_fixtures::{
    decide_seeded, engine, forced_post_snapshot, postable_snapshot, without_jitter,
};
use postcraft::EngineError;
use postcraft::core::content::TextSynthesizer;
use postcraft::core::decision::{ContentDecision, ContentDraft, TweetSegment};
use postcraft::core::signals::SignalSnapshot;

struct Canned(&'static str);

impl TextSynthesizer for Canned {
    fn name(&self) -> &str {
        "canned"
    }

    fn synthesize(
        &self,
        decision: &ContentDecision,
        _snapshot: &SignalSnapshot,
        _rng: &mut dyn RngCore,
    ) -> Result<ContentDraft, EngineError> {
        Ok(ContentDraft {
            tweets: (1..=decision.n_tweets)
                .map(|i| TweetSegment::new(i, self.0))
                .collect(),
            ..ContentDraft::default()
        })
    }
}

#[test]
fn forced_post_falls_back_to_default_topic() {
    let engine = engine();
    let snapshot = forced_post_snapshot();
    for seed in 0..10 {
        let record = decide_seeded(&engine, &snapshot, seed);
        assert!(record.post_now);
        assert!(
            record.reason.contains("minimum posting requirement"),
            "{}",
            record.reason
        );
        assert_eq!(record.decision.topic, "daily health habits");
        assert_eq!(record.draft.tweets.len(), record.decision.n_tweets);
    }
}

#[test]
fn overlap_with_recent_post_is_redundant() {
    let engine = engine();
    let first = decide_seeded(&engine, &postable_snapshot(), 21);
    assert!(first.post_now);

    let mut snapshot = postable_snapshot();
    snapshot.recent_posts_text = vec![first.draft.lead_text().to_string()];
    let second = decide_seeded(&engine, &snapshot, 21);

    assert_eq!(second.draft.lead_text(), first.draft.lead_text());
    assert!(!second.quality.non_redundant);
    assert!(first.quality.non_redundant);
}

#[test]
fn three_emoji_over_limit_fails_emoji_check() {
    let engine = engine().with_synthesizer(Arc::new(Canned(
        "Sleep 8 hours tonight 😴🌙✨. Will you try it?",
    )));
    let mut snapshot = postable_snapshot();
    snapshot.style.emoji_max = 1;
    let record = decide_seeded(&engine, &snapshot, 4);
    assert!(record.post_now);
    assert!(!record.quality.emoji_ok);
    assert!(record.quality.length_ok);
    assert!(record.quality.front_loaded);
    assert!(!record.revised);
}

#[test]
fn same_seed_same_record() {
    let engine = engine();
    let snapshot = postable_snapshot();
    assert_eq!(
        decide_seeded(&engine, &snapshot, 77),
        decide_seeded(&engine, &snapshot, 77)
    );
}

#[test]
fn attribution_follows_the_record() {
    let engine = engine();
    let record = decide_seeded(&engine, &without_jitter(postable_snapshot()), 3);
    let row = record.attribution().expect("posting record has attribution");
    assert_eq!(row.topic, record.decision.topic);
    assert_eq!(row.hook_pattern, record.decision.hook);
    assert_eq!(row.generator_used, "template");
    assert_eq!(row.n_tweets, record.draft.tweets.len());
}

#[test]
fn record_json_has_boundary_fields() {
    let record = decide_seeded(&engine(), &postable_snapshot(), 8);
    let value = serde_json::to_value(&record).unwrap();
    for field in ["post_now", "reason", "delay_min", "decision", "draft", "quality"] {
        assert!(value.get(field).is_some(), "missing {field}");
    }
    assert!(value["decision"]["pacing"]["opportunity"].is_number());
}

#[test]
fn mistyped_snapshot_json_holds_instead_of_failing() {
    let engine = engine();
    for raw in [
        r#"{"metrics": {"epm_current": "high"}}"#,
        r#"{"recent": {"last_day": -3}}"#,
        "not json",
    ] {
        let record = engine.decide_json(raw, &mut StdRng::seed_from_u64(1));
        assert!(!record.post_now);
        assert!(record.reason.starts_with("invalid input: snapshot"), "{}", record.reason);
        assert_eq!(record.delay_min, 30);
        assert!(record.draft.is_empty());
    }
}
