#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;

use postcraft::Config;
use postcraft::core::decision::{DecisionEngine, DecisionRecord};
use postcraft::core::signals::{SignalSnapshot, Trend};

/// 15:00 UTC sits outside every peak, good and quiet window.
pub fn neutral_snapshot() -> SignalSnapshot {
    SignalSnapshot {
        now: Utc.with_ymd_and_hms(2026, 3, 3, 15, 0, 0).unwrap(),
        ..SignalSnapshot::default()
    }
}

/// Strong momentum, nothing recent, no caps in the way.
pub fn postable_snapshot() -> SignalSnapshot {
    let mut snapshot = neutral_snapshot();
    snapshot.metrics.epm_current = 2.0;
    snapshot.metrics.epm_ewma = 0.5;
    snapshot.recent.last_post_min_ago = Some(90.0);
    snapshot.recent.last_2h = 1;
    snapshot
}

/// Jitter off so template output is stable across seeds.
pub fn without_jitter(mut snapshot: SignalSnapshot) -> SignalSnapshot {
    snapshot.style.style_jitter = 0.0;
    snapshot.style.hedge_prob = 0.0;
    snapshot.style.question_prob = 0.0;
    snapshot
}

/// Momentum above baseline, long idle, nothing in the last two hours and
/// only an off-topic trend.
pub fn forced_post_snapshot() -> SignalSnapshot {
    let mut snapshot = neutral_snapshot();
    snapshot.metrics.epm_current = 1.2;
    snapshot.metrics.epm_ewma = 0.6;
    snapshot.recent.last_post_min_ago = Some(200.0);
    snapshot.recent.last_2h = 0;
    snapshot.caps.min_posts_per_2h = 1;
    snapshot.platform_trends = vec![
        Trend::new("celebrity wedding", 0.9)
            .with_volume(95.0)
            .with_category("entertainment"),
    ];
    snapshot
}

pub fn engine() -> DecisionEngine {
    DecisionEngine::new(&Config::default()).unwrap()
}

pub fn decide_seeded(engine: &DecisionEngine, snapshot: &SignalSnapshot, seed: u64) -> DecisionRecord {
    engine.decide(snapshot, &mut StdRng::seed_from_u64(seed))
}
