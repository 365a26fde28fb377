use super::snapshot_fixtures::{decide_seeded, engine, forced_post_snapshot, neutral_snapshot};
use postcraft::Config;
use postcraft::core::content::ContentTables;
use postcraft::core::pacing::{PacingModel, TopicMatcher};

#[test]
fn daily_cap_blocks_forced_post() {
    let mut snapshot = forced_post_snapshot();
    snapshot.recent.last_day = snapshot.caps.max_per_day;
    let record = decide_seeded(&engine(), &snapshot, 1);
    assert!(!record.post_now);
    assert!(record.reason.starts_with("cap reached"), "{}", record.reason);
    assert_eq!(record.delay_min, 15);
    assert!(record.draft.is_empty());
    assert!(record.decision.topic.is_empty());
}

#[test]
fn hourly_cap_blocks_strong_momentum() {
    let mut snapshot = neutral_snapshot();
    snapshot.metrics.epm_current = 5.0;
    snapshot.metrics.epm_ewma = 1.0;
    snapshot.recent.last_hour = snapshot.caps.max_per_hour;
    snapshot.recent.last_post_min_ago = Some(45.0);
    let record = decide_seeded(&engine(), &snapshot, 1);
    assert!(!record.post_now);
    assert!(record.reason.starts_with("cap reached"));
}

#[test]
fn min_gap_sets_advisory_delay() {
    let mut snapshot = neutral_snapshot();
    snapshot.metrics.epm_current = 5.0;
    snapshot.metrics.epm_ewma = 1.0;
    snapshot.recent.last_post_min_ago = Some(10.0);
    let record = decide_seeded(&engine(), &snapshot, 1);
    assert!(!record.post_now);
    assert_eq!(record.delay_min, 20);
    // Under the gap the fatigue penalty carries the +0.5 term.
    assert!(record.decision.pacing.fatigue_penalty >= 0.5);
}

#[test]
fn flat_momentum_waits() {
    let mut snapshot = neutral_snapshot();
    snapshot.recent.last_post_min_ago = Some(60.0);
    let record = decide_seeded(&engine(), &snapshot, 1);
    assert!(!record.post_now);
    assert!(record.reason.contains("below threshold"), "{}", record.reason);
    assert_eq!(record.delay_min, 15);
    assert!(record.decision.pacing.opportunity.abs() < 1e-9);
}

#[test]
fn quiet_hours_lower_opportunity_in_local_time() {
    let config = Config::default();
    let topics = TopicMatcher::new(&ContentTables::default()).unwrap();
    let model = PacingModel::new(&config.pacing, &topics);

    let mut snapshot = neutral_snapshot();
    // 15:00 UTC is 02:00 at UTC+11.
    snapshot.utc_offset_minutes = 11 * 60;
    let pacing = model.opportunity(&snapshot);
    assert!((pacing.opportunity + 0.2).abs() < 1e-9);
}

#[test]
fn forced_reason_survives_weak_momentum() {
    let mut snapshot = forced_post_snapshot();
    snapshot.metrics.epm_current = 0.0;
    snapshot.platform_trends.clear();
    let record = decide_seeded(&engine(), &snapshot, 2);
    assert!(record.post_now);
    assert!(record.reason.contains("minimum posting requirement"));
}

#[test]
fn thread_cooldown_adds_fatigue() {
    let mut snapshot = neutral_snapshot();
    snapshot.recent.last_post_min_ago = Some(60.0);
    snapshot.fatigue.thread_cooldown_remaining_min = 90;
    snapshot.fatigue.format_streak = 3;
    let record = decide_seeded(&engine(), &snapshot, 1);
    assert!((record.decision.pacing.fatigue_penalty - 0.5).abs() < 1e-9);
}
