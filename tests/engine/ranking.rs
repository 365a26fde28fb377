use super::snapshot_fixtures::{decide_seeded, engine, postable_snapshot};
use postcraft::core::content::ContentTables;
use postcraft::core::decision::{Pillar, TrendSource};
use postcraft::core::pacing::TopicMatcher;
use postcraft::core::signals::{SignalSnapshot, Trend};
use postcraft::core::trends::TopicRanker;

struct Fixture {
    tables: ContentTables,
    topics: TopicMatcher,
}

impl Fixture {
    fn new() -> Self {
        let tables = ContentTables::default();
        let topics = TopicMatcher::new(&tables).unwrap();
        Self { tables, topics }
    }

    fn ranker(&self) -> TopicRanker<'_> {
        TopicRanker::new(&self.topics, &self.tables.default_topic, 0.6)
    }
}

fn streams(platform: Vec<Trend>, news: Vec<Trend>) -> SignalSnapshot {
    SignalSnapshot {
        platform_trends: platform,
        news_trends: news,
        ..SignalSnapshot::default()
    }
}

#[test]
fn platform_preference_is_lexicographic() {
    let fixture = Fixture::new();
    let ranker = fixture.ranker();
    let mut snapshot = streams(
        vec![Trend::new("sleep tracker", 0.5).with_volume(50.0)],
        vec![Trend::new("protein myths", 0.9)],
    );

    let selection = ranker.select(&snapshot);
    assert_eq!(selection.phrase, "sleep tracker");
    assert_eq!(selection.source, TrendSource::Platform);
    assert_eq!(selection.pillar, Pillar::Sleep);

    snapshot.trend_policy.prefer_platform = false;
    let selection = ranker.select(&snapshot);
    assert_eq!(selection.phrase, "protein myths");
    assert_eq!(selection.source, TrendSource::News);
    assert_eq!(selection.pillar, Pillar::Nutrition);
}

#[test]
fn blacklist_is_case_insensitive_substring() {
    let fixture = Fixture::new();
    let ranker = fixture.ranker();
    let mut snapshot = streams(
        vec![Trend::new("Sleep Tracker SCANDAL", 0.9).with_volume(90.0)],
        vec![Trend::new("gut health basics", 0.3)],
    );
    snapshot.trend_policy.blacklist = vec!["scandal".into()];

    let selection = ranker.select(&snapshot);
    assert_eq!(selection.phrase, "gut health basics");
    assert!(
        ranker
            .scored_candidates(&snapshot)
            .iter()
            .all(|c| !c.phrase.to_lowercase().contains("scandal"))
    );
}

#[test]
fn candidates_are_sorted_by_score() {
    let fixture = Fixture::new();
    let ranker = fixture.ranker();
    let snapshot = streams(
        vec![
            Trend::new("nap science", 0.2).with_volume(100.0),
            Trend::new("stress week", 0.8).with_volume(100.0),
        ],
        vec![Trend::new("vitamin d", 0.5)],
    );
    let scores: Vec<f64> = ranker
        .scored_candidates(&snapshot)
        .iter()
        .map(|c| c.score)
        .collect();
    assert_eq!(scores.len(), 3);
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn off_topic_share_gates_baseline_trends() {
    let fixture = Fixture::new();
    let ranker = fixture.ranker();
    let mut snapshot = streams(vec![Trend::new("viral dance", 0.9).with_volume(90.0)], vec![]);
    snapshot.trend_policy.fit_min = 0.2;

    assert_eq!(ranker.select(&snapshot).phrase, "viral dance");

    snapshot.recent_posts_text = vec![
        "Happy Friday everyone".into(),
        "What a game last night".into(),
    ];
    let selection = ranker.select(&snapshot);
    assert_eq!(selection.source, TrendSource::Default);
    assert_eq!(selection.phrase, fixture.tables.default_topic);
}

#[test]
fn engine_never_selects_low_fit_trend() {
    let engine = engine();
    let mut snapshot = postable_snapshot();
    snapshot.platform_trends = vec![
        Trend::new("celebrity breakup", 0.99)
            .with_volume(100.0)
            .with_category("entertainment"),
        Trend::new("election night", 0.95)
            .with_volume(100.0)
            .with_category("politics"),
    ];
    for seed in 0..25 {
        let record = decide_seeded(&engine, &snapshot, seed);
        assert!(record.post_now);
        assert_eq!(record.decision.topic, "daily health habits");
        assert!(!record.decision.explore);
    }
}

#[test]
fn tech_outage_is_not_read_as_a_nap_trend() {
    let engine = engine();
    let mut snapshot = postable_snapshot();
    snapshot.platform_trends = vec![
        Trend::new("Snapchat outage", 0.99)
            .with_volume(100.0)
            .with_category("technology"),
    ];
    for seed in 0..10 {
        let record = decide_seeded(&engine, &snapshot, seed);
        assert!(record.post_now);
        assert_eq!(record.decision.topic, "daily health habits");
    }
}
