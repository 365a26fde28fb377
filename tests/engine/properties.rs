use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::snapshot_fixtures::{engine, neutral_snapshot};
use postcraft::core::content::ContentTables;
use postcraft::core::pacing::{TopicMatcher, caps_check};
use postcraft::core::signals::{SignalSnapshot, Trend};

const CATEGORIES: [&str; 6] = ["health", "science", "sports", "business", "politics", "music"];
const PHRASES: [&str; 6] = [
    "sleep debt",
    "market rally",
    "protein timing",
    "award show",
    "stress at work",
    "new phone",
];

fn trend_strategy() -> impl Strategy<Value = Trend> {
    (
        0usize..PHRASES.len(),
        proptest::option::of(0usize..CATEGORIES.len()),
        0.0f64..1.0,
        0.0f64..150.0,
    )
        .prop_map(|(phrase, category, momentum, volume)| {
            let trend = Trend::new(PHRASES[phrase], momentum).with_volume(volume);
            match category {
                Some(c) => trend.with_category(CATEGORIES[c]),
                None => trend,
            }
        })
}

prop_compose! {
    fn snapshot_strategy()(
        epm in (0.0f64..4.0, 0.0f64..4.0),
        last_post in proptest::option::of(0.0f64..400.0),
        counts in (0u32..4, 0u32..20, 0u32..3),
        fatigue in (0u32..5, 0u32..2),
        capabilities in (any::<bool>(), any::<bool>(), any::<bool>()),
        platform in proptest::collection::vec(trend_strategy(), 0..4),
        news in proptest::collection::vec(trend_strategy(), 0..4),
        policy in (0.0f64..1.0, any::<bool>()),
        limits in (1usize..400, 1usize..200),
        style in (0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0),
        utc_offset in -720i32..720,
    ) -> SignalSnapshot {
        let mut snapshot = neutral_snapshot();
        snapshot.utc_offset_minutes = utc_offset;
        snapshot.metrics.epm_current = epm.0;
        snapshot.metrics.epm_ewma = epm.1;
        snapshot.recent.last_post_min_ago = last_post;
        snapshot.recent.last_hour = counts.0;
        snapshot.recent.last_day = counts.1;
        snapshot.recent.last_2h = counts.2;
        snapshot.fatigue.format_streak = fatigue.0;
        snapshot.fatigue.thread_cooldown_remaining_min = fatigue.1 * 60;
        snapshot.capabilities.longform = capabilities.0;
        snapshot.capabilities.replies = capabilities.1;
        snapshot.capabilities.quotes = capabilities.2;
        snapshot.platform_trends = platform;
        snapshot.news_trends = news;
        snapshot.trend_policy.fit_min = policy.0;
        snapshot.trend_policy.prefer_platform = policy.1;
        snapshot.limits.max_tweet_chars = limits.0;
        snapshot.limits.first_visible_chars = limits.1;
        snapshot.style.style_jitter = style.0;
        snapshot.style.hedge_prob = style.1;
        snapshot.style.question_prob = style.2;
        snapshot
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn record_is_always_well_formed(snapshot in snapshot_strategy(), seed in any::<u64>()) {
        let record = engine().decide(&snapshot, &mut StdRng::seed_from_u64(seed));
        if record.post_now {
            prop_assert_eq!(record.draft.tweets.len(), record.decision.n_tweets);
            prop_assert!(!record.decision.topic.is_empty());
            let ceiling = snapshot
                .limits
                .ceiling_for(record.decision.format, record.draft.tweets.len());
            for tweet in &record.draft.tweets {
                prop_assert!(tweet.char_len() <= ceiling, "{} > {}", tweet.char_len(), ceiling);
            }
            prop_assert!(record.quality.length_ok);
            prop_assert_eq!(record.delay_min, 0);
        } else {
            prop_assert!(record.draft.is_empty());
            prop_assert!(record.decision.topic.is_empty());
            prop_assert_eq!(record.decision.n_tweets, 0);
            prop_assert!(record.delay_min >= 15);
        }
    }

    #[test]
    fn liveness_floor_posts_unless_capped(snapshot in snapshot_strategy(), seed in any::<u64>()) {
        let forced = snapshot.minutes_since_last_post() >= 120.0
            && snapshot.recent.last_2h < snapshot.caps.min_posts_per_2h;
        let record = engine().decide(&snapshot, &mut StdRng::seed_from_u64(seed));
        if forced && caps_check(&snapshot).is_ok() {
            prop_assert!(record.post_now, "{}", record.reason);
        }
        if caps_check(&snapshot).is_err() {
            prop_assert!(!record.post_now);
        }
    }

    #[test]
    fn selected_trend_clears_fit_min(snapshot in snapshot_strategy(), seed in any::<u64>()) {
        let tables = ContentTables::default();
        let topics = TopicMatcher::new(&tables).unwrap();
        let record = engine().decide(&snapshot, &mut StdRng::seed_from_u64(seed));
        if record.post_now && record.decision.topic != tables.default_topic {
            let fits: Vec<f64> = snapshot
                .platform_trends
                .iter()
                .chain(&snapshot.news_trends)
                .filter(|t| t.phrase == record.decision.topic)
                .map(|t| topics.fit(t))
                .collect();
            prop_assert!(!fits.is_empty());
            prop_assert!(fits.iter().any(|fit| *fit >= snapshot.trend_policy.fit_min));
        }
    }

    #[test]
    fn same_seed_is_reproducible(snapshot in snapshot_strategy(), seed in any::<u64>()) {
        let engine = engine();
        let a = engine.decide(&snapshot, &mut StdRng::seed_from_u64(seed));
        let b = engine.decide(&snapshot, &mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(a, b);
    }
}
