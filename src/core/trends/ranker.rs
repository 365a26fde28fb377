use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::decision::{Pillar, TrendSource};
use crate::core::pacing::TopicMatcher;
use crate::core::signals::{SignalSnapshot, Trend};

/// A trend that survived policy filtering, with its fused score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTrend {
    pub phrase: String,
    pub source: TrendSource,
    pub fit: f64,
    pub momentum: f64,
    pub score: f64,
}

/// The topic handed to content assembly. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSelection {
    pub phrase: String,
    pub source: TrendSource,
    pub score: f64,
    pub momentum: f64,
    pub pillar: Pillar,
}

pub struct TopicRanker<'a> {
    topics: &'a TopicMatcher,
    default_topic: &'a str,
    news_discount: f64,
}

impl<'a> TopicRanker<'a> {
    pub fn new(topics: &'a TopicMatcher, default_topic: &'a str, news_discount: f64) -> Self {
        Self {
            topics,
            default_topic,
            news_discount,
        }
    }

    /// Filtered candidates from both streams, best first.
    pub fn scored_candidates(&self, snapshot: &SignalSnapshot) -> Vec<ScoredTrend> {
        let allow_off_topic = self.off_topic_allowed(snapshot);
        let platform = snapshot
            .platform_trends
            .iter()
            .map(|t| self.score(t, TrendSource::Platform, self.topics.platform_score(t)));
        let news = snapshot.news_trends.iter().map(|t| {
            self.score(
                t,
                TrendSource::News,
                self.topics.news_score(t, self.news_discount),
            )
        });

        let mut candidates: Vec<ScoredTrend> = snapshot
            .platform_trends
            .iter()
            .chain(&snapshot.news_trends)
            .zip(platform.chain(news))
            .filter(|(trend, scored)| {
                !scored.phrase.is_empty()
                    && scored.fit >= snapshot.trend_policy.fit_min
                    && !is_blacklisted(&trend.phrase, &snapshot.trend_policy.blacklist)
                    && (allow_off_topic || self.topics.is_on_topic(trend))
            })
            .map(|(_, scored)| scored)
            .collect();

        candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        candidates
    }

    pub fn select(&self, snapshot: &SignalSnapshot) -> TopicSelection {
        let candidates = self.scored_candidates(snapshot);

        let preferred = snapshot
            .trend_policy
            .prefer_platform
            .then(|| {
                candidates
                    .iter()
                    .find(|c| c.source == TrendSource::Platform)
            })
            .flatten();

        let Some(best) = preferred.or_else(|| candidates.first()) else {
            debug!(topic = %self.default_topic, "no trend survived filtering; using default topic");
            return TopicSelection {
                phrase: self.default_topic.to_string(),
                source: TrendSource::Default,
                score: 0.0,
                momentum: 0.0,
                pillar: self.topics.pillar_for(self.default_topic),
            };
        };

        debug!(topic = %best.phrase, source = %best.source, score = best.score, "selected topic");
        TopicSelection {
            phrase: best.phrase.clone(),
            source: best.source,
            score: best.score,
            momentum: best.momentum,
            pillar: self.topics.pillar_for(&best.phrase),
        }
    }

    fn score(&self, trend: &Trend, source: TrendSource, score: f64) -> ScoredTrend {
        ScoredTrend {
            phrase: trend.phrase.trim().to_string(),
            source,
            fit: self.topics.fit(trend),
            momentum: trend.momentum,
            score,
        }
    }

    /// Off-topic trends stay eligible only while the recent off-topic share is under the cap.
    fn off_topic_allowed(&self, snapshot: &SignalSnapshot) -> bool {
        let recent = &snapshot.recent_posts_text;
        if recent.is_empty() {
            return snapshot.trend_policy.max_off_topic_ratio > 0.0;
        }
        let off_topic = recent
            .iter()
            .filter(|text| !self.topics.mentions_health(text))
            .count();
        #[allow(clippy::cast_precision_loss)]
        let ratio = off_topic as f64 / recent.len() as f64;
        ratio < snapshot.trend_policy.max_off_topic_ratio
    }
}

fn is_blacklisted(phrase: &str, blacklist: &[String]) -> bool {
    let lowered = phrase.to_lowercase();
    blacklist
        .iter()
        .map(|term| term.trim().to_lowercase())
        .any(|term| !term.is_empty() && lowered.contains(&term))
}
