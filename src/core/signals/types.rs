use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::decision::{ContentFormat, Persona};

// SignalSnapshot: everything the engine knows at the moment of one decision.
// Built fresh by the caller for every invocation; carries no identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalSnapshot {
    pub now: DateTime<Utc>,
    /// Offset applied to `now` before time-of-day windows are evaluated.
    pub utc_offset_minutes: i32,
    pub caps: PostingCaps,
    pub recent: RecentCounts,
    pub follower_count: u64,
    pub metrics: EngagementMetrics,
    pub fatigue: FatigueState,
    pub platform_trends: Vec<Trend>,
    pub news_trends: Vec<Trend>,
    pub trend_policy: TrendPolicy,
    pub recent_posts_text: Vec<String>,
    pub limits: LengthLimits,
    pub style: StyleConfig,
    pub capabilities: Capabilities,
    pub reply_context: Option<ReplyContext>,
}

impl Default for SignalSnapshot {
    fn default() -> Self {
        Self {
            now: Utc::now(),
            utc_offset_minutes: 0,
            caps: PostingCaps::default(),
            recent: RecentCounts::default(),
            follower_count: 0,
            metrics: EngagementMetrics::default(),
            fatigue: FatigueState::default(),
            platform_trends: Vec::new(),
            news_trends: Vec::new(),
            trend_policy: TrendPolicy::default(),
            recent_posts_text: Vec::new(),
            limits: LengthLimits::default(),
            style: StyleConfig::default(),
            capabilities: Capabilities::default(),
            reply_context: None,
        }
    }
}

impl SignalSnapshot {
    /// Hour of day (0-23) in the account's local time.
    pub fn local_hour(&self) -> u32 {
        let local = self.now + Duration::minutes(i64::from(self.utc_offset_minutes));
        local.hour()
    }

    /// Minutes since the last post; unbounded when nothing was ever posted.
    pub fn minutes_since_last_post(&self) -> f64 {
        self.recent.last_post_min_ago.unwrap_or(f64::INFINITY)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostingCaps {
    pub max_per_day: u32,
    pub max_per_hour: u32,
    /// Minimum minutes between two posts.
    pub min_gap_min: u32,
    pub thread_cooldown_min: u32,
    /// Liveness floor: posts required per rolling two hours.
    pub min_posts_per_2h: u32,
}

impl Default for PostingCaps {
    fn default() -> Self {
        Self {
            max_per_day: 16,
            max_per_hour: 2,
            min_gap_min: 30,
            thread_cooldown_min: 240,
            min_posts_per_2h: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RecentCounts {
    pub last_hour: u32,
    pub last_day: u32,
    pub last_2h: u32,
    /// `None` when the account has never posted.
    pub last_post_min_ago: Option<f64>,
    pub last_format: Option<ContentFormat>,
}

/// Externally supplied bandit prior for one arm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmPrior {
    /// Smoothed historical win rate in [0, 1].
    pub mean: f64,
    pub successes: u32,
    pub failures: u32,
}

impl Default for ArmPrior {
    fn default() -> Self {
        Self {
            mean: 0.5,
            successes: 0,
            failures: 0,
        }
    }
}

impl ArmPrior {
    pub fn from_mean(mean: f64) -> Self {
        Self {
            mean,
            ..Self::default()
        }
    }

    pub fn has_outcomes(&self) -> bool {
        self.successes + self.failures > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngagementMetrics {
    /// Engagement per minute over the current window.
    pub epm_current: f64,
    /// Rolling EWMA baseline of engagement per minute.
    pub epm_ewma: f64,
    pub format_priors: BTreeMap<ContentFormat, ArmPrior>,
    pub persona_priors: BTreeMap<Persona, ArmPrior>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FatigueState {
    /// Consecutive posts using the same format.
    pub format_streak: u32,
    pub thread_cooldown_remaining_min: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Trend {
    pub phrase: String,
    pub momentum: f64,
    /// Volume rate; only meaningful for platform trends.
    pub volume_rate: f64,
    pub source: Option<String>,
    pub category: Option<String>,
}

impl Trend {
    pub fn new(phrase: impl Into<String>, momentum: f64) -> Self {
        Self {
            phrase: phrase.into(),
            momentum,
            ..Self::default()
        }
    }

    pub fn with_volume(mut self, volume_rate: f64) -> Self {
        self.volume_rate = volume_rate;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendPolicy {
    pub fit_min: f64,
    pub prefer_platform: bool,
    /// Share of recent posts allowed to be off-pillar before off-topic trends are dropped.
    pub max_off_topic_ratio: f64,
    pub blacklist: Vec<String>,
}

impl Default for TrendPolicy {
    fn default() -> Self {
        Self {
            fit_min: 0.5,
            prefer_platform: true,
            max_off_topic_ratio: 0.3,
            blacklist: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthLimits {
    /// Characters visible before the platform truncates a post.
    pub first_visible_chars: usize,
    pub max_tweet_chars: usize,
    pub max_longform_chars: usize,
}

impl Default for LengthLimits {
    fn default() -> Self {
        Self {
            first_visible_chars: 120,
            max_tweet_chars: 280,
            max_longform_chars: 4000,
        }
    }
}

impl LengthLimits {
    /// Per-segment ceiling: the longform limit applies only to a one-segment
    /// longform draft, every other segment uses the tweet limit.
    pub fn ceiling_for(&self, format: ContentFormat, segments: usize) -> usize {
        if format == ContentFormat::Longform && segments == 1 {
            self.max_longform_chars
        } else {
            self.max_tweet_chars
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub style_jitter: f64,
    pub hedge_prob: f64,
    pub question_prob: f64,
    pub emoji_max: usize,
    pub ban_hashtags: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            style_jitter: 0.3,
            hedge_prob: 0.2,
            question_prob: 0.15,
            emoji_max: 1,
            ban_hashtags: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Capabilities {
    pub longform: bool,
    pub replies: bool,
    pub quotes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReplyContext {
    pub target_id: String,
    pub author: Option<String>,
    pub text: String,
}
