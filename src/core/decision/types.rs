use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

// ContentFormat: bandit arm for the shape of a post
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumIter, Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ContentFormat {
    #[default]
    Single,
    Thread,
    Reply,
    Quote,
    Longform,
}

impl ContentFormat {
    /// Formats that always produce exactly one segment.
    pub fn is_single_segment(self) -> bool {
        !matches!(self, Self::Thread)
    }
}

// Persona: voice archetype, the second bandit arm family (exactly five)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumIter, Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Persona {
    Scientist,
    #[default]
    Coach,
    Storyteller,
    Skeptic,
    DataNerd,
}

// HookArchetype: how the opening line grabs attention
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumIter, Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HookArchetype {
    MythBust,
    #[default]
    Tip,
    Story,
    Question,
    Stat,
    Contrarian,
}

// Pillar: fixed top-level content taxonomy
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumIter, Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Pillar {
    Sleep,
    Stress,
    Nutrition,
    Movement,
    #[default]
    Behavior,
}

// TrendSource: where the selected topic came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, Default)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TrendSource {
    Platform,
    News,
    #[default]
    Default,
}

/// Output of the pacing model, embedded in every decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PacingDecision {
    pub opportunity: f64,
    pub z_epm: f64,
    pub fatigue_penalty: f64,
}

/// What to publish: format, voice and topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ContentDecision {
    pub format: ContentFormat,
    pub n_tweets: usize,
    pub topic: String,
    pub pillar: Pillar,
    pub persona: Persona,
    pub hook: HookArchetype,
    /// Topic momentum above the exploration threshold.
    pub explore: bool,
    pub pacing: PacingDecision,
}

/// One numbered text segment of a draft (1-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetSegment {
    pub index: usize,
    pub text: String,
}

impl TweetSegment {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContentDraft {
    pub tweets: Vec<TweetSegment>,
    pub citations: Vec<String>,
    pub cta_note: String,
}

impl ContentDraft {
    pub fn is_empty(&self) -> bool {
        self.tweets.is_empty()
    }

    /// Segment 1, treated as representative of the whole draft.
    pub fn lead_text(&self) -> &str {
        self.tweets.first().map_or("", |t| t.text.as_str())
    }

    /// Re-number segments 1..=N after any edit that changed the list.
    pub fn renumber(&mut self) {
        for (i, tweet) in self.tweets.iter_mut().enumerate() {
            tweet.index = i + 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QualityCheck {
    pub length_ok: bool,
    pub emoji_ok: bool,
    pub no_hashtags: bool,
    pub non_redundant: bool,
    pub front_loaded: bool,
    pub human_vibe_score: f64,
}

impl QualityCheck {
    /// All boolean checks pass (the vibe score is judged separately).
    pub fn hard_checks_pass(&self) -> bool {
        self.length_ok && self.emoji_ok && self.no_hashtags && self.non_redundant
    }
}

/// The single structured output handed to the publishing collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DecisionRecord {
    pub post_now: bool,
    pub reason: String,
    pub delay_min: u32,
    pub decision: ContentDecision,
    pub draft: ContentDraft,
    pub quality: QualityCheck,
    /// A revision pass ran before the quality check was recorded.
    #[serde(default)]
    pub revised: bool,
    /// Name of the text synthesizer that produced the draft.
    #[serde(default)]
    pub generator: String,
}

impl DecisionRecord {
    /// A "don't post" record with neutral decision fields and an empty draft.
    pub fn hold(reason: impl Into<String>, delay_min: u32, pacing: PacingDecision) -> Self {
        Self {
            post_now: false,
            reason: reason.into(),
            delay_min,
            decision: ContentDecision {
                pacing,
                ..ContentDecision::default()
            },
            ..Self::default()
        }
    }
}
