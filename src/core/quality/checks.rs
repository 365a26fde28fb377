use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::{Regex, RegexSet};

use crate::config::QualityConfig;
use crate::error::EngineError;

static STEP_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bstep\s*\d+\s*:").expect("step-marker pattern is valid"));
static AI_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bAI\b|🤖").expect("ai-mention pattern is valid"));
static SECOND_PERSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\byou(?:r|rs|rself|'re|'ll|'ve|'d)?\b").expect("second-person pattern is valid")
});

pub(crate) fn step_marker() -> &'static Regex {
    &STEP_MARKER
}

pub fn has_second_person(text: &str) -> bool {
    SECOND_PERSON.is_match(text)
}

/// Compiled value-signal patterns (time units, percentages, benefit verbs,
/// actionable nouns, evidence nouns).
#[derive(Debug, Clone)]
pub struct ValueSignals {
    set: RegexSet,
}

impl ValueSignals {
    pub fn new(patterns: &[String]) -> Result<Self, EngineError> {
        Ok(Self {
            set: RegexSet::new(patterns)?,
        })
    }

    /// Whether the first `budget` characters carry at least one value signal.
    pub fn is_front_loaded(&self, text: &str, budget: usize) -> bool {
        let visible: String = text.chars().take(budget).collect();
        self.set.is_match(&visible)
    }
}

/// Emoji glyphs in the text. Variation selectors and joiners are not counted;
/// a pair of regional indicators is one flag.
pub fn count_emoji(text: &str) -> usize {
    let mut count = 0;
    let mut open_flag = false;
    for c in text.chars() {
        if is_regional_indicator(c) {
            if !open_flag {
                count += 1;
            }
            open_flag = !open_flag;
        } else {
            open_flag = false;
            if is_emoji(c) {
                count += 1;
            }
        }
    }
    count
}

fn is_regional_indicator(c: char) -> bool {
    matches!(u32::from(c), 0x1F1E6..=0x1F1FF)
}

fn is_emoji(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1F000..=0x1F2FF   // mahjong, cards, enclosed alphanumerics
            | 0x1F300..=0x1F5FF // symbols & pictographs
            | 0x1F600..=0x1F64F // emoticons
            | 0x1F680..=0x1F6FF // transport & map
            | 0x1F900..=0x1F9FF // supplemental symbols
            | 0x1FA70..=0x1FAFF // symbols & pictographs extended-A
            | 0x2300..=0x23FF   // misc technical (watch, hourglass, alarm clock)
            | 0x2600..=0x26FF   // misc symbols
            | 0x2700..=0x27BF   // dingbats
            | 0x2B00..=0x2BFF // arrows & stars
    )
}

fn significant_words(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|w| w.trim_matches('\'').to_lowercase())
        .filter(|w| w.chars().count() > 3)
        .collect()
}

/// Intersection over union of words longer than three characters.
#[allow(clippy::cast_precision_loss)]
pub fn word_similarity(a: &str, b: &str) -> f64 {
    let left = significant_words(a);
    let right = significant_words(b);
    let union = left.union(&right).count();
    if union == 0 {
        return 0.0;
    }
    left.intersection(&right).count() as f64 / union as f64
}

/// Heuristic "sounds like a person" score.
pub struct VibeScorer<'a> {
    config: &'a QualityConfig,
    link_bait: &'a [String],
}

impl<'a> VibeScorer<'a> {
    pub fn new(config: &'a QualityConfig, link_bait: &'a [String]) -> Self {
        Self { config, link_bait }
    }

    pub fn score(&self, text: &str) -> f64 {
        let mut score = self.config.vibe_base;

        if AI_MENTION.is_match(text) {
            score -= 2.0;
        }
        if STEP_MARKER.find_iter(text).count() > 2 {
            score -= 1.0;
        }
        let lowered = text.to_lowercase();
        if self
            .link_bait
            .iter()
            .any(|phrase| lowered.contains(&phrase.to_lowercase()))
        {
            score -= 1.0;
        }

        if text.contains('?') {
            score += 0.5;
        }
        if has_second_person(text) {
            score += 0.5;
        }
        let terminal_kinds = ['.', '!', '?', '…']
            .iter()
            .filter(|p| text.contains(**p))
            .count();
        if terminal_kinds >= 2 {
            score += 0.5;
        }

        score.clamp(0.0, self.config.vibe_cap)
    }
}
