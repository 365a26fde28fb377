use std::collections::BTreeMap;

use regex::Regex;

use crate::core::content::ContentTables;
use crate::core::decision::Pillar;
use crate::core::signals::Trend;
use crate::error::EngineError;

/// Whole-word, case-insensitive alternation over `keywords`. Simple plural and
/// verb endings still match ("walking", "naps"); fragments inside other words
/// do not ("Snapchat", "brunch").
fn keyword_pattern(keywords: &[String]) -> Result<Option<Regex>, EngineError> {
    let alternation = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|");
    if alternation.is_empty() {
        return Ok(None);
    }
    let pattern = Regex::new(&format!(r"(?i)\b(?:{alternation})(?:s|es|ing|ed)?\b"))?;
    Ok(Some(pattern))
}

/// Niche fit and pillar classification, compiled once from `ContentTables`.
#[derive(Debug, Clone)]
pub struct TopicMatcher {
    health: Option<Regex>,
    pillars: Vec<(Pillar, Regex)>,
    category_fit: BTreeMap<String, f64>,
    unlisted_category_fit: f64,
    baseline_fit: f64,
}

impl TopicMatcher {
    pub fn new(tables: &ContentTables) -> Result<Self, EngineError> {
        let mut pillars = Vec::with_capacity(tables.pillar_keywords.len());
        for (pillar, keywords) in &tables.pillar_keywords {
            if let Some(pattern) = keyword_pattern(keywords)? {
                pillars.push((*pillar, pattern));
            }
        }
        Ok(Self {
            health: keyword_pattern(&tables.health_keywords)?,
            pillars,
            category_fit: tables
                .category_fit
                .iter()
                .map(|(category, fit)| (category.to_lowercase(), *fit))
                .collect(),
            unlisted_category_fit: tables.unlisted_category_fit,
            baseline_fit: tables.baseline_fit,
        })
    }

    pub fn mentions_health(&self, text: &str) -> bool {
        self.health.as_ref().is_some_and(|p| p.is_match(text))
    }

    /// First pillar (in table order) whose keywords appear; `Behavior` otherwise.
    pub fn pillar_for(&self, phrase: &str) -> Pillar {
        self.pillars
            .iter()
            .find(|(_, pattern)| pattern.is_match(phrase))
            .map_or(Pillar::Behavior, |(pillar, _)| *pillar)
    }

    /// How well a trend fits the account's health niche, in [0, 1].
    ///
    /// A health-keyword hit in the phrase wins outright. Otherwise the category
    /// table decides; trends with no usable category keep a small baseline so
    /// off-topic momentum is discounted rather than discarded.
    pub fn fit(&self, trend: &Trend) -> f64 {
        if self.mentions_health(&trend.phrase) {
            return 1.0;
        }

        let fit = match trend
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            Some(category) => self
                .category_fit
                .get(&category.to_lowercase())
                .copied()
                .unwrap_or(self.unlisted_category_fit),
            None => self.baseline_fit,
        };
        fit.clamp(0.0, 1.0)
    }

    /// Whether the fit comes from a keyword or category match rather than the baseline.
    pub fn is_on_topic(&self, trend: &Trend) -> bool {
        self.fit(trend) > self.unlisted_category_fit.max(self.baseline_fit)
    }

    pub fn platform_score(&self, trend: &Trend) -> f64 {
        self.fit(trend) * trend.momentum * (trend.volume_rate / 100.0)
    }

    pub fn news_score(&self, trend: &Trend, discount: f64) -> f64 {
        self.fit(trend) * trend.momentum * discount
    }
}
