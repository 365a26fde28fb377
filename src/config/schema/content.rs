use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Chance that one citation is attached to a draft.
    #[serde(default = "default_citation_prob")]
    pub citation_prob: f64,
    /// Appended to segments cut at their length ceiling.
    #[serde(default = "default_ellipsis")]
    pub ellipsis: String,
}

fn default_citation_prob() -> f64 {
    0.4
}
fn default_ellipsis() -> String {
    "…".into()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            citation_prob: default_citation_prob(),
            ellipsis: default_ellipsis(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Word-overlap similarity above which a draft counts as redundant.
    #[serde(default = "default_redundancy_threshold")]
    pub redundancy_threshold: f64,
    /// Vibe score below which the single revision pass runs.
    #[serde(default = "default_vibe_threshold")]
    pub vibe_threshold: f64,
    #[serde(default = "default_vibe_base")]
    pub vibe_base: f64,
    #[serde(default = "default_vibe_cap")]
    pub vibe_cap: f64,
}

fn default_redundancy_threshold() -> f64 {
    0.7
}
fn default_vibe_threshold() -> f64 {
    8.0
}
fn default_vibe_base() -> f64 {
    8.0
}
fn default_vibe_cap() -> f64 {
    10.0
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            redundancy_threshold: default_redundancy_threshold(),
            vibe_threshold: default_vibe_threshold(),
            vibe_base: default_vibe_base(),
            vibe_cap: default_vibe_cap(),
        }
    }
}
