use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Opportunity must exceed this to post without the liveness floor.
    #[serde(default = "default_opportunity_threshold")]
    pub opportunity_threshold: f64,
    /// Idle minutes after which the posting floor can force a post.
    #[serde(default = "default_force_idle_minutes")]
    pub force_idle_minutes: f64,
    /// Floor for the advisory delay returned when holding.
    #[serde(default = "default_min_delay_minutes")]
    pub min_delay_minutes: u32,
    /// Delay returned when the engine degrades on an internal error.
    #[serde(default = "default_error_delay_minutes")]
    pub error_delay_minutes: u32,
    /// Discount applied to news momentum relative to platform trends.
    #[serde(default = "default_news_discount")]
    pub news_discount: f64,
    /// Local hours (0-23) with peak engagement.
    #[serde(default = "default_peak_hours")]
    pub peak_hours: Vec<u32>,
    #[serde(default = "default_good_hours")]
    pub good_hours: Vec<u32>,
    /// Late-night and early-morning hours that are penalised.
    #[serde(default = "default_quiet_hours")]
    pub quiet_hours: Vec<u32>,
    #[serde(default = "default_peak_boost")]
    pub peak_boost: f64,
    #[serde(default = "default_good_boost")]
    pub good_boost: f64,
    #[serde(default = "default_quiet_penalty")]
    pub quiet_penalty: f64,
}

fn default_opportunity_threshold() -> f64 {
    0.3
}
fn default_force_idle_minutes() -> f64 {
    120.0
}
fn default_min_delay_minutes() -> u32 {
    15
}
fn default_error_delay_minutes() -> u32 {
    30
}
fn default_news_discount() -> f64 {
    0.6
}
fn default_peak_hours() -> Vec<u32> {
    vec![7, 8, 12, 19, 20]
}
fn default_good_hours() -> Vec<u32> {
    vec![9, 10, 11, 13, 17, 18, 21]
}
fn default_quiet_hours() -> Vec<u32> {
    vec![23, 0, 1, 2, 3, 4, 5]
}
fn default_peak_boost() -> f64 {
    0.3
}
fn default_good_boost() -> f64 {
    0.15
}
fn default_quiet_penalty() -> f64 {
    0.2
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            opportunity_threshold: default_opportunity_threshold(),
            force_idle_minutes: default_force_idle_minutes(),
            min_delay_minutes: default_min_delay_minutes(),
            error_delay_minutes: default_error_delay_minutes(),
            news_discount: default_news_discount(),
            peak_hours: default_peak_hours(),
            good_hours: default_good_hours(),
            quiet_hours: default_quiet_hours(),
            peak_boost: default_peak_boost(),
            good_boost: default_good_boost(),
            quiet_penalty: default_quiet_penalty(),
        }
    }
}
