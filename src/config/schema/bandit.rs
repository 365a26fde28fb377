use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SamplingStrategy {
    /// Prior plus uniform noise, then argmax.
    #[default]
    NoisyArgmax,
    /// Beta(successes + 1, failures + 1) per arm when outcome counts exist.
    BetaPosterior,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BanditConfig {
    #[serde(default)]
    pub strategy: SamplingStrategy,
    /// Half-width of the uniform noise added to each arm's prior.
    #[serde(default = "default_noise")]
    pub noise: f64,
    /// Prior used for arms the metrics service did not report.
    #[serde(default = "default_prior")]
    pub default_prior: f64,
    #[serde(default = "default_thread_min")]
    pub thread_min_tweets: usize,
    #[serde(default = "default_thread_max")]
    pub thread_max_tweets: usize,
    /// Topic momentum above which the decision is flagged as exploratory.
    #[serde(default = "default_explore_momentum")]
    pub explore_momentum: f64,
}

fn default_noise() -> f64 {
    0.1
}
fn default_prior() -> f64 {
    0.5
}
fn default_thread_min() -> usize {
    3
}
fn default_thread_max() -> usize {
    7
}
fn default_explore_momentum() -> f64 {
    0.7
}

impl Default for BanditConfig {
    fn default() -> Self {
        Self {
            strategy: SamplingStrategy::default(),
            noise: default_noise(),
            default_prior: default_prior(),
            thread_min_tweets: default_thread_min(),
            thread_max_tweets: default_thread_max(),
            explore_momentum: default_explore_momentum(),
        }
    }
}
