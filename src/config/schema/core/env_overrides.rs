use super::Config;
use crate::config::SamplingStrategy;
use std::str::FromStr;

/// Environment variables consulted by `apply_env_overrides`.
pub const ENV_KEYS: [&str; 4] = [
    "POSTCRAFT_OPPORTUNITY_THRESHOLD",
    "POSTCRAFT_CITATION_PROB",
    "POSTCRAFT_BANDIT_STRATEGY",
    "POSTCRAFT_DEFAULT_TOPIC",
];

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var("POSTCRAFT_OPPORTUNITY_THRESHOLD")
            && let Ok(threshold) = raw.parse::<f64>()
            && threshold.is_finite()
        {
            self.pacing.opportunity_threshold = threshold;
        }

        if let Ok(raw) = std::env::var("POSTCRAFT_CITATION_PROB")
            && let Ok(prob) = raw.parse::<f64>()
            && (0.0..=1.0).contains(&prob)
        {
            self.content.citation_prob = prob;
        }

        if let Ok(raw) = std::env::var("POSTCRAFT_BANDIT_STRATEGY") {
            match SamplingStrategy::from_str(raw.trim()) {
                Ok(strategy) => self.bandit.strategy = strategy,
                Err(_) => tracing::warn!(value = %raw, "ignoring unknown POSTCRAFT_BANDIT_STRATEGY"),
            }
        }

        if let Ok(topic) = std::env::var("POSTCRAFT_DEFAULT_TOPIC")
            && !topic.trim().is_empty()
        {
            self.tables.default_topic = topic.trim().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::core::test_env::EnvScope;

    #[test]
    fn overrides_apply_when_valid() {
        let mut env = EnvScope::cleared();
        env.set("POSTCRAFT_OPPORTUNITY_THRESHOLD", "0.55");
        env.set("POSTCRAFT_CITATION_PROB", "0.0");
        env.set("POSTCRAFT_BANDIT_STRATEGY", "beta_posterior");
        env.set("POSTCRAFT_DEFAULT_TOPIC", "hydration");

        let mut config = Config::default();
        config.apply_env_overrides();

        assert!((config.pacing.opportunity_threshold - 0.55).abs() < f64::EPSILON);
        assert!(config.content.citation_prob.abs() < f64::EPSILON);
        assert_eq!(config.bandit.strategy, SamplingStrategy::BetaPosterior);
        assert_eq!(config.tables.default_topic, "hydration");
    }

    #[test]
    fn invalid_overrides_are_ignored() {
        let mut env = EnvScope::cleared();
        env.set("POSTCRAFT_OPPORTUNITY_THRESHOLD", "high");
        env.set("POSTCRAFT_CITATION_PROB", "2.5");
        env.set("POSTCRAFT_BANDIT_STRATEGY", "thompson");
        env.set("POSTCRAFT_DEFAULT_TOPIC", "   ");

        let mut config = Config::default();
        config.apply_env_overrides();

        let defaults = Config::default();
        assert_eq!(
            config.pacing.opportunity_threshold,
            defaults.pacing.opportunity_threshold
        );
        assert_eq!(config.content.citation_prob, defaults.content.citation_prob);
        assert_eq!(config.bandit.strategy, defaults.bandit.strategy);
        assert_eq!(config.tables.default_topic, defaults.tables.default_topic);
    }
}
