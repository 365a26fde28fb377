use super::super::{BanditConfig, ContentConfig, PacingConfig, QualityConfig};
use crate::core::content::ContentTables;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed at load time, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub pacing: PacingConfig,

    #[serde(default)]
    pub bandit: BanditConfig,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub quality: QualityConfig,

    /// Only persisted when it differs from the built-in tables.
    #[serde(default, skip_serializing_if = "ContentTables::is_builtin")]
    pub tables: ContentTables,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_unit("content.citation_prob", self.content.citation_prob)?;
        validate_unit("bandit.default_prior", self.bandit.default_prior)?;
        validate_unit(
            "quality.redundancy_threshold",
            self.quality.redundancy_threshold,
        )?;

        if !(0.0..=0.5).contains(&self.bandit.noise) {
            return Err(ConfigError::Validation(
                "bandit.noise must be within [0, 0.5]".into(),
            ));
        }
        if self.bandit.thread_min_tweets < 2
            || self.bandit.thread_min_tweets > self.bandit.thread_max_tweets
        {
            return Err(ConfigError::Validation(format!(
                "bandit thread range {}..={} is invalid",
                self.bandit.thread_min_tweets, self.bandit.thread_max_tweets
            )));
        }
        if self.pacing.min_delay_minutes == 0 {
            return Err(ConfigError::Validation(
                "pacing.min_delay_minutes must be greater than zero".into(),
            ));
        }
        for hour in self
            .pacing
            .peak_hours
            .iter()
            .chain(&self.pacing.good_hours)
            .chain(&self.pacing.quiet_hours)
        {
            if *hour > 23 {
                return Err(ConfigError::Validation(format!(
                    "pacing hour {hour} is outside 0-23"
                )));
            }
        }
        if self.quality.vibe_cap < self.quality.vibe_base {
            return Err(ConfigError::Validation(
                "quality.vibe_cap must not be below quality.vibe_base".into(),
            ));
        }

        let tables = &self.tables;
        validate_pool("tables.cta_pool", &tables.cta_pool)?;
        validate_pool("tables.takeaway_templates", &tables.takeaway_templates)?;
        validate_pool("tables.default_thread_bodies", &tables.default_thread_bodies)?;
        validate_pool("tables.citation_sources", &tables.citation_sources)?;
        validate_pool("tables.value_signal_patterns", &tables.value_signal_patterns)?;
        if tables.hook_templates.values().all(Vec::is_empty) {
            return Err(ConfigError::Validation(
                "tables.hook_templates must not be empty".into(),
            ));
        }
        if tables.default_topic.trim().is_empty() {
            return Err(ConfigError::Validation(
                "tables.default_topic must not be empty".into(),
            ));
        }

        Ok(())
    }
}

fn validate_unit(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{field} must be within [0, 1], got {value}"
        )))
    }
}

fn validate_pool(field: &str, pool: &[String]) -> Result<(), ConfigError> {
    if pool.is_empty() {
        return Err(ConfigError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}
