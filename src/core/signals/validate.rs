use super::types::{SignalSnapshot, Trend};
use crate::error::EngineError;

impl SignalSnapshot {
    /// Reject snapshots the engine cannot reason about.
    pub fn validate(&self) -> Result<(), EngineError> {
        validate_finite_non_negative("metrics.epm_current", self.metrics.epm_current)?;
        validate_finite_non_negative("metrics.epm_ewma", self.metrics.epm_ewma)?;

        for (arm, prior) in &self.metrics.format_priors {
            validate_probability(&format!("metrics.format_priors.{arm}"), prior.mean)?;
        }
        for (arm, prior) in &self.metrics.persona_priors {
            validate_probability(&format!("metrics.persona_priors.{arm}"), prior.mean)?;
        }

        if let Some(minutes) = self.recent.last_post_min_ago {
            validate_finite_non_negative("recent.last_post_min_ago", minutes)?;
        }

        validate_trends("platform_trends", &self.platform_trends)?;
        validate_trends("news_trends", &self.news_trends)?;

        validate_probability("trend_policy.fit_min", self.trend_policy.fit_min)?;
        validate_probability(
            "trend_policy.max_off_topic_ratio",
            self.trend_policy.max_off_topic_ratio,
        )?;

        validate_probability("style.style_jitter", self.style.style_jitter)?;
        validate_probability("style.hedge_prob", self.style.hedge_prob)?;
        validate_probability("style.question_prob", self.style.question_prob)?;

        if self.limits.max_tweet_chars == 0 {
            return Err(EngineError::invalid(
                "limits.max_tweet_chars",
                "must be greater than zero",
            ));
        }
        if self.limits.max_longform_chars == 0 {
            return Err(EngineError::invalid(
                "limits.max_longform_chars",
                "must be greater than zero",
            ));
        }
        if self.limits.first_visible_chars == 0 {
            return Err(EngineError::invalid(
                "limits.first_visible_chars",
                "must be greater than zero",
            ));
        }

        Ok(())
    }
}

fn validate_trends(field: &str, trends: &[Trend]) -> Result<(), EngineError> {
    for (i, trend) in trends.iter().enumerate() {
        validate_finite_non_negative(&format!("{field}[{i}].momentum"), trend.momentum)?;
        validate_finite_non_negative(&format!("{field}[{i}].volume_rate"), trend.volume_rate)?;
    }
    Ok(())
}

fn validate_finite_non_negative(field: &str, value: f64) -> Result<(), EngineError> {
    if !value.is_finite() {
        return Err(EngineError::invalid(field, "must be finite"));
    }
    if value < 0.0 {
        return Err(EngineError::invalid(field, "must not be negative"));
    }
    Ok(())
}

fn validate_probability(field: &str, value: f64) -> Result<(), EngineError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(EngineError::invalid(field, "must be within [0, 1]"));
    }
    Ok(())
}
