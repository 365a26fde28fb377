use std::fmt;

use tracing::{debug, warn};

use super::fit::TopicMatcher;
use crate::config::PacingConfig;
use crate::core::decision::PacingDecision;
use crate::core::signals::{EngagementMetrics, SignalSnapshot};
use crate::error::EngineError;

pub const PROCESSING_ERROR_REASON: &str = "processing error";

/// Result of the post-now/wait gate.
#[derive(Debug, Clone, PartialEq)]
pub struct PacingOutcome {
    pub post_now: bool,
    /// The liveness floor, not the opportunity score, triggered the post.
    pub forced: bool,
    pub reason: String,
    pub delay_min: u32,
    pub pacing: PacingDecision,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CapViolation {
    Daily { posted: u32, cap: u32 },
    Hourly { posted: u32, cap: u32 },
    MinGap { elapsed_min: f64, required_min: u32 },
}

impl fmt::Display for CapViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily { posted, cap } => write!(f, "daily cap {posted}/{cap}"),
            Self::Hourly { posted, cap } => write!(f, "hourly cap {posted}/{cap}"),
            Self::MinGap {
                elapsed_min,
                required_min,
            } => write!(
                f,
                "minimum gap {elapsed_min:.0}/{required_min} min since last post"
            ),
        }
    }
}

/// Momentum of current engagement against its EWMA baseline.
pub fn momentum_z(metrics: &EngagementMetrics) -> f64 {
    if metrics.epm_current <= 0.0 {
        return 0.0;
    }
    let scale = (metrics.epm_ewma * 0.3).max(0.1);
    (metrics.epm_current - metrics.epm_ewma) / scale
}

pub fn time_of_day_boost(hour: u32, config: &PacingConfig) -> f64 {
    if config.peak_hours.contains(&hour) {
        config.peak_boost
    } else if config.good_hours.contains(&hour) {
        config.good_boost
    } else if config.quiet_hours.contains(&hour) {
        -config.quiet_penalty
    } else {
        0.0
    }
}

pub fn fatigue_penalty(snapshot: &SignalSnapshot) -> f64 {
    let mut penalty = match snapshot.fatigue.format_streak {
        0 | 1 => 0.0,
        2 => 0.15,
        _ => 0.3,
    };
    if snapshot.fatigue.thread_cooldown_remaining_min > 0 {
        penalty += 0.2;
    }
    if snapshot.minutes_since_last_post() < f64::from(snapshot.caps.min_gap_min) {
        penalty += 0.5;
    }
    penalty
}

/// Hard ceilings. Nothing, including the liveness floor, posts past these.
pub fn caps_check(snapshot: &SignalSnapshot) -> Result<(), CapViolation> {
    let caps = &snapshot.caps;
    let recent = &snapshot.recent;
    if recent.last_day >= caps.max_per_day {
        return Err(CapViolation::Daily {
            posted: recent.last_day,
            cap: caps.max_per_day,
        });
    }
    if recent.last_hour >= caps.max_per_hour {
        return Err(CapViolation::Hourly {
            posted: recent.last_hour,
            cap: caps.max_per_hour,
        });
    }
    let elapsed = snapshot.minutes_since_last_post();
    if elapsed < f64::from(caps.min_gap_min) {
        return Err(CapViolation::MinGap {
            elapsed_min: elapsed,
            required_min: caps.min_gap_min,
        });
    }
    Ok(())
}

/// Liveness floor: long idle and under the two-hour posting minimum.
pub fn should_force_post(snapshot: &SignalSnapshot, config: &PacingConfig) -> bool {
    snapshot.minutes_since_last_post() >= config.force_idle_minutes
        && snapshot.recent.last_2h < snapshot.caps.min_posts_per_2h
}

pub struct PacingModel<'a> {
    config: &'a PacingConfig,
    topics: &'a TopicMatcher,
}

impl<'a> PacingModel<'a> {
    pub fn new(config: &'a PacingConfig, topics: &'a TopicMatcher) -> Self {
        Self { config, topics }
    }

    /// Never fails: internal errors degrade to a processing-error hold.
    pub fn evaluate(&self, snapshot: &SignalSnapshot) -> PacingOutcome {
        match self.try_evaluate(snapshot) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "pacing model failed; holding");
                self.degraded()
            }
        }
    }

    pub fn degraded(&self) -> PacingOutcome {
        PacingOutcome {
            post_now: false,
            forced: false,
            reason: PROCESSING_ERROR_REASON.into(),
            delay_min: self.config.error_delay_minutes,
            pacing: PacingDecision::default(),
        }
    }

    pub fn opportunity(&self, snapshot: &SignalSnapshot) -> PacingDecision {
        let z_epm = momentum_z(&snapshot.metrics);
        let platform_boost = snapshot
            .platform_trends
            .iter()
            .map(|t| self.topics.platform_score(t))
            .fold(0.0_f64, f64::max);
        let news_boost = snapshot
            .news_trends
            .iter()
            .map(|t| self.topics.news_score(t, self.config.news_discount))
            .fold(0.0_f64, f64::max);
        let time_boost = time_of_day_boost(snapshot.local_hour(), self.config);
        let fatigue = fatigue_penalty(snapshot);

        debug!(
            z_epm,
            platform_boost, news_boost, time_boost, fatigue, "pacing components"
        );

        PacingDecision {
            opportunity: z_epm + platform_boost + news_boost + time_boost - fatigue,
            z_epm,
            fatigue_penalty: fatigue,
        }
    }

    fn try_evaluate(&self, snapshot: &SignalSnapshot) -> Result<PacingOutcome, EngineError> {
        let pacing = self.opportunity(snapshot);
        if !pacing.opportunity.is_finite() {
            return Err(EngineError::Generation(format!(
                "non-finite opportunity {}",
                pacing.opportunity
            )));
        }

        let forced = should_force_post(snapshot, self.config);
        let above_threshold = pacing.opportunity > self.config.opportunity_threshold;

        // Caps are checked on every path, forced or not.
        if let Err(violation) = caps_check(snapshot) {
            return Ok(PacingOutcome {
                post_now: false,
                forced: false,
                reason: format!("cap reached: {violation}"),
                delay_min: self.hold_delay(snapshot),
                pacing,
            });
        }

        let (post_now, reason) = if forced {
            (true, self.forced_reason(snapshot))
        } else if above_threshold {
            (
                true,
                format!(
                    "opportunity {:.2} above threshold {:.2}",
                    pacing.opportunity, self.config.opportunity_threshold
                ),
            )
        } else {
            (
                false,
                format!(
                    "opportunity {:.2} below threshold {:.2}",
                    pacing.opportunity, self.config.opportunity_threshold
                ),
            )
        };

        Ok(PacingOutcome {
            post_now,
            forced: forced && post_now,
            reason,
            delay_min: if post_now { 0 } else { self.hold_delay(snapshot) },
            pacing,
        })
    }

    fn forced_reason(&self, snapshot: &SignalSnapshot) -> String {
        let idle = snapshot.minutes_since_last_post();
        let idle = if idle.is_finite() {
            format!("{idle:.0} min since last post")
        } else {
            "no previous post".to_string()
        };
        format!(
            "minimum posting requirement: {idle}, {}/{} posts in last 2h",
            snapshot.recent.last_2h, snapshot.caps.min_posts_per_2h
        )
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn hold_delay(&self, snapshot: &SignalSnapshot) -> u32 {
        let remaining = f64::from(snapshot.caps.min_gap_min) - snapshot.minutes_since_last_post();
        let delay = remaining.max(f64::from(self.config.min_delay_minutes)).ceil();
        delay.min(f64::from(u32::MAX)) as u32
    }
}
