use rand::{Rng, RngCore};
use strum::IntoEnumIterator;
use tracing::debug;

use super::sampling::sample_argmax;
use crate::config::BanditConfig;
use crate::core::decision::{ContentFormat, HookArchetype, Persona};
use crate::core::signals::{ArmPrior, SignalSnapshot};

/// Arms chosen for one decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmChoice {
    pub format: ContentFormat,
    pub persona: Persona,
    pub hook: HookArchetype,
    pub n_tweets: usize,
}

/// Formats allowed by capability flags and the thread cooldown.
pub fn eligible_formats(snapshot: &SignalSnapshot) -> Vec<ContentFormat> {
    ContentFormat::iter()
        .filter(|format| match format {
            ContentFormat::Single => true,
            ContentFormat::Thread => snapshot.fatigue.thread_cooldown_remaining_min == 0,
            ContentFormat::Reply => snapshot.capabilities.replies,
            ContentFormat::Quote => snapshot.capabilities.quotes,
            ContentFormat::Longform => snapshot.capabilities.longform,
        })
        .collect()
}

/// Persona-specific weighted coin flip between two hook archetypes.
pub fn pick_hook(persona: Persona, rng: &mut dyn RngCore) -> HookArchetype {
    let (primary, weight, fallback) = match persona {
        Persona::Scientist => (HookArchetype::MythBust, 0.7, HookArchetype::Tip),
        Persona::Coach => (HookArchetype::Tip, 0.7, HookArchetype::Question),
        Persona::Storyteller => (HookArchetype::Story, 0.8, HookArchetype::Question),
        Persona::Skeptic => (HookArchetype::Contrarian, 0.6, HookArchetype::MythBust),
        Persona::DataNerd => (HookArchetype::Stat, 0.7, HookArchetype::Tip),
    };
    if rng.random_bool(weight) {
        primary
    } else {
        fallback
    }
}

pub struct BanditSelector<'a> {
    config: &'a BanditConfig,
}

impl<'a> BanditSelector<'a> {
    pub fn new(config: &'a BanditConfig) -> Self {
        Self { config }
    }

    pub fn select_format(&self, snapshot: &SignalSnapshot, rng: &mut dyn RngCore) -> ContentFormat {
        let eligible = eligible_formats(snapshot);
        let priors = &snapshot.metrics.format_priors;
        sample_argmax(
            &eligible,
            |arm| self.prior_or_default(priors.get(&arm)),
            self.config.strategy,
            self.config.noise,
            rng,
        )
        .unwrap_or(ContentFormat::Single)
    }

    pub fn select_persona(&self, snapshot: &SignalSnapshot, rng: &mut dyn RngCore) -> Persona {
        let personas: Vec<Persona> = Persona::iter().collect();
        let priors = &snapshot.metrics.persona_priors;
        sample_argmax(
            &personas,
            |arm| self.prior_or_default(priors.get(&arm)),
            self.config.strategy,
            self.config.noise,
            rng,
        )
        .unwrap_or_default()
    }

    pub fn tweet_count(&self, format: ContentFormat, rng: &mut dyn RngCore) -> usize {
        if format.is_single_segment() {
            1
        } else {
            rng.random_range(self.config.thread_min_tweets..=self.config.thread_max_tweets)
        }
    }

    pub fn choose(&self, snapshot: &SignalSnapshot, rng: &mut dyn RngCore) -> ArmChoice {
        let format = self.select_format(snapshot, rng);
        let persona = self.select_persona(snapshot, rng);
        let hook = pick_hook(persona, rng);
        let n_tweets = self.tweet_count(format, rng);
        debug!(%format, %persona, %hook, n_tweets, "bandit arms selected");
        ArmChoice {
            format,
            persona,
            hook,
            n_tweets,
        }
    }

    fn prior_or_default(&self, prior: Option<&ArmPrior>) -> ArmPrior {
        prior
            .copied()
            .unwrap_or_else(|| ArmPrior::from_mean(self.config.default_prior))
    }
}
