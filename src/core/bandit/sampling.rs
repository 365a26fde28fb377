use rand::{Rng, RngCore};

use crate::config::SamplingStrategy;
use crate::core::signals::ArmPrior;

/// Upper bound on uniforms drawn for one Beta sample.
const MAX_BETA_DRAWS: u32 = 512;

/// Prior plus symmetric uniform noise.
pub fn noisy_sample(prior: f64, noise: f64, rng: &mut dyn RngCore) -> f64 {
    if noise <= 0.0 {
        return prior;
    }
    prior + rng.random_range(-noise..=noise)
}

/// Draw from Beta(alpha, beta) for integer parameters >= 1.
///
/// The alpha-th smallest of `alpha + beta - 1` uniforms is Beta(alpha, beta)
/// distributed. Large counts are scaled down proportionally so a single draw
/// stays bounded.
pub fn beta_sample(alpha: u32, beta: u32, rng: &mut dyn RngCore) -> f64 {
    let (alpha, beta) = bounded_params(alpha.max(1), beta.max(1));
    let n = (alpha + beta - 1) as usize;
    let mut draws: Vec<f64> = (0..n).map(|_| rng.random::<f64>()).collect();
    let k = (alpha - 1) as usize;
    let (_, kth, _) = draws.select_nth_unstable_by(k, f64::total_cmp);
    *kth
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn bounded_params(alpha: u32, beta: u32) -> (u32, u32) {
    let total = alpha.saturating_add(beta).saturating_sub(1);
    if total <= MAX_BETA_DRAWS {
        return (alpha, beta);
    }
    let scale = f64::from(MAX_BETA_DRAWS) / f64::from(total);
    let a = ((f64::from(alpha) * scale).round() as u32).max(1);
    let b = ((f64::from(beta) * scale).round() as u32).max(1);
    (a, b)
}

/// One sampled value for an arm under the configured strategy.
pub fn sample_arm(
    prior: &ArmPrior,
    strategy: SamplingStrategy,
    noise: f64,
    rng: &mut dyn RngCore,
) -> f64 {
    match strategy {
        SamplingStrategy::BetaPosterior if prior.has_outcomes() => beta_sample(
            prior.successes.saturating_add(1),
            prior.failures.saturating_add(1),
            rng,
        ),
        _ => noisy_sample(prior.mean, noise, rng),
    }
}

/// Argmax over sampled values; the first arm wins ties.
pub fn sample_argmax<A: Copy>(
    arms: &[A],
    prior_of: impl Fn(A) -> ArmPrior,
    strategy: SamplingStrategy,
    noise: f64,
    rng: &mut dyn RngCore,
) -> Option<A> {
    let mut best: Option<(A, f64)> = None;
    for &arm in arms {
        let value = sample_arm(&prior_of(arm), strategy, noise, rng);
        if best.is_none_or(|(_, top)| value > top) {
            best = Some((arm, value));
        }
    }
    best.map(|(arm, _)| arm)
}
