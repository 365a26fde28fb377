// Pacing model: decides whether the rest of the pipeline runs at all.

mod fit;
mod model;

pub use fit::TopicMatcher;
pub use model::{
    CapViolation, PROCESSING_ERROR_REASON, PacingModel, PacingOutcome, caps_check,
    fatigue_penalty, momentum_z, should_force_post, time_of_day_boost,
};
