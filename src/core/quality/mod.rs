// Quality gate: per-axis checks on segment 1 and the single bounded revision.

mod checks;
mod gate;
mod revision;

pub use checks::{ValueSignals, VibeScorer, count_emoji, has_second_person, word_similarity};
pub use gate::{GateOutcome, QualityGate};
pub use revision::Reviser;
