// Decision record types and the engine that produces them.

mod attribution;
mod engine;
pub mod types;

pub use attribution::PostAttribution;
pub use engine::DecisionEngine;
pub use types::*;
