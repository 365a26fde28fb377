mod bandit;
mod content;
mod core;
mod pacing;

pub use crate::core::content::{ContentTables, LongformSection};
pub use bandit::{BanditConfig, SamplingStrategy};
pub use content::{ContentConfig, QualityConfig};
pub use self::core::{Config, ENV_KEYS};
pub use pacing::PacingConfig;
