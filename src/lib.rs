#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

pub mod config;
pub mod core;
pub mod error;

pub use config::Config;
pub use core::decision::{DecisionEngine, DecisionRecord, PostAttribution};
pub use core::signals::SignalSnapshot;
pub use error::{ConfigError, EngineError, PostcraftError};
