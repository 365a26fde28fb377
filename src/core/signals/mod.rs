// Input side of the engine: the per-invocation signal snapshot.

pub mod types;
mod validate;

pub use types::*;
