// Bandit selector: stochastic format and persona choice under eligibility gates.

pub mod sampling;
mod selector;

pub use selector::{ArmChoice, BanditSelector, eligible_formats, pick_hook};
