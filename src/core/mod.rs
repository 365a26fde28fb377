pub mod bandit;
pub mod content;
pub mod decision;
pub mod pacing;
pub mod quality;
pub mod signals;
pub mod trends;
