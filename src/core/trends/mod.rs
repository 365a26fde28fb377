// Trend fusion: platform and news streams reduced to a single topic.

mod ranker;

pub use ranker::{ScoredTrend, TopicRanker, TopicSelection};
