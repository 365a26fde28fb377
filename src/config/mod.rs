pub mod schema;

pub use schema::{
    BanditConfig, Config, ContentConfig, ContentTables, ENV_KEYS, LongformSection, PacingConfig,
    QualityConfig, SamplingStrategy,
};
