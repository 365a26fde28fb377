mod env_overrides;
mod loader;
#[cfg(test)]
mod test_env;
mod types;

pub use env_overrides::ENV_KEYS;
pub use types::Config;
