pub mod config;
pub mod logging;

pub use config::{Config, ConfigError, EnvSource, ProcessEnv, Profile};
