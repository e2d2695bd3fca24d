use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Used when `SECRET_KEY` is unset or empty. Not a secret; never deploy with it.
pub const DEFAULT_SECRET_KEY: &str = "your-secret-key-here";
pub const DEFAULT_CORS_ORIGINS: &str = "*";

pub const SECRET_KEY_VAR: &str = "SECRET_KEY";
pub const CORS_ORIGINS_VAR: &str = "CORS_ORIGINS";
pub const PROFILE_VAR: &str = "APP_PROFILE";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown profile '{0}' (expected 'production' or 'development')")]
    UnknownProfile(String),
}

/// Read-only key/value lookup the resolver pulls its inputs from.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The live process environment. A set value that is not valid UTF-8 is
/// converted lossily rather than treated as absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(os_value)
    }
}

fn os_value(value: OsString) -> String {
    match value.into_string() {
        Ok(value) => value,
        Err(raw) => {
            tracing::warn!("Environment value is not valid UTF-8, invalid bytes replaced");
            raw.to_string_lossy().into_owned()
        }
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Production,
    #[default]
    Development,
}

impl Profile {
    pub fn debug_enabled(self) -> bool {
        match self {
            Profile::Production => false,
            Profile::Development => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Production => "production",
            Profile::Development => "development",
        }
    }

    /// Reads `APP_PROFILE`, falling back to [`Profile::default`] when it is unset or blank.
    pub fn from_env(env: &impl EnvSource) -> Result<Self, ConfigError> {
        match env.var(PROFILE_VAR) {
            Some(name) if !name.trim().is_empty() => name.parse(),
            _ => Ok(Profile::default()),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Profile::Production),
            "development" | "dev" => Ok(Profile::Development),
            _ => Err(ConfigError::UnknownProfile(s.to_string())),
        }
    }
}

/// Application configuration, built once at startup and read-only afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    secret_key: String,
    cors_origins: Vec<String>,
    debug: bool,
}

impl Config {
    pub fn from_env(profile: Profile) -> Self {
        Self::resolve(profile, &ProcessEnv)
    }

    pub fn resolve(profile: Profile, env: &impl EnvSource) -> Self {
        let secret_key = match env.var(SECRET_KEY_VAR) {
            Some(key) if !key.is_empty() => key,
            _ => {
                tracing::warn!(
                    "{} is unset or empty, using the built-in default secret key",
                    SECRET_KEY_VAR
                );
                DEFAULT_SECRET_KEY.to_string()
            }
        };

        // Origins are kept verbatim: "a, b" yields ["a", " b"].
        let cors_origins = env
            .var(CORS_ORIGINS_VAR)
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(str::to_string)
            .collect();

        Self {
            secret_key,
            cors_origins,
            debug: profile.debug_enabled(),
        }
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("secret_key", &"<redacted>")
            .field("cors_origins", &self.cors_origins)
            .field("debug", &self.debug)
            .finish()
    }
}

/// Serialized form never carries the secret itself.
#[derive(Serialize)]
struct RedactedConfig<'a> {
    default_secret: bool,
    cors_origins: &'a [String],
    debug: bool,
}

impl Serialize for Config {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RedactedConfig {
            default_secret: self.uses_default_secret(),
            cors_origins: &self.cors_origins,
            debug: self.debug,
        }
        .serialize(serializer)
    }
}
