//! Configuration module for zazu.
//!
//! Configuration is read once per run from an INI file and passed by value to
//! whatever needs it. The file has two sections:
//!
//! ```ini
//! [api]
//! consumer_key = ...
//! consumer_secret = ...
//! access_token_key = ...
//! access_token_secret = ...
//!
//! [general]
//! random_time = 300
//! ```
//!
//! A credential missing from the file is looked up in the matching
//! `ZAZU_*` environment variable before giving up.

use crate::error::ConfigError;
use ini::Ini;
use log::{debug, info, warn};
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;

/// Default path of the configuration file.
pub const DEFAULT_CONFIG_FILE: &str = "config.ini";

/// Default upper bound (exclusive) of the random delay, in seconds.
pub const DEFAULT_RANDOM_TIME: u64 = 5 * 60;

const API_SECTION: &str = "api";
const GENERAL_SECTION: &str = "general";

/// OAuth 1.0a credentials for the Twitter API.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token_key: String,
    pub access_token_secret: String,
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("consumer_key", &mask_secret(&self.consumer_key))
            .field("consumer_secret", &"[REDACTED]")
            .field("access_token_key", &mask_secret(&self.access_token_key))
            .field("access_token_secret", &"[REDACTED]")
            .finish()
    }
}

/// Settings from the `[general]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneralConfig {
    /// Upper bound (exclusive) of the random delay, in seconds. Always positive.
    pub random_time: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            random_time: DEFAULT_RANDOM_TIME,
        }
    }
}

/// The complete configuration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api: ApiCredentials,
    pub general: GeneralConfig,
}

impl Config {
    /// Loads the configuration from an INI file.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Read`] if the file cannot be read
    /// - [`ConfigError::Parse`] if the file is not valid INI
    /// - [`ConfigError::MissingField`] if a credential is neither in the file nor in the environment
    /// - [`ConfigError::InvalidValue`] if `random_time` is not a positive integer
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!("Loading configuration from {}", path.display());
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ini_str(&contents)
    }

    /// Parses the configuration from INI text.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zazu::Config;
    ///
    /// let config = Config::from_ini_str(
    ///     "[api]\nconsumer_key = ck\nconsumer_secret = cs\n\
    ///      access_token_key = tk\naccess_token_secret = ts\n",
    /// )
    /// .unwrap();
    /// assert_eq!(config.general.random_time, 300);
    /// ```
    pub fn from_ini_str(contents: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(contents)?;

        let api = ApiCredentials {
            consumer_key: credential(&ini, "consumer_key")?,
            consumer_secret: credential(&ini, "consumer_secret")?,
            access_token_key: credential(&ini, "access_token_key")?,
            access_token_secret: credential(&ini, "access_token_secret")?,
        };
        debug!("API credentials loaded: {:?}", api);

        let general = GeneralConfig {
            random_time: random_time(&ini)?,
        };
        debug!("General settings loaded: {:?}", general);

        Ok(Config { api, general })
    }
}

/// Name of the environment variable that can supply an `[api]` key.
fn env_var_name(key: &str) -> String {
    format!("ZAZU_{}", key.to_uppercase())
}

fn credential(ini: &Ini, key: &str) -> Result<String, ConfigError> {
    let from_file = ini
        .section(Some(API_SECTION))
        .and_then(|section| section.get(key))
        .map(str::trim)
        .filter(|value| !value.is_empty());

    if let Some(value) = from_file {
        if value.len() < 10 {
            warn!(
                "Credential '{}' seems unusually short ({} characters)",
                key,
                value.len()
            );
        }
        return Ok(value.to_string());
    }

    let var = env_var_name(key);
    match env::var(&var) {
        Ok(value) if !value.trim().is_empty() => {
            info!("Using {} from the environment for '{}'", var, key);
            Ok(value.trim().to_string())
        }
        _ => Err(ConfigError::MissingField {
            section: API_SECTION.to_string(),
            key: key.to_string(),
        }),
    }
}

fn random_time(ini: &Ini) -> Result<u64, ConfigError> {
    let raw = match ini
        .section(Some(GENERAL_SECTION))
        .and_then(|section| section.get("random_time"))
    {
        Some(raw) => raw.trim(),
        None => return Ok(DEFAULT_RANDOM_TIME),
    };

    let invalid = |reason: &str| ConfigError::InvalidValue {
        section: GENERAL_SECTION.to_string(),
        key: "random_time".to_string(),
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    match raw.parse::<u64>() {
        Ok(0) => Err(invalid("must be greater than zero")),
        Ok(seconds) => Ok(seconds),
        Err(e) => Err(invalid(&e.to_string())),
    }
}

/// Masks a secret for logging, keeping only a short prefix (and suffix for
/// long values).
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    let length = chars.len();

    let prefix: String = chars.iter().take(4.min(length)).collect();
    if length > 16 {
        let suffix: String = chars[length - 4..].iter().collect();
        format!("{}...{}", prefix, suffix)
    } else {
        format!("{}...", prefix)
    }
}
