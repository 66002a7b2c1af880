//! Configuration management for the password gate
//!
//! Layers code defaults, an optional `config.toml`, and `PWGATE_*` environment
//! overrides into a typed, validated configuration. Loaded once at startup.

use config::{Config, Environment, File};
use log::warn;
use serde::Deserialize;
use std::path::Path;

use crate::auth::Credential;
use crate::error::GateError;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8888;
pub const DEFAULT_BASE_URL: &str = "/";
pub const DEFAULT_COOKIE_NAME: &str = "password-gate-session";
pub const DEFAULT_COOKIE_MAX_AGE_DAYS: i64 = 30;
pub const MAX_COOKIE_MAX_AGE_DAYS: i64 = 3650;

const SECS_PER_DAY: i64 = 24 * 60 * 60;

/// Minimum decoded length of a configured cookie secret
const MIN_COOKIE_SECRET_BYTES: usize = 32;

/// Complete gate configuration
#[derive(Debug, Deserialize, Clone)]
pub struct GateConfig {
    /// Hashed password (`algorithm:salt:digest`, `argon2:<phc>`, `bcrypt:<hash>`).
    /// Empty disables authentication.
    /// Environment: PWGATE_PASSWORD
    #[serde(default)]
    pub password: String,

    /// IP address to bind the HTTP listener
    pub bind_address: String,

    /// Port for the HTTP listener
    pub port: u16,

    /// Path prefix the application is served under, with leading and trailing `/`
    pub base_url: String,

    /// Whether TLS is terminated in front of this service. Marks cookies `Secure`.
    pub tls: bool,

    /// Name of the session cookie shared with the host application
    pub cookie_name: String,

    /// Hex-encoded HMAC key for the session cookie. Random per process when unset.
    #[serde(default)]
    pub cookie_secret: Option<String>,

    /// Lifetime of an issued session cookie
    pub cookie_max_age_days: i64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            password: String::new(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            base_url: DEFAULT_BASE_URL.to_string(),
            tls: false,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            cookie_secret: None,
            cookie_max_age_days: DEFAULT_COOKIE_MAX_AGE_DAYS,
        }
    }
}

impl GateConfig {
    /// Load configuration from `path` (or `./config.toml`) with environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, GateError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("config").required(false),
        };

        let settings = Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("tls", false)?
            .set_default("cookie_name", DEFAULT_COOKIE_NAME)?
            .set_default("cookie_max_age_days", DEFAULT_COOKIE_MAX_AGE_DAYS)?
            .add_source(file)
            .add_source(Environment::with_prefix("PWGATE").try_parsing(true))
            .build()?;

        let config: GateConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), GateError> {
        if self.port == 0 {
            return Err(GateError::InvalidConfig("port cannot be 0".into()));
        }

        if !self.base_url.starts_with('/')
            || !self.base_url.ends_with('/')
            || self.base_url.chars().any(is_unsafe_path_char)
        {
            return Err(GateError::InvalidConfig(format!(
                "base_url must be a plain path starting and ending with '/': {:?}",
                self.base_url
            )));
        }

        if self.cookie_name.is_empty() || !self.cookie_name.chars().all(is_cookie_name_char) {
            return Err(GateError::InvalidConfig(format!(
                "cookie_name is not a valid cookie token: {:?}",
                self.cookie_name
            )));
        }

        if !(1..=MAX_COOKIE_MAX_AGE_DAYS).contains(&self.cookie_max_age_days) {
            return Err(GateError::InvalidConfig(format!(
                "cookie_max_age_days must be between 1 and {}",
                MAX_COOKIE_MAX_AGE_DAYS
            )));
        }

        self.cookie_secret_bytes()?;

        // A malformed hash is not fatal: logins fail closed until it is fixed.
        let credential = self.credential();
        if credential.is_configured() && !credential.is_well_formed() {
            warn!("Configured password hash is not in a supported format; every login will be rejected");
        }

        Ok(())
    }

    /// The configured password hash
    pub fn credential(&self) -> Credential {
        Credential::new(self.password.clone())
    }

    /// Decoded cookie secret, if one is configured
    pub fn cookie_secret_bytes(&self) -> Result<Option<Vec<u8>>, GateError> {
        let Some(secret) = &self.cookie_secret else {
            return Ok(None);
        };

        let bytes = hex::decode(secret.trim())
            .map_err(|e| GateError::InvalidConfig(format!("cookie_secret is not valid hex: {}", e)))?;

        if bytes.len() < MIN_COOKIE_SECRET_BYTES {
            return Err(GateError::InvalidConfig(format!(
                "cookie_secret must be at least {} bytes",
                MIN_COOKIE_SECRET_BYTES
            )));
        }

        Ok(Some(bytes))
    }

    /// Get bind address and port as a listener address
    pub fn listen_address(&self) -> String {
        let host = match self.bind_address.trim() {
            "" | "*" => "0.0.0.0",
            host => host,
        };
        if host.contains(':') && !host.starts_with('[') {
            format!("[{}]:{}", host, self.port)
        } else {
            format!("{}:{}", host, self.port)
        }
    }

    /// Cookie lifetime in seconds
    pub fn cookie_max_age_secs(&self) -> i64 {
        self.cookie_max_age_days.saturating_mul(SECS_PER_DAY)
    }
}

/// Whether the password gate needs to challenge requests at all
pub fn is_auth_required(config: &GateConfig) -> bool {
    !config.password.is_empty()
}

/// Characters that cannot appear in a cookie `Path` or route prefix
fn is_unsafe_path_char(c: char) -> bool {
    c.is_whitespace() || c.is_control() || matches!(c, ';' | ',' | '"' | '\\' | '?' | '#')
}

/// RFC 6265 token characters
fn is_cookie_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
}
