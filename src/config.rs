//! Site configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! Sessions are client-held records whose `isAdmin`/`isVerified` flags are
//! trusted as-is. That model is acceptable for demos and local development
//! only, so `from_env` rejects `SITE_ENV=production`.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SITE_NAME: &str = "Hope Foundation";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@hopefoundation.org";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_AUTH_DELAY_MS: u64 = 800;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
    #[error("client-trusted sessions must not run with SITE_ENV=production")]
    UnsafeInProduction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    fn parse(raw: Option<&str>) -> Result<Self, ConfigError> {
        match raw.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            None | Some("" | "development" | "dev") => Ok(Self::Development),
            Some("test") => Ok(Self::Test),
            Some("production" | "prod") => Ok(Self::Production),
            Some(other) => Err(ConfigError::Invalid { var: "SITE_ENV", value: other.to_owned() }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub port: u16,
    pub environment: Environment,
    pub site_name: String,
    /// Absolute origin used in emailed links, without trailing slash.
    pub base_url: String,
    pub admin_email: String,
    pub admin_password: String,
    /// Artificial latency of the mock identity provider.
    pub auth_delay: Duration,
    pub cookie_secure: bool,
    pub assets_dir: PathBuf,
}

impl SiteConfig {
    /// Build config from the process environment.
    ///
    /// - `PORT`: default 3000
    /// - `SITE_ENV`: `development` (default), `test`, or `production` (rejected)
    /// - `SITE_NAME`, `SITE_BASE_URL`
    /// - `ADMIN_EMAIL`, `ADMIN_PASSWORD`: the mock administrator credential
    /// - `AUTH_MOCK_DELAY_MS`: default 800
    /// - `COOKIE_SECURE`: defaults to whether `SITE_BASE_URL` is https
    /// - `ASSETS_DIR`: default `<crate>/assets`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::parse(lookup("SITE_ENV").as_deref())?;
        if environment == Environment::Production {
            return Err(ConfigError::UnsafeInProduction);
        }

        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;
        let delay_ms = parse_or("AUTH_MOCK_DELAY_MS", lookup("AUTH_MOCK_DELAY_MS"), DEFAULT_AUTH_DELAY_MS)?;
        let base_url = lookup("SITE_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_owned();
        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { var: "COOKIE_SECURE", value: raw })?,
            None => base_url.starts_with("https://"),
        };
        let assets_dir = lookup("ASSETS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"));

        Ok(Self {
            port,
            environment,
            site_name: lookup("SITE_NAME").unwrap_or_else(|| DEFAULT_SITE_NAME.to_owned()),
            base_url,
            admin_email: lookup("ADMIN_EMAIL").unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_owned()),
            admin_password: lookup("ADMIN_PASSWORD").unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_owned()),
            auth_delay: Duration::from_millis(delay_ms),
            cookie_secure,
            assets_dir,
        })
    }

    /// Whether development conveniences (echoed verification links) are on.
    #[must_use]
    pub fn echo_links(&self) -> bool {
        self.environment == Environment::Development
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_or<T: std::str::FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
