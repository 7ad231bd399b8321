// src/config.rs
use std::{env, time::Duration};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    listen_addr: String,
    database_url: Option<String>,
    access_secret: String,
    refresh_secret: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
    allowed_origins: Vec<String>,
    refresh_token_in_body: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

const DEFAULT_ACCESS_TTL: &str = "15m";
const DEFAULT_REFRESH_TTL: &str = "7d";

impl AppConfig {
    /// Build configuration from the process environment, after loading a
    /// `.env` file if one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = lookup("LISTEN_ADDR").unwrap_or_else(default_listen_addr);
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let access_secret = required_secret(&lookup, "JWT_ACCESS_SECRET")?;
        let refresh_secret = required_secret(&lookup, "JWT_REFRESH_SECRET")?;
        if access_secret == refresh_secret {
            return Err(ConfigError::Invalid(
                "JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must differ".into(),
            ));
        }

        let access_ttl = ttl_var(&lookup, "JWT_ACCESS_EXPIRE", DEFAULT_ACCESS_TTL)?;
        let refresh_ttl = ttl_var(&lookup, "JWT_REFRESH_EXPIRE", DEFAULT_REFRESH_TTL)?;

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let refresh_token_in_body = match lookup("AUTH_REFRESH_TOKEN_IN_BODY") {
            None => true,
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                ConfigError::Invalid(format!("AUTH_REFRESH_TOKEN_IN_BODY: not a boolean: {raw}"))
            })?,
        };

        Ok(Self {
            listen_addr,
            database_url,
            access_secret,
            refresh_secret,
            access_ttl,
            refresh_ttl,
            allowed_origins,
            refresh_token_in_body,
        })
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    /// `None` selects the in-memory store.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    pub fn access_secret(&self) -> &str {
        &self.access_secret
    }

    pub fn refresh_secret(&self) -> &str {
        &self.refresh_secret
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Empty means any origin.
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn refresh_token_in_body(&self) -> bool {
        self.refresh_token_in_body
    }
}

fn required_secret<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(ConfigError::Invalid(format!("{key} must not be empty"))),
        None => Err(ConfigError::Missing(key)),
    }
}

fn ttl_var<F>(lookup: &F, key: &'static str, default: &str) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    parse_ttl(&raw).map_err(|reason| ConfigError::Invalid(format!("{key}: {reason}")))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a lifetime such as `900`, `15m`, `12h` or `7d`. Bare integers are
/// seconds. Anything that rounds to less than one second is rejected.
pub fn parse_ttl(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    let split = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let (digits, unit) = raw.split_at(split);

    let amount: u64 = digits
        .parse()
        .map_err(|_| format!("invalid duration `{raw}`"))?;

    let millis_per_unit: u64 = match unit.trim() {
        "" | "s" => 1_000,
        "ms" => 1,
        "m" => 60_000,
        "h" => 3_600_000,
        "d" => 86_400_000,
        "w" => 604_800_000,
        other => return Err(format!("unknown duration unit `{other}`")),
    };

    let millis = amount
        .checked_mul(millis_per_unit)
        .ok_or_else(|| format!("duration `{raw}` is too large"))?;

    if millis < 1_000 {
        return Err(format!("duration `{raw}` must be at least one second"));
    }

    // Tokens carry whole-second timestamps.
    Ok(Duration::from_secs(millis / 1_000))
}
