use std::str::FromStr;
use std::time::Duration;

use chrono::TimeDelta;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_API_URL: &str = "http://localhost:2000";
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 1;
const DEFAULT_GRACE_HOURS: i64 = 24;
const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
const DEFAULT_VIEW_IDLE_TTL_SECS: i64 = 4 * 60 * 60;
const MIN_SESSION_KEY_LEN: usize = 64;

/// Runtime settings, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub api_url: String,
    /// `None` when unset or too short; a random key is generated instead.
    pub session_key: Option<String>,
    pub sweep_interval: Duration,
    pub grace: TimeDelta,
    pub api_timeout: Duration,
    pub cookie_secure: bool,
    /// Views untouched for this long are dropped by the sweeper.
    pub view_idle_ttl: TimeDelta,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let api_url = lookup("REPORTS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let session_key = match lookup("SESSION_KEY") {
            Some(val) if val.len() >= MIN_SESSION_KEY_LEN => Some(val),
            Some(val) => {
                log::warn!(
                    "SESSION_KEY too short ({} bytes, need {MIN_SESSION_KEY_LEN}+), ignoring it",
                    val.len()
                );
                None
            }
            None => None,
        };

        let sweep_secs = parse_or(&lookup, "SWEEP_INTERVAL_SECS", DEFAULT_SWEEP_INTERVAL_SECS).max(1);
        let grace_hours = parse_or(&lookup, "GRACE_HOURS", DEFAULT_GRACE_HOURS).max(0);
        let timeout_secs = parse_or(&lookup, "API_TIMEOUT_SECS", DEFAULT_API_TIMEOUT_SECS).max(1);
        let cookie_secure = parse_or(&lookup, "COOKIE_SECURE", false);
        let idle_secs = parse_or(&lookup, "VIEW_IDLE_TTL_SECS", DEFAULT_VIEW_IDLE_TTL_SECS).max(60);

        Self {
            bind_addr,
            api_url,
            session_key,
            sweep_interval: Duration::from_secs(sweep_secs),
            grace: TimeDelta::try_hours(grace_hours).unwrap_or(TimeDelta::hours(DEFAULT_GRACE_HOURS)),
            api_timeout: Duration::from_secs(timeout_secs),
            cookie_secure,
            view_idle_ttl: TimeDelta::try_seconds(idle_secs)
                .unwrap_or(TimeDelta::seconds(DEFAULT_VIEW_IDLE_TTL_SECS)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{key}='{raw}' is not valid, using {default}");
            default
        }),
        None => default,
    }
}
