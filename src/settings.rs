use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, Environment};
use serde::Deserialize;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";
const DEFAULT_TIMEOUT_SECS: i64 = 10;
const DEFAULT_MAX_REDIRECTS: i64 = 5;
const ENV_PREFIX: &str = "EARNINGS";

/// HTTP settings. Every field can be overridden with an `EARNINGS_*` variable,
/// e.g. `EARNINGS_TIMEOUT_SECS=20`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub max_redirects: usize,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_env(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_env(env: Environment) -> Result<Self> {
        Self::builder()
            .add_source(env.try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .context("Failed to load settings")
    }

    fn builder() -> ConfigBuilder<config::builder::DefaultState> {
        // set_default only fails on an invalid key, and these are literals.
        Config::builder()
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)
            .and_then(|b| b.set_default("user_agent", DEFAULT_USER_AGENT))
            .and_then(|b| b.set_default("max_redirects", DEFAULT_MAX_REDIRECTS))
            .unwrap_or_default()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use config::Map;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn defaults_without_overrides() {
        let settings = Settings::from_env(env(&[])).unwrap();
        assert_eq!(settings.timeout(), Duration::from_secs(10));
        assert_eq!(settings.max_redirects, 5);
        assert_eq!(settings.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn env_overrides_defaults() {
        let settings = Settings::from_env(env(&[
            ("EARNINGS_TIMEOUT_SECS", "20"),
            ("EARNINGS_MAX_REDIRECTS", "0"),
            ("OTHER_TIMEOUT_SECS", "99"),
        ]))
        .unwrap();
        assert_eq!(settings.timeout_secs, 20);
        assert_eq!(settings.max_redirects, 0);
        assert!(settings.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn malformed_override_is_an_error() {
        assert!(Settings::from_env(env(&[("EARNINGS_TIMEOUT_SECS", "soon")])).is_err());
    }
}
