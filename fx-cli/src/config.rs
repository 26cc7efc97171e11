//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use anyhow::Context;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Required for every command that talks to the provider.
    pub api_key: Option<String>,
    pub api_url: String,
    pub locale: String,
    pub rate_ttl: Duration,
    pub http_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = env::var("EXCHANGE_RATE_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let api_url = env::var("EXCHANGE_RATE_API_URL")
            .unwrap_or_else(|_| fx_client::DEFAULT_BASE_URL.to_string());

        let locale = env::var("FX_LOCALE").unwrap_or_else(|_| "en-US".to_string());

        let rate_ttl = secs_var("FX_RATE_TTL_SECS", 3600)?;
        let http_timeout = secs_var("FX_HTTP_TIMEOUT_SECS", 10)?;

        Ok(Self {
            api_key,
            api_url,
            locale,
            rate_ttl,
            http_timeout,
        })
    }

    /// Applies command-line flags on top of the environment.
    pub fn with_overrides(
        mut self,
        api_key: Option<String>,
        api_url: Option<String>,
        locale: Option<String>,
    ) -> Self {
        if let Some(api_key) = api_key {
            self.api_key = Some(api_key);
        }
        if let Some(api_url) = api_url {
            self.api_url = api_url;
        }
        if let Some(locale) = locale {
            self.locale = locale;
        }
        self
    }
}

fn secs_var(name: &str, default: u64) -> anyhow::Result<Duration> {
    match env::var(name) {
        Ok(raw) => parse_secs(&raw).with_context(|| format!("{} must be a number of seconds", name)),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}

fn parse_secs(raw: &str) -> anyhow::Result<Duration> {
    let secs: u64 = raw.trim().parse()?;
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config {
            api_key: None,
            api_url: fx_client::DEFAULT_BASE_URL.to_string(),
            locale: "en-US".to_string(),
            rate_ttl: Duration::from_secs(3600),
            http_timeout: Duration::from_secs(10),
        }
    }

    #[test]
    fn test_parse_secs() {
        assert_eq!(parse_secs(" 90 ").unwrap(), Duration::from_secs(90));
        assert!(parse_secs("-1").is_err());
        assert!(parse_secs("soon").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let config = base().with_overrides(
            Some("key".into()),
            None,
            Some("pt-BR".into()),
        );
        assert_eq!(config.api_key.as_deref(), Some("key"));
        assert_eq!(config.api_url, fx_client::DEFAULT_BASE_URL);
        assert_eq!(config.locale, "pt-BR");
    }

    #[test]
    fn test_missing_overrides_keep_env_values() {
        let mut env_config = base();
        env_config.api_key = Some("from-env".into());
        let config = env_config.with_overrides(None, None, None);
        assert_eq!(config.api_key.as_deref(), Some("from-env"));
    }
}
