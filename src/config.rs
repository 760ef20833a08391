use anyhow::{bail, Context, Result};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::transport::DEFAULT_TIMEOUT;

#[derive(Clone)]
pub struct Config {
    // DeepL
    pub api_key: String,
    pub free: bool,
    pub api_url: Option<String>,

    // Transport
    pub timeout: Duration,

    // Cache
    pub cache_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("DEEPL_API_KEY")
            .context("DEEPL_API_KEY not set")?
            .trim()
            .to_string();
        if api_key.is_empty() {
            bail!("DEEPL_API_KEY is empty");
        }

        Ok(Self {
            api_key,
            free: std::env::var("DEEPL_FREE")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            api_url: std::env::var("DEEPL_API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),

            timeout: std::env::var("DEEPL_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),

            cache_dir: std::env::var("DEEPL_CACHE_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("free", &self.free)
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .field("cache_dir", &self.cache_dir)
            .finish()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "DEEPL_API_KEY",
        "DEEPL_FREE",
        "DEEPL_API_URL",
        "DEEPL_TIMEOUT_SECS",
        "DEEPL_CACHE_DIR",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_requires_api_key() {
        clear_env();
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("DEEPL_API_KEY"));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_blank_api_key() {
        clear_env();
        std::env::set_var("DEEPL_API_KEY", "   ");
        assert!(Config::from_env().is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        std::env::set_var("DEEPL_API_KEY", " abc:fx ");

        let config = Config::from_env().expect("Should load");
        assert_eq!(config.api_key, "abc:fx");
        assert!(!config.free);
        assert_eq!(config.api_url, None);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.cache_dir, None);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("DEEPL_API_KEY", "abc");
        std::env::set_var("DEEPL_FREE", "TRUE");
        std::env::set_var("DEEPL_API_URL", "http://localhost:9000/v2/translate");
        std::env::set_var("DEEPL_TIMEOUT_SECS", "12");
        std::env::set_var("DEEPL_CACHE_DIR", "/var/cache/deepl");

        let config = Config::from_env().expect("Should load");
        assert!(config.free);
        assert_eq!(
            config.api_url.as_deref(),
            Some("http://localhost:9000/v2/translate")
        );
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.cache_dir, Some(PathBuf::from("/var/cache/deepl")));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_unparseable_timeout() {
        clear_env();
        std::env::set_var("DEEPL_API_KEY", "abc");
        std::env::set_var("DEEPL_TIMEOUT_SECS", "soon");

        let config = Config::from_env().expect("Should load");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        clear_env();
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" Yes "));
        assert!(parse_flag("on"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config {
            api_key: "super-secret".to_string(),
            free: false,
            api_url: None,
            timeout: DEFAULT_TIMEOUT,
            cache_dir: None,
        };
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
