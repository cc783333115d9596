use courtside_api::client::DEFAULT_BASE_URL;
use log::LevelFilter;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_API_URL: &str = "COURTSIDE_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "COURTSIDE_TIMEOUT_SECS";
pub const ENV_LOG: &str = "COURTSIDE_LOG";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub api_url: String,
    pub timeout: Option<Duration>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            api_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Blank or malformed values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            full_screen: false,
            log_level: get(ENV_LOG).and_then(|v| LevelFilter::from_str(&v).ok()),
            api_url: get(ENV_API_URL).unwrap_or(defaults.api_url),
            timeout: get(ENV_TIMEOUT_SECS)
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let settings = AppSettings::from_lookup(lookup(&[]));
        assert_eq!(settings.api_url, DEFAULT_BASE_URL);
        assert!(settings.timeout.is_none());
        assert!(settings.log_level.is_none());
    }

    #[test]
    fn reads_overrides() {
        let settings = AppSettings::from_lookup(lookup(&[
            (ENV_API_URL, "https://games.example.com"),
            (ENV_TIMEOUT_SECS, "15"),
            (ENV_LOG, "debug"),
        ]));
        assert_eq!(settings.api_url, "https://games.example.com");
        assert_eq!(settings.timeout, Some(Duration::from_secs(15)));
        assert_eq!(settings.log_level, Some(LevelFilter::Debug));
    }

    #[test]
    fn malformed_values_are_ignored() {
        let settings = AppSettings::from_lookup(lookup(&[
            (ENV_API_URL, "   "),
            (ENV_TIMEOUT_SECS, "soon"),
            (ENV_LOG, "loud"),
        ]));
        assert_eq!(settings.api_url, DEFAULT_BASE_URL);
        assert!(settings.timeout.is_none());
        assert!(settings.log_level.is_none());
    }
}
