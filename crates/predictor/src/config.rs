use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct PredictorConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub user_agent: String,
}

impl PredictorConfig {
    /// Reads `PREDICTION_API_URL`, `PREDICTION_TIMEOUT_SECS` and
    /// `PREDICTION_USER_AGENT`, falling back to defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("PREDICTION_API_URL") {
            config = config.with_base_url(&url)?;
        }
        if let Some(secs) = lookup("PREDICTION_TIMEOUT_SECS") {
            config = config.with_timeout_secs(&secs)?;
        }
        if let Some(agent) = lookup("PREDICTION_USER_AGENT") {
            config.user_agent = agent;
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(raw).map_err(|e| ConfigError::InvalidEndpoint {
            value: raw.to_string(),
            reason: e.to_string(),
        })?;

        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint {
                value: raw.to_string(),
                reason: "expected an http(s) base URL".to_string(),
            });
        }

        self.base_url = url;
        Ok(self)
    }

    pub fn with_timeout_secs(mut self, raw: &str) -> Result<Self, ConfigError> {
        let secs = raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| ConfigError::InvalidTimeout(raw.to_string()))?;

        self.timeout = Duration::from_secs(secs);
        Ok(self)
    }

    /// `{base_url}/predict`, keeping any path prefix the base URL carries.
    pub fn predict_url(&self) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}/predict", url.path().trim_end_matches('/'));
        url.set_path(&path);
        url.set_query(None);
        url
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("smart_trader/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_is_empty() {
        let config = PredictorConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("smart_trader/"));
        assert_eq!(config.predict_url().as_str(), "http://localhost:8000/predict");
    }

    #[test]
    fn test_env_overrides() {
        let config = PredictorConfig::from_lookup(lookup_from(&[
            ("PREDICTION_API_URL", "https://stock-predictor-backend.onrender.com"),
            ("PREDICTION_TIMEOUT_SECS", "3"),
            ("PREDICTION_USER_AGENT", "console-test"),
        ]))
        .unwrap();

        assert_eq!(
            config.predict_url().as_str(),
            "https://stock-predictor-backend.onrender.com/predict"
        );
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.user_agent, "console-test");
    }

    #[test]
    fn test_predict_url_keeps_path_prefix() {
        let config = PredictorConfig::default()
            .with_base_url("http://gateway.local/api/v1/")
            .unwrap();
        assert_eq!(config.predict_url().as_str(), "http://gateway.local/api/v1/predict");
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = PredictorConfig::from_lookup(lookup_from(&[("PREDICTION_API_URL", "not a url")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));

        let err = PredictorConfig::default().with_base_url("ftp://example.com").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));

        for secs in ["0", "-1", "ten"] {
            let err = PredictorConfig::default().with_timeout_secs(secs).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidTimeout(_)), "`{secs}` should be rejected");
        }
    }
}
