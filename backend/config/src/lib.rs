//! SnapSolve runtime configuration.
//!
//! Loaded once at startup from environment variables (with `.env` support)
//! and passed explicitly into each component. Never mutated afterwards.

use std::collections::HashMap;
use std::fmt;

use anyhow::{bail, Result};
use serde::Deserialize;

/// Which vision backend the inference client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gemini,
    OpenAi,
}

/// Process-wide immutable configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// API key for the vision provider.
    pub api_key: String,
    /// Vision backend to use.
    pub provider: Provider,
    /// Model identifier passed to the provider.
    pub model: String,
    /// HTTP server bind address.
    pub bind_address: String,
    /// HTTP server port.
    pub port: u16,
    /// Base URL of the live currency-rate service (`{base}/{FROM}`).
    pub rates_base_url: String,
    /// Default log level when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Reads a `.env` file first if one is present. Fails when the API key
    /// is missing; everything else has a sensible default.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_vars(&std::env::vars().collect())
    }

    /// Load configuration from an explicit variable map (useful for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let api_key = vars
            .get("SNAPSOLVE_API_KEY")
            .or_else(|| vars.get("GEMINI_API_KEY"))
            .filter(|v| !v.is_empty())
            .cloned();
        let Some(api_key) = api_key else {
            bail!("SNAPSOLVE_API_KEY (or GEMINI_API_KEY) is missing; check your environment or .env file");
        };

        let provider = match vars.get("SNAPSOLVE_PROVIDER").map(String::as_str) {
            None | Some("gemini") => Provider::Gemini,
            Some("openai") => Provider::OpenAi,
            Some(other) => bail!("unknown provider {other:?}; expected \"gemini\" or \"openai\""),
        };

        let model = vars
            .get("SNAPSOLVE_MODEL")
            .cloned()
            .unwrap_or_else(|| default_model(provider).to_string());

        let port = match vars.get("SNAPSOLVE_PORT") {
            Some(raw) => match raw.parse() {
                Ok(p) => p,
                Err(_) => bail!("SNAPSOLVE_PORT is not a valid port number: {raw:?}"),
            },
            None => 8000,
        };

        Ok(Self {
            api_key,
            provider,
            model,
            bind_address: vars
                .get("SNAPSOLVE_BIND")
                .cloned()
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            rates_base_url: vars
                .get("SNAPSOLVE_RATES_URL")
                .cloned()
                .unwrap_or_else(|| "https://open.er-api.com/v6/latest".to_string()),
            log_level: vars
                .get("RUST_LOG")
                .cloned()
                .unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn default_model(provider: Provider) -> &'static str {
    match provider {
        Provider::Gemini => "gemini-1.5-flash",
        Provider::OpenAi => "gpt-4o",
    }
}

// Keep the API key out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("bind_address", &self.bind_address)
            .field("port", &self.port)
            .field("rates_base_url", &self.rates_base_url)
            .field("log_level", &self.log_level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let err = Config::from_vars(&HashMap::new()).unwrap_err();
        assert!(err.to_string().contains("SNAPSOLVE_API_KEY"));
    }

    #[test]
    fn defaults_applied() {
        let config = Config::from_vars(&vars(&[("GEMINI_API_KEY", "k-123")])).unwrap();
        assert_eq!(config.provider, Provider::Gemini);
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.port, 8000);
        assert_eq!(config.bind_address, "0.0.0.0");
    }

    #[test]
    fn openai_provider_selected() {
        let config = Config::from_vars(&vars(&[
            ("SNAPSOLVE_API_KEY", "k-123"),
            ("SNAPSOLVE_PROVIDER", "openai"),
        ]))
        .unwrap();
        assert_eq!(config.provider, Provider::OpenAi);
        assert_eq!(config.model, "gpt-4o");
    }

    #[test]
    fn invalid_port_rejected() {
        let result = Config::from_vars(&vars(&[
            ("SNAPSOLVE_API_KEY", "k-123"),
            ("SNAPSOLVE_PORT", "not-a-port"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = Config::from_vars(&vars(&[("SNAPSOLVE_API_KEY", "super-secret")])).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
