use crate::core::error::PipelineError;
use crate::core::exchange::DollarMarket;
use crate::core::i18n::Language;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

/// Environment variable consulted when the BCRA token is not in the config file.
pub const BCRA_TOKEN_ENV: &str = "BCRA_API_TOKEN";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatosGobProviderConfig {
    pub base_url: String,
    #[serde(default = "default_general_series_id")]
    pub general_series_id: String,
    #[serde(default = "default_core_series_id")]
    pub core_series_id: String,
}

fn default_general_series_id() -> String {
    "145.3_INGNACUAL_DICI_M_38".to_string()
}

fn default_core_series_id() -> String {
    "173.1_INUCLEOLEO_DIC-_0_10".to_string()
}

impl Default for DatosGobProviderConfig {
    fn default() -> Self {
        DatosGobProviderConfig {
            base_url: "https://apis.datos.gob.ar/series/api".to_string(),
            general_series_id: default_general_series_id(),
            core_series_id: default_core_series_id(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BcraProviderConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl Default for BcraProviderConfig {
    fn default() -> Self {
        BcraProviderConfig {
            base_url: "https://api.estadisticasbcra.com".to_string(),
            token: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DolarApiProviderConfig {
    pub base_url: String,
}

impl Default for DolarApiProviderConfig {
    fn default() -> Self {
        DolarApiProviderConfig {
            base_url: "https://dolarapi.com/v1".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub datos_gob: DatosGobProviderConfig,
    #[serde(default)]
    pub bcra: BcraProviderConfig,
    #[serde(default)]
    pub dolar_api: DolarApiProviderConfig,
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_parallel_market() -> DollarMarket {
    DollarMarket::Mep
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub language: Language,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Entries never expire within a session when unset.
    pub cache_ttl_secs: Option<u64>,
    #[serde(default = "default_parallel_market")]
    pub parallel_market: DollarMarket,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            language: Language::default(),
            request_timeout_secs: default_request_timeout_secs(),
            cache_ttl_secs: None,
            parallel_market: default_parallel_market(),
            providers: ProvidersConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config at the default location, falling back to built-in
    /// defaults when no file exists there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("ar", "econmind", "econmind")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_secs.map(Duration::from_secs)
    }

    /// BCRA bearer token from the config file, else from `BCRA_API_TOKEN`.
    pub fn bcra_token(&self) -> Result<String, PipelineError> {
        let from_env = std::env::var(BCRA_TOKEN_ENV).ok();
        Self::resolve_token(self.providers.bcra.token.as_deref(), from_env.as_deref())
    }

    fn resolve_token(configured: Option<&str>, from_env: Option<&str>) -> Result<String, PipelineError> {
        let non_blank = |token: &str| {
            let token = token.trim();
            (!token.is_empty()).then(|| token.to_string())
        };
        configured
            .and_then(non_blank)
            .or_else(|| from_env.and_then(non_blank))
            .ok_or_else(|| {
                PipelineError::ConfigurationMissing(format!(
                    "BCRA API token (set providers.bcra.token or {BCRA_TOKEN_ENV})"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
language: en
request_timeout_secs: 5
cache_ttl_secs: 600
parallel_market: blue
providers:
  datos_gob:
    base_url: "http://example.com/series"
  bcra:
    base_url: "http://example.com/bcra"
    token: "secret"
  dolar_api:
    base_url: "http://example.com/dolar"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.language, Language::En);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.cache_ttl(), Some(Duration::from_secs(600)));
        assert_eq!(config.parallel_market, DollarMarket::Blue);
        assert_eq!(config.providers.datos_gob.base_url, "http://example.com/series");
        assert_eq!(
            config.providers.datos_gob.general_series_id,
            "145.3_INGNACUAL_DICI_M_38"
        );
        assert_eq!(config.providers.bcra.token.as_deref(), Some("secret"));
        assert_eq!(config.providers.dolar_api.base_url, "http://example.com/dolar");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config.language, Language::Es);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.cache_ttl().is_none());
        assert_eq!(config.parallel_market, DollarMarket::Mep);
        assert_eq!(config.providers.dolar_api.base_url, "https://dolarapi.com/v1");
        assert_eq!(
            config.providers.bcra.base_url,
            "https://api.estadisticasbcra.com"
        );
    }

    #[test]
    fn test_token_resolution() {
        assert_eq!(
            AppConfig::resolve_token(Some("file"), Some("env")).unwrap(),
            "file"
        );
        assert_eq!(AppConfig::resolve_token(None, Some("env")).unwrap(), "env");
        assert!(matches!(
            AppConfig::resolve_token(Some("  "), None),
            Err(PipelineError::ConfigurationMissing(_))
        ));
        assert_eq!(
            AppConfig::resolve_token(Some("   "), Some(" env-token ")).unwrap(),
            "env-token"
        );
        assert_eq!(AppConfig::resolve_token(Some(""), Some("env")).unwrap(), "env");
        assert!(AppConfig::resolve_token(None, None).is_err());
    }
}
