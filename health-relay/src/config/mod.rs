use secrecy::Secret;
use service_core::config::{self as core_config, get_env, split_list};
use service_core::error::AppError;
use std::env;
use std::time::Duration;

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_CLINICAL_TABLES_URL: &str = "https://clinicaltables.nlm.nih.gov";
const DEFAULT_OPENFDA_URL: &str = "https://api.fda.gov";
const DEFAULT_UPSTREAM_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_OPENFDA_RESULT_LIMIT: u32 = 5;
const DEFAULT_SERVICE_NAME: &str = "health-relay";

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    /// OTLP collector; trace export is disabled when unset.
    pub otlp_endpoint: Option<String>,
    pub gemini: GeminiSettings,
    pub medical: MedicalSettings,
    pub security: SecuritySettings,
    pub upstream_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    pub model: String,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct MedicalSettings {
    pub clinical_tables_url: String,
    pub openfda_url: String,
    pub openfda_result_limit: u32,
}

#[derive(Debug, Clone)]
pub struct SecuritySettings {
    /// Origins permitted to make cross-origin requests.
    pub allowed_origins: Vec<String>,
}

impl RelayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let upstream_timeout_seconds: u64 = get_env(
            "UPSTREAM_TIMEOUT_SECONDS",
            Some(&DEFAULT_UPSTREAM_TIMEOUT_SECONDS.to_string()),
            is_prod,
        )?
        .parse()
        .map_err(|e: std::num::ParseIntError| {
            AppError::ConfigError(anyhow::anyhow!("UPSTREAM_TIMEOUT_SECONDS: {}", e))
        })?;

        let openfda_result_limit: u32 = get_env(
            "OPENFDA_RESULT_LIMIT",
            Some(&DEFAULT_OPENFDA_RESULT_LIMIT.to_string()),
            is_prod,
        )?
        .parse()
        .map_err(|e: std::num::ParseIntError| {
            AppError::ConfigError(anyhow::anyhow!("OPENFDA_RESULT_LIMIT: {}", e))
        })?;

        Ok(RelayConfig {
            common: common_config,
            service_name: env::var("SERVICE_NAME")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            gemini: GeminiSettings {
                api_key: Secret::new(get_env("GOOGLE_API_KEY", Some(""), is_prod)?),
                model: get_env("GEMINI_MODEL", Some("gemini-2.0-flash"), is_prod)?,
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE), is_prod)?,
            },
            medical: MedicalSettings {
                clinical_tables_url: get_env(
                    "CLINICAL_TABLES_URL",
                    Some(DEFAULT_CLINICAL_TABLES_URL),
                    is_prod,
                )?,
                openfda_url: get_env("OPENFDA_URL", Some(DEFAULT_OPENFDA_URL), is_prod)?,
                openfda_result_limit,
            },
            security: SecuritySettings {
                allowed_origins: split_list(&get_env(
                    "ALLOWED_ORIGINS",
                    Some("http://localhost:3000"),
                    is_prod,
                )?),
            },
            upstream_timeout: Duration::from_secs(upstream_timeout_seconds),
        })
    }
}
