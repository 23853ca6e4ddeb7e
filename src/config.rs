use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub appwrite: AppwriteSettings,
    pub collection: CollectionSettings,
    #[serde(default)]
    pub oracle: OracleSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppwriteSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    pub user_profiles: String,
    pub mentorship_requests: String,
}

/// Generative-language oracle settings
///
/// The oracle is optional: without an API key the service runs on
/// deterministic scoring alone.
#[derive(Debug, Clone, Deserialize)]
pub struct OracleSettings {
    #[serde(default = "default_oracle_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_oracle_model")]
    pub model: String,
    #[serde(default = "default_oracle_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            endpoint: default_oracle_endpoint(),
            api_key: None,
            model: default_oracle_model(),
            timeout_secs: default_oracle_timeout_secs(),
        }
    }
}

fn default_oracle_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_oracle_model() -> String {
    "gemini-1.5-flash".to_string()
}
fn default_oracle_timeout_secs() -> u64 {
    6
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_shortlist_size")]
    pub shortlist_size: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    #[serde(default = "default_oracle_concurrency")]
    pub oracle_concurrency: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            shortlist_size: default_shortlist_size(),
            max_limit: default_max_limit(),
            oracle_concurrency: default_oracle_concurrency(),
        }
    }
}

fn default_shortlist_size() -> usize {
    10
}
fn default_max_limit() -> usize {
    25
}
fn default_oracle_concurrency() -> usize {
    5
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_tier_points")]
    pub tier_points: u32,
    #[serde(default = "default_skill_points")]
    pub skill_points: u32,
    #[serde(default = "default_ai_blend")]
    pub ai_blend: f64,
    #[serde(default = "default_college_boost")]
    pub college_boost: f64,
    #[serde(default = "default_district_boost")]
    pub district_boost: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            tier_points: default_tier_points(),
            skill_points: default_skill_points(),
            ai_blend: default_ai_blend(),
            college_boost: default_college_boost(),
            district_boost: default_district_boost(),
        }
    }
}

fn default_tier_points() -> u32 {
    60
}
fn default_skill_points() -> u32 {
    40
}
fn default_ai_blend() -> f64 {
    0.5
}
fn default_college_boost() -> f64 {
    1.2
}
fn default_district_boost() -> f64 {
    1.1
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with DISHA_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with DISHA_)
            // e.g., DISHA_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("DISHA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Substitute well-known environment variables for secrets
        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("DISHA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Substitute secrets from their conventional environment variables
///
/// Appwrite credentials come from DISHA_APPWRITE__* and the oracle key
/// falls back to GEMINI_API_KEY, so deployments don't have to duplicate it.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let appwrite_endpoint = env::var("DISHA_APPWRITE__ENDPOINT").ok();
    let appwrite_api_key = env::var("DISHA_APPWRITE__API_KEY").ok();
    let appwrite_project_id = env::var("DISHA_APPWRITE__PROJECT_ID").ok();
    let appwrite_database_id = env::var("DISHA_APPWRITE__DATABASE_ID").ok();

    let oracle_api_key = env::var("DISHA_ORACLE__API_KEY")
        .or_else(|_| env::var("GEMINI_API_KEY"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(endpoint) = appwrite_endpoint {
        builder = builder.set_override("appwrite.endpoint", endpoint)?;
    }
    if let Some(api_key) = appwrite_api_key {
        builder = builder.set_override("appwrite.api_key", api_key)?;
    }
    if let Some(project_id) = appwrite_project_id {
        builder = builder.set_override("appwrite.project_id", project_id)?;
    }
    if let Some(database_id) = appwrite_database_id {
        builder = builder.set_override("appwrite.database_id", database_id)?;
    }
    if let Some(api_key) = oracle_api_key {
        builder = builder.set_override("oracle.api_key", api_key)?;
    }

    builder.build()
}
