use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "neighborhood.toml",
    "config/neighborhood.toml",
    "crates/config/neighborhood.toml",
    "../neighborhood.toml",
    "../config/neighborhood.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub locale: LocaleConfig,
    #[serde(default)]
    pub manner: MannerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 7070,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://neighborhood.db".to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "AuthConfig::default_session_ttl")]
    pub session_ttl_seconds: u64,
    #[serde(default = "AuthConfig::default_login_token_ttl")]
    pub login_token_ttl_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_seconds: Self::default_session_ttl(),
            login_token_ttl_seconds: Self::default_login_token_ttl(),
        }
    }
}

impl AuthConfig {
    const fn default_session_ttl() -> u64 {
        86_400 * 14
    }

    const fn default_login_token_ttl() -> u64 {
        600
    }
}

/// Display settings for dates shown to users.
///
/// ```
/// use neighborhood_config::LocaleConfig;
///
/// let locale = LocaleConfig::default();
/// assert_eq!(locale.utc_offset_minutes, 540);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    #[serde(default = "LocaleConfig::default_offset")]
    pub utc_offset_minutes: i32,
}

impl LocaleConfig {
    const fn default_offset() -> i32 {
        9 * 60
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: Self::default_offset(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MannerConfig {
    #[serde(default = "MannerConfig::default_initial_degree")]
    pub initial_degree: f64,
}

impl MannerConfig {
    const fn default_initial_degree() -> f64 {
        36.5
    }
}

impl Default for MannerConfig {
    fn default() -> Self {
        Self {
            initial_degree: Self::default_initial_degree(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use neighborhood_config::load;
///
/// std::env::remove_var("NEIGHBORHOOD_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let session_ttl = clamp_to_i64(defaults.auth.session_ttl_seconds);
    let login_token_ttl = clamp_to_i64(defaults.auth.login_token_ttl_seconds);

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default("database.url", defaults.database.url.clone())?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )?
        .set_default("auth.session_ttl_seconds", session_ttl)?
        .set_default("auth.login_token_ttl_seconds", login_token_ttl)?
        .set_default(
            "locale.utc_offset_minutes",
            i64::from(defaults.locale.utc_offset_minutes),
        )?
        .set_default("manner.initial_degree", defaults.manner.initial_degree)?;

    let environment_overrides =
        config::Environment::with_prefix("NEIGHBORHOOD").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("NEIGHBORHOOD_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via NEIGHBORHOOD_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    config.auth.session_ttl_seconds = config.auth.session_ttl_seconds.min(i64::MAX as u64);
    config.auth.login_token_ttl_seconds =
        config.auth.login_token_ttl_seconds.min(i64::MAX as u64);

    debug!(?config, "loaded backend configuration");
    Ok(config)
}

fn clamp_to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
