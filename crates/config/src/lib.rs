use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "roster.toml",
    "config/roster.toml",
    "crates/config/roster.toml",
    "../roster.toml",
    "../config/roster.toml",
    "../crates/config/roster.toml",
];

/// Environment variable pointing at an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "ROSTER_CONFIG";

const ENV_PREFIX: &str = "ROSTER";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
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
            port: 3000,
        }
    }
}

impl HttpConfig {
    /// `address:port` string suitable for binding a listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
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
            url: "sqlite://roster.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Log filter used when `RUST_LOG` is not set.
///
/// ```
/// use roster_config::LoggingConfig;
///
/// assert_eq!(LoggingConfig::default().filter, "info");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_filter")]
    pub filter: String,
}

impl LoggingConfig {
    fn default_filter() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: Self::default_filter(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// Precedence, lowest first: built-in defaults, the configuration file, the plain
/// `PORT` / `DATABASE_URL` variables, then `ROSTER__SECTION__KEY` variables.
///
/// ```
/// use roster_config::load;
///
/// std::env::remove_var("ROSTER_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default("database.url", defaults.database.url.clone())?
        .set_default(
            "database.max_connections",
            i64::from(defaults.database.max_connections),
        )?
        .set_default("logging.filter", defaults.logging.filter.clone())?;

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via ROSTER_CONFIG");
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

    builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    apply_plain_overrides(&mut config)?;

    debug!(?config, "loaded backend configuration");
    Ok(config)
}

/// `PORT` and `DATABASE_URL` are honoured unless the prefixed variable is present.
fn apply_plain_overrides(config: &mut AppConfig) -> anyhow::Result<()> {
    if std::env::var("ROSTER__HTTP__PORT").is_err() {
        if let Ok(port) = std::env::var("PORT") {
            config.http.port = port
                .trim()
                .parse()
                .with_context(|| format!("invalid configuration: PORT={port}"))?;
        }
    }

    if std::env::var("ROSTER__DATABASE__URL").is_err() {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = url;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_address_joins_host_and_port() {
        let http = HttpConfig {
            address: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(http.bind_address(), "0.0.0.0:8080");
    }
}
