//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Local session store configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Expense submission rules.
    #[serde(default)]
    pub expenses: ExpenseConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

fn default_min_connections() -> u32 {
    1
}

/// Local session store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// File backing the local key-value store.
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
    /// Wipe the whole local store on logout instead of only the role key.
    #[serde(default = "default_clear_all_on_logout")]
    pub clear_all_on_logout: bool,
}

fn default_session_path() -> PathBuf {
    PathBuf::from(".trackfest/session.json")
}

fn default_clear_all_on_logout() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
            clear_all_on_logout: default_clear_all_on_logout(),
        }
    }
}

/// Expense submission rules.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseConfig {
    /// Reject submissions without a submitter name.
    #[serde(default = "default_require_submitter_name")]
    pub require_submitter_name: bool,
    /// Largest inline image payload accepted, in encoded bytes.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
}

fn default_require_submitter_name() -> bool {
    true
}

fn default_max_image_bytes() -> usize {
    1_000_000 // stored documents are capped near 1 MiB
}

impl Default for ExpenseConfig {
    fn default() -> Self {
        Self {
            require_submitter_name: default_require_submitter_name(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from config files and the environment.
    ///
    /// Sources, lowest precedence first: `config/default`, `config/{RUN_MODE}`,
    /// then `TRACKFEST__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        layered_sources()?.try_deserialize()
    }

    /// Loads only the `session` section, from the same sources as [`AppConfig::load`].
    ///
    /// Does not require database settings. A missing section yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or the section is malformed.
    pub fn load_session() -> Result<SessionConfig, config::ConfigError> {
        match layered_sources()?.get::<SessionConfig>("session") {
            Err(config::ConfigError::NotFound(_)) => Ok(SessionConfig::default()),
            result => result,
        }
    }
}

fn layered_sources() -> Result<config::Config, config::ConfigError> {
    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

    config::Config::builder()
        .add_source(config::File::with_name("config/default").required(false))
        .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
        .add_source(
            config::Environment::with_prefix("TRACKFEST")
                .separator("__")
                .try_parsing(true),
        )
        .build()
}
