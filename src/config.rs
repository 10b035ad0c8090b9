//! Application-level configuration loading: backing store selection and listen port.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "PLAYER_LEAGUE_CONFIG_PATH";
/// Environment variable that overrides the league document location.
const DATABASE_PATH_ENV: &str = "PLAYER_LEAGUE_DB";
/// League document used when nothing else is configured.
const DEFAULT_DATABASE_PATH: &str = "game.db.json";
const DEFAULT_PORT: u16 = 8080;

/// Which [`PlayerStore`](crate::dao::player_store::PlayerStore) backs the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// JSON document on disk.
    #[default]
    File,
    /// Volatile in-memory league.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Location of the league document.
    pub database_path: PathBuf,
    /// TCP port for the HTTP server.
    pub port: u16,
    /// Selected store backend.
    pub backend: StoreBackend,
}

impl AppConfig {
    /// Load the configuration from disk and apply environment overrides.
    ///
    /// Missing or unreadable files fall back to built-in defaults.
    pub fn load() -> Self {
        let mut config = Self::load_file();

        if let Some(path) = env::var_os(DATABASE_PATH_ENV).filter(|value| !value.is_empty()) {
            config.database_path = PathBuf::from(path);
        }

        if let Some(port) = env::var("PORT")
            .or_else(|_| env::var("SERVER_PORT"))
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
        {
            config.port = port;
        }

        config
    }

    fn load_file() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    info!(
                        path = %path.display(),
                        database = %config.database_path.display(),
                        backend = ?config.backend,
                        "loaded configuration"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a JSON configuration document; absent fields take their defaults.
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            port: DEFAULT_PORT,
            backend: StoreBackend::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    database_path: Option<PathBuf>,
    port: Option<u16>,
    backend: Option<StoreBackend>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            database_path: value.database_path.unwrap_or(defaults.database_path),
            port: value.port.unwrap_or(defaults.port),
            backend: value.backend.unwrap_or(defaults.backend),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
