use std::fs;
use std::path::Path;

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

pub static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub medpulse: String,
    pub reqwest: String,
}

impl LoggingConfig {
    const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
    const MEDPULSE_LEVEL: &str = "info";
    const REQWEST_LEVEL: &str = "warn";

    fn default() -> Self {
        LoggingConfig {
            medpulse: Self::MEDPULSE_LEVEL.to_string(),
            reqwest: Self::REQWEST_LEVEL.to_string(),
        }
    }

    fn ensure_valid(&mut self) {
        Self::ensure_valid_level(&mut self.medpulse, "medpulse", Self::MEDPULSE_LEVEL);
        Self::ensure_valid_level(&mut self.reqwest, "reqwest", Self::REQWEST_LEVEL);
    }

    fn ensure_valid_level(level: &mut String, name: &str, default: &str) {
        let str_original = level.clone();
        *level = level.trim().to_ascii_lowercase();
        if !Self::LOG_LEVELS.contains(&level.as_str()) {
            eprintln!(
                "Config error: {} log level of '{}' is invalid - using default of '{}'",
                name, str_original, default
            );
            *level = default.to_owned();
        }
    }

    /// flexi_logger spec string, e.g. `medpulse=info, reqwest=warn`
    pub fn log_spec(&self) -> String {
        format!("medpulse={}, reqwest={}", self.medpulse, self.reqwest)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    const BASE_URL: &str = "http://localhost:5000/api";
    const TIMEOUT_SECS: u64 = 30;

    fn default() -> Self {
        ApiConfig {
            base_url: Self::BASE_URL.to_owned(),
            timeout_secs: Self::TIMEOUT_SECS,
        }
    }

    fn ensure_valid(&mut self) {
        let trimmed = self.base_url.trim();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            eprintln!(
                "Config error: api base_url of '{}' is invalid - using default of '{}'",
                self.base_url,
                Self::BASE_URL
            );
            self.base_url = Self::BASE_URL.to_owned();
        } else {
            self.base_url = trimmed.to_owned();
        }

        if self.timeout_secs == 0 {
            eprintln!(
                "Config error: api timeout_secs must be greater than 0 - using default of {}",
                Self::TIMEOUT_SECS
            );
            self.timeout_secs = Self::TIMEOUT_SECS;
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AlertsConfig {
    pub limit: usize,
}

impl AlertsConfig {
    const LIMIT: usize = 50;

    fn default() -> Self {
        AlertsConfig { limit: Self::LIMIT }
    }

    fn ensure_valid(&mut self) {
        if self.limit == 0 {
            eprintln!(
                "Config error: alerts limit must be greater than 0 - using default of {}",
                Self::LIMIT
            );
            self.limit = Self::LIMIT;
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub logging: LoggingConfig,
    pub api: ApiConfig,
    pub alerts: AlertsConfig,
}

impl Config {
    const ENV_PREFIX: &str = "MEDPULSE_";

    pub fn default_config() -> Self {
        Config {
            logging: LoggingConfig::default(),
            api: ApiConfig::default(),
            alerts: AlertsConfig::default(),
        }
    }

    /// Loads the configuration from a TOML file located in the app's data directory,
    /// with `MEDPULSE_`-prefixed environment variables layered on top.
    /// Writes the default config to disk if no file exists.
    pub fn load_config(project_dirs: &ProjectDirs) -> Self {
        let config_path = project_dirs.data_local_dir().join("config.toml");
        Self::write_default_if_missing(&config_path);
        Self::load_from(&config_path)
    }

    fn write_default_if_missing(config_path: &Path) {
        if config_path.exists() {
            return;
        }

        if let Some(parent) = config_path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!(
                    "Failed to create configuration directory {}: {}",
                    parent.display(),
                    e
                );
            }
        }
        match toml::to_string_pretty(&Self::default_config()) {
            Ok(toml_string) => {
                if let Err(e) = fs::write(config_path, toml_string) {
                    eprintln!(
                        "Failed to write default config to {}: {}",
                        config_path.display(),
                        e
                    );
                }
            }
            Err(_) => eprintln!("Failed to serialize default config."),
        }
    }

    /// Merges defaults, the TOML file at `config_path` (if it exists) and the environment.
    /// On any extraction error the defaults are used.
    pub fn load_from(config_path: &Path) -> Self {
        let default_config = Self::default_config();

        let figment = Figment::from(Serialized::defaults(default_config.clone()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed(Self::ENV_PREFIX).split("__"));

        let mut config = figment.extract().unwrap_or_else(|err| {
            eprintln!(
                "Could not load config file {}: {}. Using default configuration.",
                config_path.display(),
                err
            );
            default_config
        });

        config.ensure_valid();

        config
    }

    fn ensure_valid(&mut self) {
        self.logging.ensure_valid();
        self.api.ensure_valid();
        self.alerts.ensure_valid();
    }

    fn get() -> &'static Config {
        CONFIG.get_or_init(Config::default_config)
    }

    pub fn get_api_base_url() -> String {
        Self::get().api.base_url.clone()
    }

    pub fn get_api_timeout_secs() -> u64 {
        Self::get().api.timeout_secs
    }

    pub fn get_alert_limit() -> usize {
        Self::get().alerts.limit
    }
}
