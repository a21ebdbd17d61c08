use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub app_name: String,
    pub app_version: String,
    /// Token accepted by the demo bearer verifier.
    pub api_token: Option<String>,
    pub log: LogConfig,
}

/// Where and how logs are written
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub file: PathBuf,
    pub rotation: LogRotation,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Never,
    Minutely,
    Hourly,
    Daily,
}

/// Output format of the log file; the console is always compact text.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Text,
}

impl LogRotation {
    fn parse(value: &str) -> Result<Self, config::ConfigError> {
        match value.to_ascii_lowercase().as_str() {
            "never" => Ok(Self::Never),
            "minutely" => Ok(Self::Minutely),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            other => Err(config::ConfigError::Message(format!(
                "LOG_ROTATION must be one of never, minutely, hourly, daily (got '{other}')"
            ))),
        }
    }
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, config::ConfigError> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            other => Err(config::ConfigError::Message(format!(
                "LOG_FORMAT must be json or text (got '{other}')"
            ))),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: PathBuf::from("logs/app.log"),
            rotation: LogRotation::Daily,
            format: LogFormat::Json,
        }
    }
}

impl LogConfig {
    fn from_config(cfg: &config::Config) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        let rotation = match cfg.get_string("LOG_ROTATION") {
            Ok(value) => LogRotation::parse(&value)?,
            Err(_) => defaults.rotation,
        };
        let format = match cfg.get_string("LOG_FORMAT") {
            Ok(value) => LogFormat::parse(&value)?,
            Err(_) => defaults.format,
        };

        Ok(Self {
            level: cfg.get_string("LOG_LEVEL").unwrap_or(defaults.level),
            file: cfg.get_string("LOG_FILE").map(PathBuf::from).unwrap_or(defaults.file),
            rotation,
            format,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();

        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?;

        Self::from_config(&cfg)
    }

    fn from_config(cfg: &config::Config) -> Result<Self, config::ConfigError> {
        let port = match cfg.get_int("PORT") {
            Ok(port) => u16::try_from(port).map_err(|_| {
                config::ConfigError::Message(format!("PORT out of range: {port}"))
            })?,
            Err(_) => 3000,
        };
        let api_token = cfg.get_string("API_TOKEN").ok().filter(|t| !t.is_empty());

        Ok(Self {
            host: cfg.get_string("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            environment: cfg.get_string("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            app_name: cfg.get_string("APP_NAME").unwrap_or_else(|_| "api-wrapper".to_string()),
            app_version: cfg.get_string("APP_VERSION").unwrap_or_else(|_| "0.1.0".to_string()),
            api_token,
            log: LogConfig::from_config(cfg)?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
