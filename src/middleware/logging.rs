use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing::Subscriber;
use tracing_subscriber::{
    filter::ParseError, fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
    util::TryInitError, EnvFilter, Layer,
};

use crate::config::{LogConfig, LogFormat, LogRotation};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("log file path has no file name: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("failed to create log directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to open log file: {0}")]
    Appender(#[from] InitError),

    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("logging already initialized: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Never => Rotation::NEVER,
            LogRotation::Minutely => Rotation::MINUTELY,
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Daily => Rotation::DAILY,
        }
    }
}

/// Open a rolling appender for `path`, creating its directory if needed.
///
/// With [`LogRotation::Never`] the file is exactly `path`; otherwise the
/// rotation date is appended to the file name.
pub fn file_appender(path: &Path, rotation: LogRotation) -> Result<RollingFileAppender, LoggingError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| LoggingError::InvalidPath(path.to_path_buf()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(rotation.into())
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)?;
    Ok(appender)
}

/// File layer writing `format` records without ANSI colours.
pub fn file_layer<S>(format: LogFormat, appender: RollingFileAppender) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    let layer = fmt::layer().with_writer(appender).with_target(true).with_ansi(false);
    match format {
        LogFormat::Json => layer.json().boxed(),
        LogFormat::Text => layer.boxed(),
    }
}

/// Setup logging with console and rotating file output
pub fn setup_logging(config: &LogConfig) -> Result<(), LoggingError> {
    let appender = file_appender(&config.file, config.rotation)?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)?,
    };

    // Console layer
    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer(config.format, appender))
        .try_init()?;

    tracing::info!(
        file = %config.file.display(),
        "Logging initialized with level: {}",
        config.level
    );
    Ok(())
}
