//! Tracing initialisation from [`LoggingConfig`].

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use plm_config::{LogFormat, LoggingConfig};

use crate::error::PlmError;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. When a log
/// directory is configured, output is also written to a daily rolling file
/// and the returned guard must be held for as long as logs should be
/// flushed.
pub fn init_tracing(config: &LoggingConfig) -> Result<Option<WorkerGuard>, PlmError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.level.trim()))
        .map_err(|e| PlmError::Logging(e.to_string()))?;

    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);
    layers.push(match config.format {
        LogFormat::Pretty => fmt::layer().with_target(true).boxed(),
        LogFormat::Json => fmt::layer().json().boxed(),
    });

    let guard = match &config.directory {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("plm")
                .filename_suffix("log")
                .max_log_files(30)
                .build(dir)
                .map_err(|e| PlmError::Logging(e.to_string()))?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            layers.push(
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .boxed(),
            );
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .map_err(|e| PlmError::Logging(e.to_string()))?;

    Ok(guard)
}
