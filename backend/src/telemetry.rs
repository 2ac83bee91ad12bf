//! Structured logging initialisation.
//!
//! The logger is one of the two process-wide resources guarded by
//! [`InitOnce`](crate::bootstrap::InitOnce): the subscriber is installed by
//! exactly one initialisation attempt and every caller observes that
//! attempt's outcome. Level comes from `RUST_LOG` when set, falling back to
//! the configured default; encoding is JSON or human-readable console
//! output; the sink is standard output or an appended file, and a file that
//! cannot be opened is a hard initialisation failure.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::bootstrap::InitOnce;
use crate::config::{LogFormat, LogOutput, LogSettings};

/// Failures raised while initialising the logger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TelemetryError {
    /// The level directive could not be parsed.
    #[error("invalid log filter: {message}")]
    Filter { message: String },
    /// The configured file sink could not be opened.
    #[error("failed to open log sink: {message}")]
    Sink { message: String },
    /// The subscriber could not be installed.
    #[error("failed to install subscriber: {message}")]
    Install { message: String },
}

impl TelemetryError {
    /// Helper for filter parse failures.
    pub fn filter(message: impl Into<String>) -> Self {
        Self::Filter {
            message: message.into(),
        }
    }

    /// Helper for sink open failures.
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink {
            message: message.into(),
        }
    }

    /// Helper for subscriber installation failures.
    pub fn install(message: impl Into<String>) -> Self {
        Self::Install {
            message: message.into(),
        }
    }
}

/// Where log lines end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    /// Standard output.
    Stdout,
    /// The file opened at this path.
    File(PathBuf),
}

/// Record of the installed logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryHandle {
    /// Selected sink.
    pub sink: Sink,
    /// Selected encoding.
    pub format: LogFormat,
}

/// One-shot initialiser for the process-wide logger.
#[derive(Debug, Default)]
pub struct Telemetry {
    cell: InitOnce<TelemetryHandle, TelemetryError>,
}

impl Telemetry {
    /// Build an uninitialised telemetry resource.
    pub const fn new() -> Self {
        Self {
            cell: InitOnce::new(),
        }
    }

    /// Install the subscriber described by `settings`.
    ///
    /// The first caller performs the installation; concurrent and later
    /// callers observe the stored outcome, including a stored failure.
    pub async fn init(&self, settings: &LogSettings) -> Result<&TelemetryHandle, TelemetryError> {
        self.cell.init(|| async { install(settings) }).await
    }

    /// The installed configuration, or `None` while initialisation has not
    /// succeeded.
    pub fn get(&self) -> Option<&TelemetryHandle> {
        self.cell.get()
    }

    /// Drop the handle. The subscriber itself lives until process exit;
    /// calling this without a prior successful `init` is a no-op.
    pub fn close(&mut self) {
        drop(self.cell.take());
    }
}

fn install(settings: &LogSettings) -> Result<TelemetryHandle, TelemetryError> {
    let filter = build_filter(settings)?;
    let (writer, sink) = build_writer(settings)?;

    let result = match settings.format() {
        LogFormat::Json => {
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(filter);
            tracing_subscriber::registry().with(layer).try_init()
        }
        LogFormat::Console => {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_filter(filter);
            tracing_subscriber::registry().with(layer).try_init()
        }
    };
    result.map_err(|e| TelemetryError::install(e.to_string()))?;

    Ok(TelemetryHandle {
        sink,
        format: settings.format(),
    })
}

fn build_filter(settings: &LogSettings) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => {
            EnvFilter::try_new(settings.level()).map_err(|e| TelemetryError::filter(e.to_string()))
        }
    }
}

fn build_writer(settings: &LogSettings) -> Result<(BoxMakeWriter, Sink), TelemetryError> {
    match settings.output() {
        LogOutput::Stdout => Ok((BoxMakeWriter::new(std::io::stdout), Sink::Stdout)),
        LogOutput::File => {
            let path = settings.file_path().to_path_buf();
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| TelemetryError::sink(format!("{}: {e}", path.display())))?;
            Ok((BoxMakeWriter::new(Mutex::new(file)), Sink::File(path)))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Sink and filter construction; subscriber installation is exercised
    //! once per process and left to the binary.

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;
    use crate::config::LogSettings;

    fn file_settings(path: PathBuf) -> LogSettings {
        LogSettings {
            output: Some(LogOutput::File),
            file_path: Some(path),
            ..LogSettings::default()
        }
    }

    #[rstest]
    fn stdout_writer_always_opens() {
        let settings = LogSettings::default();
        let (_writer, sink) = build_writer(&settings).expect("stdout sink opens");
        assert_eq!(sink, Sink::Stdout);
    }

    #[rstest]
    fn file_writer_opens_an_existing_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("app.log");
        let (_writer, sink) = build_writer(&file_settings(path.clone())).expect("file sink opens");
        assert_eq!(sink, Sink::File(path));
    }

    #[rstest]
    fn missing_sink_directory_is_a_hard_failure() {
        let path = PathBuf::from("/nonexistent-ruleboard-dir/app.log");
        let err = build_writer(&file_settings(path)).expect_err("open should fail");
        assert!(matches!(err, TelemetryError::Sink { .. }));
    }

    #[rstest]
    fn configured_level_feeds_the_filter() {
        let _guard = lock_env([("RUST_LOG", None::<String>)]);
        let settings = LogSettings {
            level: Some("warn".to_owned()),
            ..LogSettings::default()
        };
        let filter = build_filter(&settings).expect("filter parses");
        assert_eq!(filter.to_string(), "warn");
    }

    #[rstest]
    fn environment_overrides_the_configured_level() {
        let _guard = lock_env([("RUST_LOG", Some("debug".to_owned()))]);
        let settings = LogSettings {
            level: Some("warn".to_owned()),
            ..LogSettings::default()
        };
        let filter = build_filter(&settings).expect("filter parses");
        assert_eq!(filter.to_string(), "debug");
    }

    #[rstest]
    fn malformed_directives_are_rejected() {
        let _guard = lock_env([("RUST_LOG", None::<String>)]);
        let settings = LogSettings {
            level: Some("foo=bar=baz".to_owned()),
            ..LogSettings::default()
        };
        let err = build_filter(&settings).expect_err("parse should fail");
        assert!(matches!(err, TelemetryError::Filter { .. }));
    }
}
