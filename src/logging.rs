//! Structured logging setup
//!
//! Opt-in: the library itself only emits `tracing` events; binaries call
//! [`init`] once to install a subscriber. Format and destination come from
//! environment variables:
//!
//! - `RUST_LOG`: level or per-module directives
//! - `LOG_FORMAT`: "pretty" (default), "json", "compact"
//! - `LOG_OUTPUT`: "stdout" (default), "file", "both"
//! - `LOG_DIR`: directory for daily-rolling log files (default "./logs")

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    File,
    Both,
}

impl LogOutput {
    pub fn from_env() -> Self {
        match std::env::var("LOG_OUTPUT").as_deref() {
            Ok("file") => LogOutput::File,
            Ok("both") => LogOutput::Both,
            _ => LogOutput::Stdout,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap()
        // Quiet the HTTP stack under async-openai
        .add_directive("hyper=warn".parse().unwrap())
        .add_directive("reqwest=warn".parse().unwrap())
        .add_directive("h2=warn".parse().unwrap())
}

fn stdout_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    match format {
        LogFormat::Pretty => fmt::layer().pretty().with_target(true).boxed(),
        LogFormat::Json => fmt::layer().json().with_current_span(true).boxed(),
        LogFormat::Compact => fmt::layer().compact().boxed(),
    }
}

fn file_appender() -> RollingFileAppender {
    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string());
    std::fs::create_dir_all(&log_dir).ok();
    RollingFileAppender::new(Rotation::DAILY, log_dir, "nlsql.log")
}

/// Install the global tracing subscriber. Call once, early.
pub fn init() {
    let format = LogFormat::from_env();
    let output = LogOutput::from_env();

    match output {
        LogOutput::Stdout => {
            tracing_subscriber::registry()
                .with(env_filter())
                .with(stdout_layer(format))
                .init();
        }
        LogOutput::File => {
            tracing_subscriber::registry()
                .with(env_filter())
                .with(fmt::layer().with_writer(file_appender()).with_ansi(false))
                .init();
        }
        LogOutput::Both => {
            tracing_subscriber::registry()
                .with(env_filter())
                .with(stdout_layer(format))
                .with(
                    fmt::layer()
                        .with_writer(file_appender())
                        .with_ansi(false)
                        .boxed(),
                )
                .init();
        }
    }

    tracing::debug!(?format, ?output, "logging initialized");
}
