use anyhow::Result;
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    let sink = open_sink(config)?;

    match (config.format.as_str(), sink) {
        ("json", Some(file)) => registry
            .with(fmt::layer().json().with_span_events(FmtSpan::CLOSE).with_writer(file))
            .try_init()?,
        ("json", None) => registry
            .with(fmt::layer().json().with_span_events(FmtSpan::CLOSE))
            .try_init()?,
        (_, Some(file)) => registry
            .with(fmt::layer().with_span_events(FmtSpan::CLOSE).with_writer(file))
            .try_init()?,
        (_, None) => registry
            .with(fmt::layer().with_span_events(FmtSpan::CLOSE))
            .try_init()?,
    }

    tracing::info!("Logging initialized with level: {}", config.level);
    Ok(())
}

fn open_sink(config: &LoggingConfig) -> Result<Option<Mutex<File>>> {
    let Some(file_path) = &config.file_path else {
        return Ok(None);
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)?;
    Ok(Some(Mutex::new(file)))
}
