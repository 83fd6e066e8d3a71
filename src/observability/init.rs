//! Tracing subscriber setup.
//!
//! The terminal belongs to the UI, so all output goes to files in the data
//! directory:
//!
//! - `moviedeck.log`: human-readable `tracing` events, rotated at 10 MB
//! - `moviedeck-otlp.json`: OTLP/JSON spans, only when `otlp_traces` is set
//!
//! `RUST_LOG` overrides the configured `trace_level`.

use super::file_writer::FileWriter;
use super::span_formatter::SCOPE_NAME;
use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::Path;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LEVEL: &str = "info";
const LOG_FILE: &str = "moviedeck.log";
const OTLP_FILE: &str = "moviedeck-otlp.json";

/// Installs the global subscriber. Failures leave tracing disabled.
pub fn init_tracing(config: &Config, data_dir: &Path) {
    if std::fs::create_dir_all(data_dir).is_err() {
        return;
    }

    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(FileWriter::new(data_dir.join(LOG_FILE)));

    let otel_layer = config.otlp_traces.then(|| {
        let resource = Resource::new(vec![KeyValue::new("service.name", SCOPE_NAME)]);
        let provider = tracer::create_tracer_provider(data_dir.join(OTLP_FILE), resource);
        OpenTelemetryLayer::new(provider.tracer(SCOPE_NAME))
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();
}
