//! Enrichment Layer - runs the pipeline on every log event
//!
//! The layer sits on the root subscriber: it turns each event into a
//! [`LogRecord`], lets the profile's stages populate context fields, renders
//! the configured encoding, and writes one line to its sink. The sink is
//! anything implementing `MakeWriter` - stdout in production, a capture
//! buffer in tests.

use std::collections::BTreeMap;
use std::io::Write;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::enrich::DEFAULT_TRACE_HEADER;
use crate::profile::{ConfigError, RenderConfig};
use crate::record::{LogRecord, Severity, SourceLocation};

/// The `tracing` layer that enriches and renders every event
pub struct EnrichmentLayer<W = fn() -> std::io::Stdout> {
    config: RenderConfig,
    make_writer: W,
}

impl EnrichmentLayer {
    /// Create a layer writing to stdout
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            make_writer: std::io::stdout,
        }
    }
}

impl<W> EnrichmentLayer<W> {
    /// Replace the output sink. Tests use this to capture rendered lines.
    pub fn with_writer<W2>(self, make_writer: W2) -> EnrichmentLayer<W2>
    where
        W2: for<'w> MakeWriter<'w>,
    {
        EnrichmentLayer {
            config: self.config,
            make_writer,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}

impl<S, W> Layer<S> for EnrichmentLayer<W>
where
    S: Subscriber,
    W: for<'w> MakeWriter<'w> + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let metadata = event.metadata();
        let mut record = LogRecord::new(
            visitor.message,
            Severity::from(metadata.level()),
            SourceLocation::from_metadata(metadata),
        );
        // Extra event fields ride along on the record; encodings that do
        // not reference them ignore them.
        for (name, value) in visitor.fields {
            record.set_field(name, value);
        }

        self.config.enrich(&mut record);
        let line = self.config.render(&record);

        // A failed write must never take the process down with it
        let mut writer = self.make_writer.make_writer();
        let _ = writeln!(writer, "{line}");
    }
}

/// Collects the event's `message` field plus any additional fields
#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: BTreeMap<String, String>,
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.insert(field.name().to_string(), value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.insert(field.name().to_string(), format!("{value:?}"));
        }
    }
}

/// Install the pipeline as the root subscriber.
///
/// `RUST_LOG` controls filtering; without it everything from `debug` up is
/// rendered. Fails fast on an unknown profile name or when a global
/// subscriber is already installed - before any logging occurs.
pub fn init(profile_name: &str) -> Result<(), ConfigError> {
    init_with_trace_header(profile_name, DEFAULT_TRACE_HEADER)
}

/// Same as [`init`], with the trace header name overridden
pub fn init_with_trace_header(profile_name: &str, trace_header: &str) -> Result<(), ConfigError> {
    let config = RenderConfig::with_trace_header(profile_name, trace_header)?;
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::registry()
        .with(EnrichmentLayer::new(config).with_filter(env_filter))
        .try_init()
        .map_err(|e| ConfigError::SubscriberInstall(e.to_string()))
}
