//! # Logmux Core Library
//!
//! Request-context log enrichment: every log event emitted while an HTTP
//! request is in flight picks up trace, request, and deployment-identity
//! fields, then renders into one of three output encodings.
//!
//! ## Modules
//!
//! - `context` - The per-request snapshot and its task-local accessor
//! - `record` - The mutable log record built from each event
//! - `enrich` - The enrichment stages that populate record fields
//! - `profile` - Named output profiles and their stage wiring
//! - `layer` - The `tracing` layer that runs the pipeline per event
//!
//! ## Usage
//!
//! ```no_run
//! logmux_core::init("gcp").expect("valid profile");
//! tracing::info!("ready to serve");
//! ```
//!
//! Pair with `logmux-http`'s middleware so handler logs carry the request
//! they were emitted under.

pub mod context;
pub mod enrich;
pub mod layer;
pub mod profile;
pub mod record;
mod render;

// Re-export commonly used types
pub use context::RequestContext;
pub use enrich::{EnrichStage, TraceStage, DEFAULT_TRACE_HEADER, PROJECT_ENV_VAR};
pub use layer::{init, init_with_trace_header, EnrichmentLayer};
pub use profile::{ConfigError, Profile, RenderConfig};
pub use record::{LogRecord, Severity, SourceLocation};
