//! Enrichment Stages - populate context fields on a record
//!
//! Three stages, each writing a fixed set of named fields just before a
//! record is rendered. Stages are independent: any subset may be active,
//! and each re-reads the current request on every invocation. Data that is
//! unavailable (no request in scope, header missing, env var unset) becomes
//! an empty string; no stage ever fails outward.

use crate::context::RequestContext;
use crate::record::LogRecord;

/// Header carrying trace context, unless overridden at stage construction.
///
/// The value format is `TRACE_ID/SPAN_ID;o=OPTIONS`; only the trace id
/// component is kept.
pub const DEFAULT_TRACE_HEADER: &str = "X-Cloud-Trace-Context";

/// Environment variable naming the hosting project/deployment
pub const PROJECT_ENV_VAR: &str = "GCP_PROJECT";

/// Field names the stages write
pub mod fields {
    pub const TRACE: &str = "trace";
    pub const REQUEST_METHOD: &str = "request_method";
    pub const REQUEST_URL: &str = "request_url";
    pub const USER_AGENT: &str = "user_agent";
    pub const PROTOCOL: &str = "protocol";
    pub const GCP_PROJECT: &str = "gcp_project";
}

/// One enrichment stage.
///
/// A closed set: profiles wire stages by variant, there is no dynamic stage
/// registration.
#[derive(Debug, Clone)]
pub enum EnrichStage {
    /// Sets `trace` from the configured trace header
    Trace(TraceStage),
    /// Sets `request_method`, `request_url`, `user_agent`, `protocol`
    HttpRequest,
    /// Sets `gcp_project` from the process environment
    ProjectIdentity,
}

impl EnrichStage {
    /// Write this stage's fields onto the record
    pub fn apply(&self, record: &mut LogRecord) {
        match self {
            EnrichStage::Trace(stage) => stage.apply(record),
            EnrichStage::HttpRequest => apply_http_request(record),
            EnrichStage::ProjectIdentity => apply_project_identity(record),
        }
    }
}

/// Trace stage: extracts the trace id from the configured header.
///
/// `record.trace` is the substring before the first `/` of the header
/// value, or empty when the header (or the request itself) is absent.
#[derive(Debug, Clone)]
pub struct TraceStage {
    header_name: String,
}

impl TraceStage {
    pub fn new(header_name: impl Into<String>) -> Self {
        Self {
            header_name: header_name.into(),
        }
    }

    pub fn header_name(&self) -> &str {
        &self.header_name
    }

    fn apply(&self, record: &mut LogRecord) {
        record.set_field(fields::TRACE, "");
        let Some(context) = RequestContext::current() else {
            return;
        };
        if let Some(header) = context.header(&self.header_name) {
            let trace_id = header.split('/').next().unwrap_or_default();
            record.set_field(fields::TRACE, trace_id);
        }
    }
}

impl Default for TraceStage {
    fn default() -> Self {
        Self::new(DEFAULT_TRACE_HEADER)
    }
}

/// HTTP request stage: all four fields are pre-set to empty and overwritten
/// together, so a record never carries a mix of real and stale values.
fn apply_http_request(record: &mut LogRecord) {
    record.set_field(fields::REQUEST_METHOD, "");
    record.set_field(fields::REQUEST_URL, "");
    record.set_field(fields::USER_AGENT, "");
    record.set_field(fields::PROTOCOL, "");
    let Some(context) = RequestContext::current() else {
        return;
    };
    record.set_field(fields::REQUEST_METHOD, context.method());
    record.set_field(fields::REQUEST_URL, context.url());
    record.set_field(fields::USER_AGENT, context.user_agent());
    record.set_field(fields::PROTOCOL, context.protocol());
}

/// Project identity stage: reads the env var on every invocation so a
/// changed environment is picked up without restart. Needs no request scope.
fn apply_project_identity(record: &mut LogRecord) {
    let project = std::env::var(PROJECT_ENV_VAR).unwrap_or_default();
    record.set_field(fields::GCP_PROJECT, project);
}
