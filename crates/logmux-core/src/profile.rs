//! Format Profiles - named enrichment + rendering configurations
//!
//! A profile name selects which stages run and which encoding consumes
//! their fields. Unknown names fail here, at setup time, so a
//! misconfigured process never gets as far as emitting malformed lines.

use std::str::FromStr;

use thiserror::Error;

use crate::enrich::{EnrichStage, TraceStage, DEFAULT_TRACE_HEADER};
use crate::record::LogRecord;
use crate::render;

/// Errors surfaced while building or installing the pipeline
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown log format profile {0:?} (expected plain, structured, or gcp)")]
    UnknownProfile(String),

    #[error("failed to install global log subscriber: {0}")]
    SubscriberInstall(String),
}

/// The built-in output profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Raw message only
    Plain,
    /// `{"message": ..., "severity": ...}`
    Structured,
    /// Cloud-logging JSON with trace, source location, and HTTP request data
    Gcp,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Plain => "plain",
            Profile::Structured => "structured",
            Profile::Gcp => "gcp",
        }
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "plain" => Ok(Profile::Plain),
            "structured" => Ok(Profile::Structured),
            "gcp" => Ok(Profile::Gcp),
            other => Err(ConfigError::UnknownProfile(other.to_string())),
        }
    }
}

/// The complete enrichment + rendering configuration for one profile
#[derive(Debug, Clone)]
pub struct RenderConfig {
    profile: Profile,
    stages: Vec<EnrichStage>,
}

impl RenderConfig {
    /// Build the configuration for a profile name, with the default trace
    /// header.
    pub fn build(profile_name: &str) -> Result<Self, ConfigError> {
        Self::with_trace_header(profile_name, DEFAULT_TRACE_HEADER)
    }

    /// Build the configuration for a profile name with an overridden trace
    /// header name.
    ///
    /// Stage order is fixed (trace, http request, project identity) so the
    /// same inputs always produce byte-identical output.
    pub fn with_trace_header(profile_name: &str, trace_header: &str) -> Result<Self, ConfigError> {
        let profile = profile_name.parse::<Profile>()?;
        let stages = match profile {
            // plain and structured reference no enrichment fields, so no
            // stages are attached for them
            Profile::Plain | Profile::Structured => Vec::new(),
            Profile::Gcp => vec![
                EnrichStage::Trace(TraceStage::new(trace_header)),
                EnrichStage::HttpRequest,
                EnrichStage::ProjectIdentity,
            ],
        };
        Ok(Self { profile, stages })
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn stages(&self) -> &[EnrichStage] {
        &self.stages
    }

    /// Run every active stage over the record, in order
    pub fn enrich(&self, record: &mut LogRecord) {
        for stage in &self.stages {
            stage.apply(record);
        }
    }

    /// Expand the record into its final output line (no trailing newline)
    pub fn render(&self, record: &LogRecord) -> String {
        render::render_line(self.profile, record)
    }
}
