//! Log Record - the mutable unit flowing through the pipeline
//!
//! One record is built per log event, enriched in place by the active
//! stages, rendered, and dropped. Records are never retained across events.

use std::collections::BTreeMap;

use tracing::{Level, Metadata};

/// Severity names as the log consumer expects them.
///
/// `tracing` has five levels but the output encodings use four names:
/// TRACE and DEBUG both render as `DEBUG`, WARN renders as `WARNING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

impl From<&Level> for Severity {
    fn from(level: &Level) -> Self {
        if *level == Level::ERROR {
            Severity::Error
        } else if *level == Level::WARN {
            Severity::Warning
        } else if *level == Level::INFO {
            Severity::Info
        } else {
            Severity::Debug
        }
    }
}

/// Where the log call was made.
///
/// `function` carries the event's target (module path) - the closest thing
/// to a function name the event metadata offers. Missing metadata degrades
/// to empty string / line 0 rather than failing.
#[derive(Debug, Clone, Default)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub function: String,
}

impl SourceLocation {
    pub fn from_metadata(metadata: &Metadata<'_>) -> Self {
        Self {
            file: metadata.file().unwrap_or_default().to_string(),
            line: metadata.line().unwrap_or(0),
            function: metadata.target().to_string(),
        }
    }
}

/// A log record: message/severity/source intrinsics plus an open field map.
///
/// Stages add named fields; nothing removes or reorders them (the map is
/// ordered by key). Fields an encoding does not reference are simply
/// ignored at render time.
#[derive(Debug, Clone)]
pub struct LogRecord {
    message: String,
    severity: Severity,
    source: SourceLocation,
    fields: BTreeMap<String, String>,
}

impl LogRecord {
    pub fn new(message: impl Into<String>, severity: Severity, source: SourceLocation) -> Self {
        Self {
            message: message.into(),
            severity,
            source,
            fields: BTreeMap::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn source(&self) -> &SourceLocation {
        &self.source
    }

    /// Set a named field, overwriting any previous value
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Read a named field; empty string when the field was never set.
    ///
    /// The active stages guarantee every field their encoding references is
    /// present, so the empty default is a last-resort guard that keeps
    /// rendering total.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}
