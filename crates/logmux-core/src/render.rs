//! Output rendering - one line per record, per profile
//!
//! JSON encodings are built as real `serde_json` values and serialized,
//! never spliced into a string template: embedded quotes or newlines in the
//! message, URL, or user-agent cannot break the output. Key order is
//! insertion order (`preserve_order`), so output is byte-stable for a given
//! record.

use serde_json::json;

use crate::enrich::fields;
use crate::profile::Profile;
use crate::record::LogRecord;

pub(crate) fn render_line(profile: Profile, record: &LogRecord) -> String {
    match profile {
        Profile::Plain => record.message().to_string(),
        Profile::Structured => json!({
            "message": record.message(),
            "severity": record.severity().as_str(),
        })
        .to_string(),
        Profile::Gcp => {
            let source = record.source();
            json!({
                "message": record.message(),
                "severity": record.severity().as_str(),
                "logging.googleapis.com/trace": format!(
                    "projects/{}/traces/{}",
                    record.field(fields::GCP_PROJECT),
                    record.field(fields::TRACE),
                ),
                "logging.googleapis.com/sourceLocation": {
                    "file": source.file.as_str(),
                    "line": source.line,
                    "function": source.function.as_str(),
                },
                "httpRequest": {
                    "requestMethod": record.field(fields::REQUEST_METHOD),
                    "requestUrl": record.field(fields::REQUEST_URL),
                    "userAgent": record.field(fields::USER_AGENT),
                    "protocol": record.field(fields::PROTOCOL),
                },
            })
            .to_string()
        }
    }
}
