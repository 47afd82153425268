//! Full gcp-profile output, with and without a request in scope.
//!
//! This is the only test in the binary that reads or writes `GCP_PROJECT`,
//! so both cases live in one function and own the variable start to finish.

use pretty_assertions::assert_eq;

use logmux_core::PROJECT_ENV_VAR;
use tests::{fixtures, subscriber};

#[test]
fn test_gcp_profile_output_with_and_without_context() {
    std::env::remove_var(PROJECT_ENV_VAR);
    let (writer, _guard) = subscriber::install("gcp");

    // Outside any request scope: every enrichment field present and empty
    tracing::info!("hi");

    let line = writer.lines().remove(0);
    let value: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value["message"], "hi");
    assert_eq!(value["severity"], "INFO");
    assert_eq!(value["logging.googleapis.com/trace"], "projects//traces/");
    assert_eq!(
        value["httpRequest"],
        serde_json::json!({
            "requestMethod": "",
            "requestUrl": "",
            "userAgent": "",
            "protocol": "",
        })
    );

    // Inside a request scope with the project id set: fully populated
    std::env::set_var(PROJECT_ENV_VAR, "myproj");
    fixtures::request_with_trace("abc123/456;o=1").sync_scope(|| {
        tracing::info!("hi again");
    });
    std::env::remove_var(PROJECT_ENV_VAR);

    let line = writer.lines().remove(1);
    // Key order is part of the contract: consumers see a stable schema
    assert!(
        line.starts_with(
            "{\"message\":\"hi again\",\"severity\":\"INFO\",\
             \"logging.googleapis.com/trace\":\"projects/myproj/traces/abc123\",\
             \"logging.googleapis.com/sourceLocation\":"
        ),
        "unexpected line prefix: {line}"
    );

    let value: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(
        value["httpRequest"],
        serde_json::json!({
            "requestMethod": "GET",
            "requestUrl": "http://example.test/page",
            "userAgent": "test-agent",
            "protocol": "HTTP/1.1",
        })
    );
    let source = &value["logging.googleapis.com/sourceLocation"];
    assert!(source["file"].as_str().unwrap().ends_with("gcp.rs"));
    assert!(source["line"].as_u64().unwrap() > 0);
    assert!(source["function"].as_str().unwrap().contains("gcp"));
}
