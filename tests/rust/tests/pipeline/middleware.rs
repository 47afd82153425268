//! End-to-end: axum middleware binds the request, handler logs carry it.

use axum::body::Body;
use axum::routing::get;
use axum::Router;
use pretty_assertions::assert_eq;
use tower::ServiceExt;

use logmux_http::request_scope_middleware;
use tests::subscriber;

async fn handler() -> &'static str {
    tracing::info!("handling request");
    "ok"
}

fn app() -> Router {
    Router::new()
        .route("/work", get(handler))
        .layer(axum::middleware::from_fn(request_scope_middleware))
}

#[tokio::test]
async fn test_handler_logs_carry_request_context() {
    let (writer, _guard) = subscriber::install("gcp");

    let response = app()
        .oneshot(
            http::Request::builder()
                .uri("/work")
                .header("Host", "svc.test")
                .header("User-Agent", "probe/1.0")
                .header("X-Cloud-Trace-Context", "f00dcafe/123;o=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), http::StatusCode::OK);

    let lines = writer.lines();
    assert_eq!(lines.len(), 1);
    let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    let trace = value["logging.googleapis.com/trace"].as_str().unwrap();
    assert!(trace.ends_with("/traces/f00dcafe"), "got {trace:?}");
    assert_eq!(value["httpRequest"]["requestMethod"], "GET");
    assert_eq!(value["httpRequest"]["requestUrl"], "http://svc.test/work");
    assert_eq!(value["httpRequest"]["userAgent"], "probe/1.0");
    assert_eq!(value["httpRequest"]["protocol"], "HTTP/1.1");
}

#[tokio::test]
async fn test_logs_outside_requests_render_empty_context() {
    let (writer, _guard) = subscriber::install("gcp");

    tracing::info!("before any request");

    let _ = app()
        .oneshot(
            http::Request::builder()
                .uri("/work")
                .header("X-Cloud-Trace-Context", "beef99/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    tracing::info!("after the request");

    let lines = writer.lines();
    assert_eq!(lines.len(), 3);
    for index in [0, 2] {
        let value: serde_json::Value = serde_json::from_str(&lines[index]).unwrap();
        let trace = value["logging.googleapis.com/trace"].as_str().unwrap();
        assert!(trace.ends_with("/traces/"), "line {index} leaked {trace:?}");
        assert_eq!(value["httpRequest"]["requestUrl"], "");
    }
    let in_request: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
    assert!(in_request["logging.googleapis.com/trace"]
        .as_str()
        .unwrap()
        .ends_with("/traces/beef99"));
}
