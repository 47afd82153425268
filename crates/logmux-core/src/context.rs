//! Request Context - the "current request" snapshot and its accessor
//!
//! A [`RequestContext`] is an owned snapshot of the request attributes the
//! enrichment stages read. It is bound to the executing task for the
//! duration of one request; concurrent requests each see only their own
//! binding, never each other's.

use http::HeaderMap;

tokio::task_local! {
    /// The request currently being handled by this task, if any.
    static CURRENT_REQUEST: RequestContext;
}

/// Snapshot of the request currently being handled.
///
/// Built once per request by the binding middleware and cloned out by each
/// stage that needs it. Attributes the request did not carry are empty
/// strings, so downstream consumers never deal with absent keys.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: String,
    url: String,
    user_agent: String,
    protocol: String,
    headers: HeaderMap,
}

impl RequestContext {
    /// Create a snapshot for a request with the given method and full URL
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            user_agent: String::new(),
            protocol: String::new(),
            headers: HeaderMap::new(),
        }
    }

    /// Set the client's user-agent string
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the wire protocol version (e.g. `HTTP/1.1`)
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Attach the request's header map for by-name lookups
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Look up a header by name. Non-UTF-8 values count as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// The request bound to the current task, if one is in scope.
    ///
    /// Returns `None` outside request handling (startup, shutdown,
    /// background tasks, non-Tokio threads). Never panics: logging has to be
    /// usable from any code path.
    pub fn current() -> Option<RequestContext> {
        CURRENT_REQUEST.try_with(|context| context.clone()).ok()
    }

    /// Run `f` with this snapshot bound as the current request.
    ///
    /// The binding covers every await point inside `f` and nothing outside
    /// it. Tasks spawned from within `f` do not inherit the binding.
    pub async fn scope<F>(self, f: F) -> F::Output
    where
        F: std::future::Future,
    {
        CURRENT_REQUEST.scope(self, f).await
    }

    /// Synchronous variant of [`RequestContext::scope`]
    pub fn sync_scope<F, R>(self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        CURRENT_REQUEST.sync_scope(self, f)
    }
}
