//! Executes `HttpRequest` values over the network with ureq.
//!
//! # Design
//! The agent disables ureq's status-code-as-error behavior so 4xx/5xx
//! responses come back as data for the parse layer to interpret; only
//! transport-level failures (DNS, connect, I/O) become `ApiError::Network`.
//! There is no retry, no deduplication, and no timeout beyond the
//! transport's own defaults — each call is dispatched at most once.
//!
//! Cancellation is cooperative: the token is checked before dispatch and
//! again when the response arrives, so a response that lands after the
//! caller cancelled is dropped instead of being handed to a caller that no
//! longer wants it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};

/// Cloneable abort signal tied to the lifetime of whoever holds it.
///
/// All clones share one flag; cancelling any of them cancels every request
/// consulting the token from then on.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Execute a request and return the response as plain data.
pub fn execute(req: &HttpRequest, cancel: &CancelToken) -> Result<HttpResponse, ApiError> {
    if cancel.is_cancelled() {
        return Err(ApiError::Cancelled);
    }
    debug!(url = %req.path, "dispatching API request");

    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let result = match (&req.method, &req.body) {
        (HttpMethod::Get, _) => with_headers(agent.get(&req.path), req).call(),
        (HttpMethod::Delete, _) => with_headers(agent.delete(&req.path), req).call(),
        (HttpMethod::Post, Some(body)) => {
            with_headers(agent.post(&req.path), req).send(&body_bytes(body)[..])
        }
        (HttpMethod::Post, None) => with_headers(agent.post(&req.path), req).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            with_headers(agent.put(&req.path), req).send(&body_bytes(body)[..])
        }
        (HttpMethod::Put, None) => with_headers(agent.put(&req.path), req).send_empty(),
    };

    let mut response = result.map_err(|e| ApiError::Network(e.to_string()))?;

    // The caller went away while the request was in flight; drop the
    // response rather than mutate state on its behalf.
    if cancel.is_cancelled() {
        return Err(ApiError::Cancelled);
    }

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    req: &HttpRequest,
) -> ureq::RequestBuilder<B> {
    for (name, value) in &req.headers {
        builder = builder.header(name, value);
    }
    builder
}

fn body_bytes(body: &RequestBody) -> Vec<u8> {
    match body {
        RequestBody::Json(json) => json.clone().into_bytes(),
        RequestBody::Multipart(form) => form.encode(),
    }
}
