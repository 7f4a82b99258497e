use std::{convert::Infallible, sync::Arc, time::Instant};

use bytes::Bytes;
use ec_graphql::SchemaBinding;
use http_body_util::Full;
use hyper::{body::Incoming, header, http::HeaderValue, Method, Request, Response, StatusCode};

use crate::handler::handle_query;
use crate::helpers::{empty_response, forbidden_host_response, not_found_response};
use crate::service::GatewayConfig;

// Single route surface: the whole gateway lives at `/`.
pub(crate) async fn main_router(
    req: Request<Incoming>,
    schema: Arc<SchemaBinding>,
    config: Arc<GatewayConfig>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let host = req.headers().get(header::HOST).and_then(|v| v.to_str().ok()).map(str::to_string);
    let origin = req.headers().get(header::ORIGIN).cloned();

    let mut res = if !host_permitted(host.as_deref(), &config.host_allowlist) {
        forbidden_host_response()
    } else {
        match (req.method(), req.uri().path()) {
            // Liveness probe.
            (&Method::GET, "/") => empty_response(StatusCode::CREATED),
            (&Method::OPTIONS, "/") => empty_response(StatusCode::OK),
            (&Method::POST, "/") => handle_query(req, schema, &config).await.unwrap_or_else(Into::into),
            _ => not_found_response(),
        }
    };

    apply_cors(&mut res, &config.cors_allowed_origins, origin.as_ref());

    tracing::debug!(
        target: "gateway",
        method = %method,
        path = %path,
        status = res.status().as_u16(),
        response_time = ?started.elapsed(),
        "Handled request"
    );

    Ok(res)
}

/// Checks the `Host` header against the allowlist.
///
/// A single colon separates an explicit port, which must be one to five
/// digits; any other use of colons does not match. The comparison is on the
/// hostname part only and case-insensitive.
pub(crate) fn host_permitted(host: Option<&str>, allowlist: &[String]) -> bool {
    if allowlist.iter().any(|entry| entry == "*") {
        return true;
    }
    let Some(host) = host else { return false };
    let parts: Vec<&str> = host.split(':').collect();
    let hostname = match parts.as_slice() {
        [name] => *name,
        [name, port] if (1..=5).contains(&port.len()) && port.bytes().all(|b| b.is_ascii_digit()) => {
            *name
        }
        _ => return false,
    };
    !hostname.is_empty() && allowlist.iter().any(|entry| entry.eq_ignore_ascii_case(hostname))
}

fn apply_cors(res: &mut Response<Full<Bytes>>, allowed: &[String], origin: Option<&HeaderValue>) {
    let Some(origin) = origin else { return };
    let allow = if allowed.iter().any(|entry| entry == "*") {
        Some(HeaderValue::from_static("*"))
    } else if origin.to_str().map(|o| allowed.iter().any(|entry| entry == o)).unwrap_or(false) {
        Some(origin.clone())
    } else {
        None
    };
    if let Some(value) = allow {
        let headers = res.headers_mut();
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("GET, POST, OPTIONS"));
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("content-type"));
    }
}
