use bytes::Bytes;
use ep_graphql::{ErrorCode, QueryResponse};
use http_body_util::Full;
use hyper::{header, Response, StatusCode};
use serde_json::Value;

pub(crate) const CONTENT_TYPE_GRAPHQL: &str = "application/graphql";

pub(crate) fn graphql_response(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, CONTENT_TYPE_GRAPHQL)
        .body(Full::new(Bytes::from(body)))
        .expect("Building a response from valid parts should not fail")
}

pub(crate) fn empty_response(status: StatusCode) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .body(Full::new(Bytes::new()))
        .expect("Building a response from valid parts should not fail")
}

pub(crate) fn not_found_response() -> Response<Full<Bytes>> {
    empty_response(StatusCode::NOT_FOUND)
}

pub(crate) fn forbidden_host_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::FORBIDDEN)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from_static(br#"{"message":"Host not authorized."}"#)))
        .expect("Building a response from valid parts should not fail")
}

/// Protocol-level failures (unparseable body, bad request shape) are always
/// reported with status 400.
pub(crate) fn protocol_error_response(code: ErrorCode) -> Response<Full<Bytes>> {
    let response = QueryResponse::error(Value::Null, code);
    graphql_response(StatusCode::BAD_REQUEST, response.body().unwrap_or_default())
}
