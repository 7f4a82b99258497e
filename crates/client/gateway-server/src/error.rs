use bytes::Bytes;
use ep_graphql::ErrorCode;
use http_body_util::Full;
use hyper::{Response, StatusCode};

use crate::helpers::{empty_response, protocol_error_response};

#[derive(Debug, thiserror::Error)]
pub(crate) enum GatewayError {
    #[error("{0}")]
    Protocol(ErrorCode),
    #[error("Internal server error")]
    InternalServerError,
}

impl From<GatewayError> for Response<Full<Bytes>> {
    fn from(e: GatewayError) -> Response<Full<Bytes>> {
        match e {
            GatewayError::Protocol(code) => protocol_error_response(code),
            // Bare 500, no protocol body: the failure happened outside query
            // execution.
            GatewayError::InternalServerError => empty_response(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}
