use crate::error::{ErrorBody, ErrorCode};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Classification of a response, used for the HTTP status mapping and the
/// batch elision policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Success,
    Error,
    Unauthorized,
    NoOp,
}

/// Protocol-level error response: `{"id": <id|null>, "error": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolError {
    pub id: Value,
    pub error: ErrorBody,
}

/// The response to one query item.
///
/// `Success` carries the execution result (`data` plus field-level errors)
/// even when every field failed: resolver errors are partial-success at the
/// transport level. `NoOp` entries serialize to nothing and are elided from
/// batch bodies.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResponse {
    Success { data: Value, errors: Vec<Value> },
    Error(ProtocolError),
    Unauthorized,
    NoOp,
}

impl QueryResponse {
    pub fn error(id: Value, code: ErrorCode) -> Self {
        Self::Error(ProtocolError { id, error: code.into() })
    }

    pub fn kind(&self) -> ResponseKind {
        match self {
            QueryResponse::Success { .. } => ResponseKind::Success,
            QueryResponse::Error(_) => ResponseKind::Error,
            QueryResponse::Unauthorized => ResponseKind::Unauthorized,
            QueryResponse::NoOp => ResponseKind::NoOp,
        }
    }

    /// HTTP status for a single-mode response.
    pub fn http_status(&self) -> u16 {
        match self.kind() {
            ResponseKind::Unauthorized => 401,
            ResponseKind::Error => 400,
            ResponseKind::Success | ResponseKind::NoOp => 200,
        }
    }

    /// Serialized body; `None` for no-op responses, which send an empty body.
    pub fn body(&self) -> Option<String> {
        match self {
            QueryResponse::NoOp => None,
            other => Some(serde_json::to_string(other).unwrap_or_default()),
        }
    }
}

impl Serialize for QueryResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct SuccessBody<'a> {
            data: &'a Value,
            errors: &'a [Value],
        }
        match self {
            QueryResponse::Success { data, errors } => {
                SuccessBody { data, errors }.serialize(serializer)
            }
            QueryResponse::Error(e) => e.serialize(serializer),
            QueryResponse::Unauthorized => ProtocolError {
                id: Value::Null,
                error: ErrorCode::Unauthorized.into(),
            }
            .serialize(serializer),
            // Elided before batch serialization; a bare null keeps the
            // encoding total if one slips through.
            QueryResponse::NoOp => serializer.serialize_unit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_mapping() {
        assert_eq!(QueryResponse::Success { data: Value::Null, errors: vec![] }.http_status(), 200);
        assert_eq!(QueryResponse::error(Value::Null, ErrorCode::ParseError).http_status(), 400);
        assert_eq!(QueryResponse::Unauthorized.http_status(), 401);
        assert_eq!(QueryResponse::NoOp.http_status(), 200);
    }

    #[test]
    fn success_body_shape() {
        let resp = QueryResponse::Success { data: json!({"block": null}), errors: vec![] };
        assert_eq!(resp.body().unwrap(), r#"{"data":{"block":null},"errors":[]}"#);
    }

    #[test]
    fn protocol_error_shape() {
        let resp = QueryResponse::error(Value::Null, ErrorCode::InvalidRequest);
        assert_eq!(
            resp.body().unwrap(),
            r#"{"id":null,"error":{"code":-32600,"message":"Invalid Request"}}"#
        );
    }

    #[test]
    fn noop_has_no_body() {
        assert_eq!(QueryResponse::NoOp.body(), None);
    }
}
