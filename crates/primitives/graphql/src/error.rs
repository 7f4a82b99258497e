use serde::{Deserialize, Serialize};

/// Protocol error codes, kept numerically compatible with the JSON-RPC
/// range so that mixed json-rpc/graphql tooling can classify them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ErrorCode {
    #[error("Parse error")]
    ParseError,
    #[error("Invalid Request")]
    InvalidRequest,
    #[error("Invalid params")]
    InvalidParams,
    #[error("Internal error")]
    InternalError,
    #[error("Invalid block range")]
    InvalidRange,
    #[error("Unauthorized")]
    Unauthorized,
}

impl ErrorCode {
    pub fn code(&self) -> i64 {
        match self {
            ErrorCode::ParseError => -32700,
            ErrorCode::InvalidRequest => -32600,
            ErrorCode::InvalidParams => -32602,
            ErrorCode::InternalError => -32603,
            ErrorCode::InvalidRange => -32001,
            ErrorCode::Unauthorized => -40100,
        }
    }
}

/// The `error` object inside a protocol-level error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: i64,
    pub message: String,
}

impl From<ErrorCode> for ErrorBody {
    fn from(code: ErrorCode) -> Self {
        Self { code: code.code(), message: code.to_string() }
    }
}
