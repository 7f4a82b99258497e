use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One query item as received on the wire.
///
/// `query` is optional at this layer on purpose: a present-but-queryless
/// object is a well-formed request that fails later with `InvalidParams`,
/// which is not the same protocol error as a shape mismatch
/// (`InvalidRequest`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, Value>>,
    #[serde(rename = "operationName", default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}
