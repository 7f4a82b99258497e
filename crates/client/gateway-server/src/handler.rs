use std::{
    panic::{catch_unwind, AssertUnwindSafe},
    sync::Arc,
    thread,
    time::Duration,
};

use bytes::Bytes;
use ec_graphql::{Deadline, SchemaBinding};
use ep_graphql::{ErrorCode, QueryRequest, QueryResponse, ResponseKind};
use http_body_util::{BodyExt, Full};
use hyper::{body::Incoming, Request, Response, StatusCode};
use serde_json::Value;
use tokio::task::JoinHandle;

use crate::error::GatewayError;
use crate::helpers::{empty_response, graphql_response};
use crate::service::GatewayConfig;

pub(crate) async fn handle_query(
    req: Request<Incoming>,
    schema: Arc<SchemaBinding>,
    config: &GatewayConfig,
) -> Result<Response<Full<Bytes>>, GatewayError> {
    let body = req
        .into_body()
        .collect()
        .await
        .map_err(|e| {
            tracing::debug!(target: "gateway_errors", "Failed to read request body: {e:#}");
            GatewayError::Protocol(ErrorCode::ParseError)
        })?
        .to_bytes();
    let text = String::from_utf8_lossy(&body).trim().to_string();

    // An object is a single query, everything else goes down the batch path.
    if text.starts_with('{') {
        single(schema, &text, config.execution_timeout).await
    } else {
        batch(schema, &text, config.execution_timeout).await
    }
}

async fn single(
    schema: Arc<SchemaBinding>,
    raw: &str,
    timeout: Duration,
) -> Result<Response<Full<Bytes>>, GatewayError> {
    let response = collect(spawn_item(schema, decode_single(raw), timeout)).await?;
    let status = StatusCode::from_u16(response.http_status())
        .expect("Status mapping only produces valid codes");
    Ok(match response.body() {
        Some(body) => graphql_response(status, body),
        None => empty_response(StatusCode::OK),
    })
}

async fn batch(
    schema: Arc<SchemaBinding>,
    raw: &str,
    timeout: Duration,
) -> Result<Response<Full<Bytes>>, GatewayError> {
    let items: Vec<Value> =
        serde_json::from_str(raw).map_err(|_| GatewayError::Protocol(ErrorCode::ParseError))?;
    if items.is_empty() {
        return Err(GatewayError::Protocol(ErrorCode::InvalidRequest));
    }

    // All items are dispatched before the first join, so they run
    // concurrently while the joins preserve submission order.
    let handles: Vec<_> = items
        .into_iter()
        .map(|item| spawn_item(Arc::clone(&schema), decode_batch_item(item), timeout))
        .collect();

    let mut bodies = Vec::with_capacity(handles.len());
    for handle in handles {
        let response = collect(handle).await?;
        if response.kind() != ResponseKind::NoOp {
            if let Some(body) = response.body() {
                bodies.push(body);
            }
        }
    }

    // A batch where every entry was elided sends an empty body.
    if bodies.is_empty() {
        Ok(empty_response(StatusCode::OK))
    } else {
        Ok(graphql_response(StatusCode::OK, format!("[{}]", bodies.join(","))))
    }
}

/// Body that opened with `{` but is not a well-formed single request.
/// Invalid JSON is a parse error; valid JSON of the wrong shape is an
/// invalid request.
fn decode_single(raw: &str) -> Result<QueryRequest, ErrorCode> {
    serde_json::from_str(raw).map_err(|e| match e.classify() {
        serde_json::error::Category::Data => ErrorCode::InvalidRequest,
        _ => ErrorCode::ParseError,
    })
}

/// Batch entries were already parsed as JSON, so any failure here is a
/// shape mismatch.
fn decode_batch_item(item: Value) -> Result<QueryRequest, ErrorCode> {
    serde_json::from_value(item).map_err(|_| ErrorCode::InvalidRequest)
}

fn execute_request(schema: &SchemaBinding, request: QueryRequest, deadline: Deadline) -> QueryResponse {
    let Some(query) = request.query.filter(|q| !q.trim().is_empty()) else {
        return QueryResponse::error(Value::Null, ErrorCode::InvalidParams);
    };
    let result =
        schema.execute(&query, request.variables.as_ref(), request.operation_name.as_deref(), deadline);
    QueryResponse::Success { data: result.data, errors: result.errors }
}

/// Runs one item on the blocking pool. Decode failures still go through the
/// pool so batch ordering is handled in one place.
fn spawn_item(
    schema: Arc<SchemaBinding>,
    request: Result<QueryRequest, ErrorCode>,
    timeout: Duration,
) -> JoinHandle<thread::Result<QueryResponse>> {
    tokio::task::spawn_blocking(move || {
        catch_unwind(AssertUnwindSafe(|| match request {
            Ok(request) => execute_request(&schema, request, Deadline::after(timeout)),
            Err(code) => QueryResponse::error(Value::Null, code),
        }))
    })
}

/// A panic inside execution becomes an internal-error entry for that item; a
/// task that failed to complete at all fails the whole request.
async fn collect(handle: JoinHandle<thread::Result<QueryResponse>>) -> Result<QueryResponse, GatewayError> {
    match handle.await {
        Ok(Ok(response)) => Ok(response),
        Ok(Err(_)) => {
            tracing::error!(target: "gateway_errors", "Query execution panicked");
            Ok(QueryResponse::error(Value::Null, ErrorCode::InternalError))
        }
        Err(e) => {
            tracing::error!(target: "gateway_errors", "Query task failed to complete: {e:#}");
            Err(GatewayError::InternalServerError)
        }
    }
}
