//! HTTP gateway for GraphQL queries.
//!
//! One endpoint, two submission modes: a request body opening with `{` is a
//! single query object, anything else is treated as a batch array. Items run
//! on the blocking pool and responses come back in submission order, with
//! `Content-Type: application/graphql`. A `Host` allowlist guards the whole
//! endpoint and `GET /` doubles as a liveness probe.

mod error;
mod handler;
mod helpers;
mod router;
mod service;

pub use service::{run_server, start_server, GatewayConfig};
