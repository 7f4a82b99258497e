//! Wire shapes shared between the gateway server and its clients: the query
//! request envelope, the response envelope and the protocol-level error
//! table.
//!
//! Protocol-level errors (malformed body, empty batch, unauthorized host)
//! are distinct from field-level resolver errors: the former use the
//! `{"id": ..., "error": {"code", "message"}}` shape and a non-200 status,
//! the latter ride inside a successful response's `errors` array.

pub mod error;
pub mod request;
pub mod response;

pub use error::ErrorCode;
pub use request::QueryRequest;
pub use response::{ProtocolError, QueryResponse, ResponseKind};
