//! GraphQL execution over a [`ChainQuery`] backend.
//!
//! The crate owns the three pieces the gateway dispatches into: the scalar
//! codecs ([`scalars`]), the field resolver registry ([`resolvers`]), and
//! the selection-set executor ([`execution`]). A [`SchemaBinding`] ties a
//! registry to one chain handle and runs query documents to completion.

pub mod errors;
mod execution;
pub mod resolvers;
pub mod scalars;

pub use execution::{Deadline, QueryResult};

use ec_chain::ChainQuery;
use resolvers::ResolverRegistry;
use serde_json::{Map, Value};
use std::sync::Arc;

/// The resolver registry bound to one chain backend.
///
/// Cheap to share behind an `Arc`; execution takes `&self` and holds no
/// per-request state.
pub struct SchemaBinding {
    registry: ResolverRegistry,
}

impl SchemaBinding {
    pub fn new(chain: Arc<dyn ChainQuery>) -> Self {
        Self { registry: ResolverRegistry::build(chain) }
    }

    /// Executes one query document.
    ///
    /// Always returns a result; protocol-level failures (unparseable
    /// document, no selectable operation) surface as a null `data` with a
    /// single error entry, and field-level failures as null fields with
    /// per-path error entries.
    pub fn execute(
        &self,
        query: &str,
        variables: Option<&Map<String, Value>>,
        operation_name: Option<&str>,
        deadline: Deadline,
    ) -> QueryResult {
        execution::execute(&self.registry, query, variables, operation_name, deadline)
    }
}
