//! Field resolvers and the `(type, field) -> handler` registry.
//!
//! The registry is assembled once from a [`ChainQuery`] handle and never
//! mutated afterwards; the same chain handle always produces the same
//! bindings. Each handler declares the argument shape it expects, and the
//! executor coerces arguments before the handler runs, so handlers only ever
//! see native [`ScalarValue`]s.

pub(crate) mod account;
pub(crate) mod block;
pub(crate) mod query;
pub(crate) mod transaction;

use crate::errors::ResolverError;
use crate::scalars::{ScalarKind, ScalarValue};
use ec_chain::{BlockInfo, ChainQuery, TransactionInfo};
use ep_types::{Address, Bytes, Bytes32};
use num_bigint::BigInt;
use std::collections::HashMap;
use std::sync::Arc;

/// Value produced by the parent field, handed down to child resolvers.
#[derive(Debug, Clone)]
pub enum Parent {
    Block(Arc<BlockInfo>),
    Account(AccountView),
    Transaction(Arc<TransactionInfo>),
}

impl Parent {
    pub fn type_name(&self) -> &'static str {
        match self {
            Parent::Block(_) => "Block",
            Parent::Account(_) => "Account",
            Parent::Transaction(_) => "Transaction",
        }
    }
}

/// An account joined with its state at one block height. Absent state
/// defaults to zero/empty rather than failing.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountView {
    pub address: Address,
    pub balance: BigInt,
    pub nonce: u64,
    pub code: Bytes,
}

/// What a resolver hands back to the executor.
#[derive(Debug, Clone)]
pub enum Resolved {
    Null,
    Scalar(ScalarValue),
    Object(Parent),
    List(Vec<Resolved>),
}

/// Coerced arguments, keyed by declared name.
#[derive(Debug, Default)]
pub struct Args(HashMap<&'static str, ScalarValue>);

impl Args {
    pub(crate) fn insert(&mut self, name: &'static str, value: ScalarValue) {
        self.0.insert(name, value);
    }

    pub fn long(&self, name: &str) -> Option<u64> {
        match self.0.get(name) {
            Some(ScalarValue::Long(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn bytes32(&self, name: &str) -> Option<&Bytes32> {
        match self.0.get(name) {
            Some(ScalarValue::Bytes32(v)) => Some(v),
            _ => None,
        }
    }

    pub fn address(&self, name: &str) -> Option<&Address> {
        match self.0.get(name) {
            Some(ScalarValue::Address(v)) => Some(v),
            _ => None,
        }
    }
}

/// Declared shape of one resolver argument.
#[derive(Debug, Clone, Copy)]
pub struct ArgSpec {
    pub name: &'static str,
    pub kind: ScalarKind,
    pub required: bool,
}

impl ArgSpec {
    pub const fn required(name: &'static str, kind: ScalarKind) -> Self {
        Self { name, kind, required: true }
    }

    pub const fn optional(name: &'static str, kind: ScalarKind) -> Self {
        Self { name, kind, required: false }
    }
}

type HandlerFn = dyn Fn(&Args, Option<&Parent>) -> Result<Resolved, ResolverError> + Send + Sync;

/// One field handler plus its declared argument shape.
pub struct FieldResolver {
    args: Vec<ArgSpec>,
    handler: Box<HandlerFn>,
}

impl FieldResolver {
    pub fn new(
        args: Vec<ArgSpec>,
        handler: impl Fn(&Args, Option<&Parent>) -> Result<Resolved, ResolverError> + Send + Sync + 'static,
    ) -> Self {
        Self { args, handler: Box::new(handler) }
    }

    pub fn arg_specs(&self) -> &[ArgSpec] {
        &self.args
    }

    pub fn call(&self, args: &Args, parent: Option<&Parent>) -> Result<Resolved, ResolverError> {
        (self.handler)(args, parent)
    }
}

/// Immutable `type -> field -> resolver` map. Nested rather than keyed by a
/// tuple so lookups work with borrowed names straight out of the query
/// document.
pub struct ResolverRegistry {
    map: HashMap<&'static str, HashMap<&'static str, FieldResolver>>,
}

impl ResolverRegistry {
    pub fn build(chain: Arc<dyn ChainQuery>) -> Self {
        let mut builder = RegistryBuilder { map: HashMap::new() };
        query::bind(&mut builder, &chain);
        block::bind(&mut builder, &chain);
        account::bind(&mut builder, &chain);
        transaction::bind(&mut builder, &chain);
        Self { map: builder.map }
    }

    pub fn get(&self, type_name: &str, field: &str) -> Option<&FieldResolver> {
        self.map.get(type_name)?.get(field)
    }

    pub fn len(&self) -> usize {
        self.map.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub(crate) struct RegistryBuilder {
    map: HashMap<&'static str, HashMap<&'static str, FieldResolver>>,
}

impl RegistryBuilder {
    /// Binds a resolver; at most one handler per `(type, field)` pair.
    pub(crate) fn bind(&mut self, type_name: &'static str, field: &'static str, resolver: FieldResolver) {
        let previous = self.map.entry(type_name).or_default().insert(field, resolver);
        assert!(previous.is_none(), "duplicate resolver binding for {type_name}.{field}");
    }
}

/// Pulls the block parent out or reports a wiring bug.
pub(crate) fn expect_block<'p>(parent: Option<&'p Parent>) -> Result<&'p Arc<BlockInfo>, ResolverError> {
    match parent {
        Some(Parent::Block(block)) => Ok(block),
        other => Err(ResolverError::Internal(format!(
            "resolver expected a Block parent, got {}",
            other.map(Parent::type_name).unwrap_or("none")
        ))),
    }
}

pub(crate) fn expect_account<'p>(parent: Option<&'p Parent>) -> Result<&'p AccountView, ResolverError> {
    match parent {
        Some(Parent::Account(account)) => Ok(account),
        other => Err(ResolverError::Internal(format!(
            "resolver expected an Account parent, got {}",
            other.map(Parent::type_name).unwrap_or("none")
        ))),
    }
}

pub(crate) fn expect_transaction<'p>(
    parent: Option<&'p Parent>,
) -> Result<&'p Arc<TransactionInfo>, ResolverError> {
    match parent {
        Some(Parent::Transaction(tx)) => Ok(tx),
        other => Err(ResolverError::Internal(format!(
            "resolver expected a Transaction parent, got {}",
            other.map(Parent::type_name).unwrap_or("none")
        ))),
    }
}

/// Joins an address with its state at `height`, defaulting absent state.
pub(crate) fn account_at(chain: &Arc<dyn ChainQuery>, address: Address, height: u64) -> AccountView {
    AccountView {
        address,
        balance: chain.account_balance(&address, height).unwrap_or_default(),
        nonce: chain.account_nonce(&address, height).unwrap_or(0),
        code: chain.code_at(&address, height).unwrap_or_default(),
    }
}
