//! Read-only access to chain state, as consumed by the query gateway.
//!
//! The gateway never owns chain data; everything goes through [`ChainQuery`].
//! Implementations must tolerate concurrent reads from many resolver
//! invocations without external locking. Lookups return `None` for anything
//! absent: "not found" is a domain answer, not an error.

mod block;
mod memory;

pub use block::{BlockInfo, TransactionInfo};
pub use memory::{devnet_block_hash, devnet_coinbase, devnet_tx_hash, MemoryChain};

use ep_types::{Address, Bytes, Bytes32};
use num_bigint::BigInt;
use std::sync::Arc;

pub trait ChainQuery: Send + Sync {
    fn block_by_number(&self, number: u64) -> Option<Arc<BlockInfo>>;

    fn block_by_hash(&self, hash: &Bytes32) -> Option<Arc<BlockInfo>>;

    fn latest_block(&self) -> Option<Arc<BlockInfo>>;

    /// Height of the chain head. Zero on an empty chain.
    fn head_block_number(&self) -> u64;

    /// Balance of `address` as of block `height`.
    fn account_balance(&self, address: &Address, height: u64) -> Option<BigInt>;

    /// Nonce of `address` as of block `height`.
    fn account_nonce(&self, address: &Address, height: u64) -> Option<u64>;

    /// Deployed code of `address` as of block `height`.
    fn code_at(&self, address: &Address, height: u64) -> Option<Bytes>;

    /// Confirmed transaction lookup.
    fn transaction_by_hash(&self, hash: &Bytes32) -> Option<Arc<TransactionInfo>>;

    /// Pending-pool lookup, consulted after confirmed history.
    fn pending_transaction(&self, hash: &Bytes32) -> Option<Arc<TransactionInfo>>;
}
