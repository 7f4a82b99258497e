use ep_types::{Address, Bytes, Bytes32};
use num_bigint::BigInt;
use std::sync::Arc;

/// Header-level view of one block, with its transactions attached.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockInfo {
    pub number: u64,
    pub hash: Bytes32,
    pub parent_hash: Bytes32,
    /// Coinbase address credited with the block reward.
    pub coinbase: Address,
    pub timestamp: BigInt,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub transactions: Vec<Arc<TransactionInfo>>,
}

/// One transaction, confirmed or pending. Block linkage fields are `None`
/// while the transaction sits in the pending pool.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInfo {
    pub hash: Bytes32,
    pub nonce: u64,
    pub from: Address,
    /// `None` for contract-creation transactions.
    pub to: Option<Address>,
    pub value: BigInt,
    pub gas_price: BigInt,
    pub gas: u64,
    pub input: Bytes,
    pub block_hash: Option<Bytes32>,
    pub block_number: Option<u64>,
    pub index: Option<u64>,
}
