use crate::{BlockInfo, ChainQuery, TransactionInfo};
use ep_types::{Address, Bytes, Bytes32};
use num_bigint::BigInt;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
struct AccountState {
    balance: BigInt,
    nonce: u64,
    code: Bytes,
}

/// In-memory [`ChainQuery`] backend.
///
/// Built once (devnet preset or insert calls), then shared behind an `Arc`
/// and only read. Account state is not historized: the same state is
/// reported at every height, which is all the dev chain needs.
#[derive(Debug, Default)]
pub struct MemoryChain {
    blocks: BTreeMap<u64, Arc<BlockInfo>>,
    by_hash: HashMap<Bytes32, u64>,
    accounts: HashMap<Address, AccountState>,
    confirmed_txs: HashMap<Bytes32, Arc<TransactionInfo>>,
    pending_txs: HashMap<Bytes32, Arc<TransactionInfo>>,
}

impl MemoryChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic dev chain with blocks `0..=blocks`, one transaction per
    /// block past genesis, and funded coinbase accounts.
    pub fn devnet(blocks: u64) -> Self {
        let mut chain = Self::new();
        let mut parent_hash = Bytes32::default();
        for n in 0..=blocks {
            let hash = devnet_block_hash(n);
            let coinbase = devnet_coinbase(n);
            let transactions = if n == 0 {
                vec![]
            } else {
                vec![TransactionInfo {
                    hash: devnet_tx_hash(n),
                    nonce: n - 1,
                    from: devnet_coinbase(n - 1),
                    to: Some(coinbase),
                    value: BigInt::from(n) * BigInt::from(1_000_000_000u64),
                    gas_price: BigInt::from(1_000_000_000u64),
                    gas: 21_000,
                    input: Bytes::default(),
                    block_hash: None, // filled by insert_block
                    block_number: None,
                    index: None,
                }]
            };
            chain.insert_block(BlockInfo {
                number: n,
                hash,
                parent_hash,
                coinbase,
                timestamp: BigInt::from(1_600_000_000u64 + n * 15),
                gas_limit: 8_000_000,
                gas_used: 21_000 * transactions.len() as u64,
                transactions: transactions.into_iter().map(Arc::new).collect(),
            });
            chain.set_account(coinbase, BigInt::from(2u64) * BigInt::from(10u64).pow(18), n, Bytes::default());
            parent_hash = hash;
        }
        chain
    }

    /// Inserts a block, indexing it by number and hash and linking its
    /// transactions back to it.
    pub fn insert_block(&mut self, mut block: BlockInfo) {
        let number = block.number;
        let hash = block.hash;
        block.transactions = block
            .transactions
            .into_iter()
            .enumerate()
            .map(|(i, tx)| {
                let mut tx = (*tx).clone();
                tx.block_hash = Some(hash);
                tx.block_number = Some(number);
                tx.index = Some(i as u64);
                Arc::new(tx)
            })
            .collect();
        for tx in &block.transactions {
            self.confirmed_txs.insert(tx.hash, Arc::clone(tx));
        }
        self.by_hash.insert(hash, number);
        self.blocks.insert(number, Arc::new(block));
    }

    /// Removes a block from the number index, leaving a hole. Used to model
    /// gappy history in tests.
    pub fn remove_block(&mut self, number: u64) {
        if let Some(block) = self.blocks.remove(&number) {
            self.by_hash.remove(&block.hash);
        }
    }

    pub fn insert_pending(&mut self, tx: TransactionInfo) {
        self.pending_txs.insert(tx.hash, Arc::new(tx));
    }

    pub fn set_account(&mut self, address: Address, balance: BigInt, nonce: u64, code: Bytes) {
        self.accounts.insert(address, AccountState { balance, nonce, code });
    }
}

impl ChainQuery for MemoryChain {
    fn block_by_number(&self, number: u64) -> Option<Arc<BlockInfo>> {
        self.blocks.get(&number).cloned()
    }

    fn block_by_hash(&self, hash: &Bytes32) -> Option<Arc<BlockInfo>> {
        self.by_hash.get(hash).and_then(|n| self.blocks.get(n)).cloned()
    }

    fn latest_block(&self) -> Option<Arc<BlockInfo>> {
        self.blocks.values().next_back().cloned()
    }

    fn head_block_number(&self) -> u64 {
        self.blocks.keys().next_back().copied().unwrap_or(0)
    }

    fn account_balance(&self, address: &Address, _height: u64) -> Option<BigInt> {
        self.accounts.get(address).map(|a| a.balance.clone())
    }

    fn account_nonce(&self, address: &Address, _height: u64) -> Option<u64> {
        self.accounts.get(address).map(|a| a.nonce)
    }

    fn code_at(&self, address: &Address, _height: u64) -> Option<Bytes> {
        self.accounts.get(address).map(|a| a.code.clone())
    }

    fn transaction_by_hash(&self, hash: &Bytes32) -> Option<Arc<TransactionInfo>> {
        self.confirmed_txs.get(hash).cloned()
    }

    fn pending_transaction(&self, hash: &Bytes32) -> Option<Arc<TransactionInfo>> {
        self.pending_txs.get(hash).cloned()
    }
}

pub fn devnet_block_hash(number: u64) -> Bytes32 {
    let mut bytes = [0u8; 32];
    bytes[0] = 0xb1;
    bytes[24..].copy_from_slice(&number.to_be_bytes());
    Bytes32::from(bytes)
}

pub fn devnet_tx_hash(number: u64) -> Bytes32 {
    let mut bytes = [0u8; 32];
    bytes[0] = 0x7a;
    bytes[24..].copy_from_slice(&number.to_be_bytes());
    Bytes32::from(bytes)
}

pub fn devnet_coinbase(number: u64) -> Address {
    let mut bytes = [0u8; 20];
    bytes[0] = 0xc0;
    bytes[12..].copy_from_slice(&number.to_be_bytes());
    Address::from(bytes)
}
