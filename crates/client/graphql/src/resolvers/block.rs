//! `Block` fields.

use super::{account_at, expect_block, ArgSpec, FieldResolver, Parent, RegistryBuilder, Resolved};
use crate::errors::ResolverError;
use crate::scalars::{ScalarKind, ScalarValue};
use ec_chain::ChainQuery;
use std::sync::Arc;

/// Binds a no-argument scalar projection of the parent block.
fn scalar_field(
    builder: &mut RegistryBuilder,
    field: &'static str,
    project: impl Fn(&ec_chain::BlockInfo) -> ScalarValue + Send + Sync + 'static,
) {
    builder.bind(
        "Block",
        field,
        FieldResolver::new(vec![], move |_args, parent| {
            Ok(Resolved::Scalar(project(expect_block(parent)?)))
        }),
    );
}

pub(crate) fn bind(builder: &mut RegistryBuilder, chain: &Arc<dyn ChainQuery>) {
    scalar_field(builder, "number", |b| ScalarValue::Long(b.number));
    scalar_field(builder, "hash", |b| ScalarValue::Bytes32(b.hash));
    scalar_field(builder, "timestamp", |b| ScalarValue::BigInt(b.timestamp.clone()));
    scalar_field(builder, "gasLimit", |b| ScalarValue::Long(b.gas_limit));
    scalar_field(builder, "gasUsed", |b| ScalarValue::Long(b.gas_used));
    scalar_field(builder, "transactionCount", |b| ScalarValue::Long(b.transactions.len() as u64));

    let lookup = Arc::clone(chain);
    builder.bind(
        "Block",
        "parent",
        FieldResolver::new(vec![], move |_args, parent| {
            let block = expect_block(parent)?;
            Ok(lookup
                .block_by_hash(&block.parent_hash)
                .map_or(Resolved::Null, |b| Resolved::Object(Parent::Block(b))))
        }),
    );

    builder.bind(
        "Block",
        "transactions",
        FieldResolver::new(vec![], move |_args, parent| {
            let block = expect_block(parent)?;
            Ok(Resolved::List(
                block
                    .transactions
                    .iter()
                    .map(|tx| Resolved::Object(Parent::Transaction(Arc::clone(tx))))
                    .collect(),
            ))
        }),
    );

    // The miner account is joined at this block's own height.
    let lookup = Arc::clone(chain);
    builder.bind(
        "Block",
        "miner",
        FieldResolver::new(vec![], move |_args, parent| {
            let block = expect_block(parent)?;
            Ok(Resolved::Object(Parent::Account(account_at(&lookup, block.coinbase, block.number))))
        }),
    );

    let lookup = Arc::clone(chain);
    builder.bind(
        "Block",
        "account",
        FieldResolver::new(
            vec![ArgSpec::required("address", ScalarKind::Address)],
            move |args, parent| {
                let block = expect_block(parent)?;
                let address = args
                    .address("address")
                    .ok_or_else(|| ResolverError::InvalidArgument("missing required argument 'address'".into()))?;
                Ok(Resolved::Object(Parent::Account(account_at(&lookup, *address, block.number))))
            },
        ),
    );
}
