//! `Transaction` fields.

use super::{expect_transaction, FieldResolver, Parent, RegistryBuilder, Resolved};
use crate::scalars::ScalarValue;
use ec_chain::{ChainQuery, TransactionInfo};
use std::sync::Arc;

fn scalar_field(
    builder: &mut RegistryBuilder,
    field: &'static str,
    project: impl Fn(&TransactionInfo) -> Option<ScalarValue> + Send + Sync + 'static,
) {
    builder.bind(
        "Transaction",
        field,
        FieldResolver::new(vec![], move |_args, parent| {
            Ok(project(expect_transaction(parent)?).map_or(Resolved::Null, Resolved::Scalar))
        }),
    );
}

pub(crate) fn bind(builder: &mut RegistryBuilder, chain: &Arc<dyn ChainQuery>) {
    scalar_field(builder, "hash", |tx| Some(ScalarValue::Bytes32(tx.hash)));
    scalar_field(builder, "nonce", |tx| Some(ScalarValue::Long(tx.nonce)));
    scalar_field(builder, "from", |tx| Some(ScalarValue::Address(tx.from)));
    // `to` is null for contract creation; `index` is null while pending.
    scalar_field(builder, "to", |tx| tx.to.map(ScalarValue::Address));
    scalar_field(builder, "value", |tx| Some(ScalarValue::BigInt(tx.value.clone())));
    scalar_field(builder, "gasPrice", |tx| Some(ScalarValue::BigInt(tx.gas_price.clone())));
    scalar_field(builder, "gas", |tx| Some(ScalarValue::Long(tx.gas)));
    scalar_field(builder, "inputData", |tx| Some(ScalarValue::Bytes(tx.input.clone())));
    scalar_field(builder, "index", |tx| tx.index.map(ScalarValue::Long));

    let lookup = Arc::clone(chain);
    builder.bind(
        "Transaction",
        "block",
        FieldResolver::new(vec![], move |_args, parent| {
            let tx = expect_transaction(parent)?;
            Ok(tx
                .block_number
                .and_then(|n| lookup.block_by_number(n))
                .map_or(Resolved::Null, |b| Resolved::Object(Parent::Block(b))))
        }),
    );
}
