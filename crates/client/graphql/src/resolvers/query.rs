//! Top-level `Query` fields.

use super::{ArgSpec, FieldResolver, Parent, RegistryBuilder, Resolved};
use crate::errors::ResolverError;
use crate::scalars::ScalarKind;
use ec_chain::ChainQuery;
use std::sync::Arc;

pub(crate) fn bind(builder: &mut RegistryBuilder, chain: &Arc<dyn ChainQuery>) {
    let lookup = Arc::clone(chain);
    builder.bind(
        "Query",
        "block",
        FieldResolver::new(
            vec![
                ArgSpec::optional("number", ScalarKind::Long),
                ArgSpec::optional("hash", ScalarKind::Bytes32),
            ],
            move |args, _parent| {
                // hash takes precedence when both are supplied.
                let block = if let Some(hash) = args.bytes32("hash") {
                    lookup.block_by_hash(hash)
                } else if let Some(number) = args.long("number") {
                    lookup.block_by_number(number)
                } else {
                    lookup.latest_block()
                };
                Ok(block.map_or(Resolved::Null, |b| Resolved::Object(Parent::Block(b))))
            },
        ),
    );

    let lookup = Arc::clone(chain);
    builder.bind(
        "Query",
        "blocks",
        FieldResolver::new(
            vec![
                ArgSpec::required("from", ScalarKind::Long),
                ArgSpec::optional("to", ScalarKind::Long),
            ],
            move |args, _parent| {
                let from = args
                    .long("from")
                    .ok_or_else(|| ResolverError::InvalidArgument("missing required argument 'from'".into()))?;
                let to = args.long("to").unwrap_or_else(|| lookup.head_block_number());
                if from > to {
                    return Err(ResolverError::InvalidArgument(format!(
                        "invalid block range: from ({from}) is higher than to ({to})"
                    )));
                }
                // One entry per height; a hole in history is a null entry,
                // not a failed request.
                let entries = (from..=to)
                    .map(|n| {
                        lookup
                            .block_by_number(n)
                            .map_or(Resolved::Null, |b| Resolved::Object(Parent::Block(b)))
                    })
                    .collect();
                Ok(Resolved::List(entries))
            },
        ),
    );

    let lookup = Arc::clone(chain);
    builder.bind(
        "Query",
        "transaction",
        FieldResolver::new(
            vec![ArgSpec::required("hash", ScalarKind::Bytes32)],
            move |args, _parent| {
                let hash = args
                    .bytes32("hash")
                    .ok_or_else(|| ResolverError::InvalidArgument("missing required argument 'hash'".into()))?;
                // Confirmed history first, then the pending pool.
                let tx = lookup.transaction_by_hash(hash).or_else(|| lookup.pending_transaction(hash));
                Ok(tx.map_or(Resolved::Null, |t| Resolved::Object(Parent::Transaction(t))))
            },
        ),
    );
}
