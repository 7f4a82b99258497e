//! `Account` fields.

use super::{expect_account, ArgSpec, FieldResolver, RegistryBuilder, Resolved};
use crate::errors::ResolverError;
use crate::scalars::{ScalarKind, ScalarValue};
use ec_chain::ChainQuery;
use std::sync::Arc;

pub(crate) fn bind(builder: &mut RegistryBuilder, _chain: &Arc<dyn ChainQuery>) {
    builder.bind(
        "Account",
        "address",
        FieldResolver::new(vec![], |_args, parent| {
            Ok(Resolved::Scalar(ScalarValue::Address(expect_account(parent)?.address)))
        }),
    );

    builder.bind(
        "Account",
        "balance",
        FieldResolver::new(vec![], |_args, parent| {
            Ok(Resolved::Scalar(ScalarValue::BigInt(expect_account(parent)?.balance.clone())))
        }),
    );

    builder.bind(
        "Account",
        "transactionCount",
        FieldResolver::new(vec![], |_args, parent| {
            Ok(Resolved::Scalar(ScalarValue::Long(expect_account(parent)?.nonce)))
        }),
    );

    builder.bind(
        "Account",
        "code",
        FieldResolver::new(vec![], |_args, parent| {
            Ok(Resolved::Scalar(ScalarValue::Bytes(expect_account(parent)?.code.clone())))
        }),
    );

    // Storage is a pass-through of the requested slot: the real trie lookup
    // lives behind the chain interface and is not wired up here yet.
    builder.bind(
        "Account",
        "storage",
        FieldResolver::new(
            vec![ArgSpec::required("slot", ScalarKind::Bytes32)],
            |args, parent| {
                expect_account(parent)?;
                let slot = args
                    .bytes32("slot")
                    .ok_or_else(|| ResolverError::InvalidArgument("missing required argument 'slot'".into()))?;
                Ok(Resolved::Scalar(ScalarValue::Bytes32(*slot)))
            },
        ),
    );
}
