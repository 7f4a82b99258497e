/// Scalar coercion failures, split by the operation that produced them.
/// These always surface as field-level errors, never as protocol failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoercionError {
    #[error("cannot serialize value as {kind}: {reason}")]
    Serialization { kind: &'static str, reason: String },
    #[error("invalid {kind} value: {reason}")]
    Value { kind: &'static str, reason: String },
    #[error("expected {expected} literal for {kind}, got {got}")]
    Literal { kind: &'static str, expected: &'static str, got: String },
}

/// Failures raised by a resolver or by argument coercion on its behalf.
///
/// "Not found" is never an error: resolvers return null for that. The
/// executor turns each of these into an entry in the result's `errors`
/// array without aborting sibling fields.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolverError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Coercion(#[from] CoercionError),
    #[error("internal resolver failure: {0}")]
    Internal(String),
}
