//! The five domain scalar codecs.
//!
//! Each codec follows the same three-operation contract:
//! - `serialize` produces the canonical wire string. Text input is
//!   re-validated with the `parse_value` grammar first, so a malformed
//!   string can never leak through serialization.
//! - `parse_value` coerces out-of-band input (variables). Text goes through
//!   the strict grammar; a native value of the right variant passes through
//!   unchanged; everything else is rejected.
//! - `parse_literal` coerces values written inline in the query document.
//!   Only string literals are accepted, except `Long` which also takes an
//!   integer literal (converted to its decimal text before parsing).
//!
//! Inputs are explicit tagged unions rather than dynamic type checks, so
//! every codec branch is exhaustive.

use crate::errors::CoercionError;
use ep_types::{Address, Bytes, Bytes32};
use num_bigint::BigInt;
use std::fmt;

/// A coerced domain value, as handed to resolvers.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Address(Address),
    Bytes(Bytes),
    Bytes32(Bytes32),
    BigInt(BigInt),
    Long(u64),
}

impl ScalarValue {
    pub fn kind(&self) -> ScalarKind {
        match self {
            ScalarValue::Address(_) => ScalarKind::Address,
            ScalarValue::Bytes(_) => ScalarKind::Bytes,
            ScalarValue::Bytes32(_) => ScalarKind::Bytes32,
            ScalarValue::BigInt(_) => ScalarKind::BigInt,
            ScalarValue::Long(_) => ScalarKind::Long,
        }
    }

    /// Canonical wire form.
    pub fn to_wire(&self) -> String {
        match self {
            ScalarValue::Address(v) => v.to_string(),
            ScalarValue::Bytes(v) => v.to_string(),
            ScalarValue::Bytes32(v) => v.to_string(),
            ScalarValue::BigInt(v) => v.to_string(),
            ScalarValue::Long(v) => v.to_string(),
        }
    }
}

/// Wire-side input to a codec: either text or an already-native value.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarInput {
    Text(String),
    Native(ScalarValue),
}

/// An inline literal from the query document, reduced to the node kinds the
/// codecs care about.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralNode {
    Str(String),
    Int(i64),
    Other(&'static str),
}

/// One variant per scalar codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Address,
    Bytes,
    Bytes32,
    BigInt,
    Long,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ScalarKind {
    pub fn name(&self) -> &'static str {
        match self {
            ScalarKind::Address => "Address",
            ScalarKind::Bytes => "Bytes",
            ScalarKind::Bytes32 => "Bytes32",
            ScalarKind::BigInt => "BigInt",
            ScalarKind::Long => "Long",
        }
    }

    /// Strict textual grammar of the scalar.
    fn parse_text(&self, text: &str) -> Result<ScalarValue, CoercionError> {
        let value_err = |reason: String| CoercionError::Value { kind: self.name(), reason };
        match self {
            ScalarKind::Address => {
                Address::from_hex(text).map(ScalarValue::Address).map_err(|e| value_err(e.to_string()))
            }
            ScalarKind::Bytes => {
                Bytes::from_hex(text).map(ScalarValue::Bytes).map_err(|e| value_err(e.to_string()))
            }
            ScalarKind::Bytes32 => {
                Bytes32::from_hex(text).map(ScalarValue::Bytes32).map_err(|e| value_err(e.to_string()))
            }
            ScalarKind::BigInt => text
                .parse::<BigInt>()
                .map(ScalarValue::BigInt)
                .map_err(|_| value_err(format!("'{text}' is not a base-10 integer"))),
            ScalarKind::Long => text
                .parse::<u64>()
                .map(ScalarValue::Long)
                .map_err(|_| value_err(format!("'{text}' is not an unsigned 64-bit integer"))),
        }
    }

    /// Coerces a variable-supplied value into the native type.
    pub fn parse_value(&self, input: ScalarInput) -> Result<ScalarValue, CoercionError> {
        match input {
            ScalarInput::Text(text) => self.parse_text(&text),
            ScalarInput::Native(value) if value.kind() == *self => Ok(value),
            ScalarInput::Native(value) => Err(CoercionError::Value {
                kind: self.name(),
                reason: format!("expected {} but got a native {}", self.name(), value.kind()),
            }),
        }
    }

    /// Coerces an inline query literal into the native type.
    pub fn parse_literal(&self, node: &LiteralNode) -> Result<ScalarValue, CoercionError> {
        match node {
            LiteralNode::Str(text) => self.parse_text(text).map_err(|e| match e {
                CoercionError::Value { kind, reason } => CoercionError::Literal {
                    kind,
                    expected: "a valid StringValue",
                    got: reason,
                },
                other => other,
            }),
            LiteralNode::Int(n) if *self == ScalarKind::Long => {
                // Integer literals are allowed for Long only; they go
                // through the same decimal-text grammar.
                self.parse_text(&n.to_string()).map_err(|e| match e {
                    CoercionError::Value { kind, reason } => CoercionError::Literal {
                        kind,
                        expected: "a non-negative IntValue",
                        got: reason,
                    },
                    other => other,
                })
            }
            LiteralNode::Int(_) => Err(CoercionError::Literal {
                kind: self.name(),
                expected: "StringValue",
                got: "IntValue".to_string(),
            }),
            LiteralNode::Other(kind) => Err(CoercionError::Literal {
                kind: self.name(),
                expected: if *self == ScalarKind::Long { "StringValue or IntValue" } else { "StringValue" },
                got: (*kind).to_string(),
            }),
        }
    }

    /// Produces the canonical string form of a result value.
    pub fn serialize(&self, input: ScalarInput) -> Result<String, CoercionError> {
        match input {
            ScalarInput::Text(text) => {
                let value = self.parse_text(&text).map_err(|e| CoercionError::Serialization {
                    kind: self.name(),
                    reason: e.to_string(),
                })?;
                Ok(value.to_wire())
            }
            ScalarInput::Native(value) if value.kind() == *self => Ok(value.to_wire()),
            ScalarInput::Native(value) => Err(CoercionError::Serialization {
                kind: self.name(),
                reason: format!("expected {} but got a native {}", self.name(), value.kind()),
            }),
        }
    }
}
