//! Error types for attack record decoding.

use thiserror::Error;

use super::types::AttackKind;

/// Reasons a single attack record is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Record did not split into `kind|params|color|ticks`.
    #[error("expected 4 '|'-separated fields, got {0}")]
    FieldCount(usize),

    /// Kind token is not one of the known attack names.
    #[error("unknown attack kind '{0}'")]
    UnknownKind(String),

    /// Parameter list has the wrong length for the kind.
    #[error("{kind} takes {expected} parameters, got {found}")]
    ParamCount {
        /// Attack kind being decoded.
        kind: AttackKind,
        /// Required parameter count.
        expected: usize,
        /// Parameters present in the record.
        found: usize,
    },

    /// A numeric parameter failed to parse.
    #[error("invalid {expected} '{value}' in {kind} parameters")]
    InvalidNumber {
        /// Attack kind being decoded.
        kind: AttackKind,
        /// Raw token.
        value: String,
        /// "float" or "integer".
        expected: &'static str,
    },

    /// Ticks field is not a non-negative integer.
    #[error("invalid tick count '{0}'")]
    InvalidTicks(String),
}
