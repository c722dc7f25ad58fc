//! Error types for the rule engine.

use thiserror::Error;

/// Rule-engine errors.
///
/// Note that a rule chain evaluating to `false` is not an error; it is the
/// normal outcome of [`Rule::validate`](crate::Rule::validate).
#[derive(Debug, Error)]
pub enum RuleError {
    /// A "required" rule can only anchor a chain, never be a member of one.
    #[error("{op}(): cannot add a \"required\" rule to a chain")]
    IllegalChainOperand { op: &'static str },

    /// A rule kind rejected its merged configuration.
    #[error("invalid configuration for \"{kind}\" rule: {reason}")]
    InvalidConfiguration { kind: &'static str, reason: String },

    /// No rule type with this name is registered.
    #[error("rule type \"{0}\" is not registered")]
    UnknownRuleType(String),
}

/// Result type alias for rule operations.
pub type Result<T> = std::result::Result<T, RuleError>;
