//! The predicate contract implemented by every rule kind.

use serde_json::Value;

use crate::error::Result;

/// A concrete rule kind: a value predicate plus its configuration
/// behavior.
///
/// Kinds are pure predicates; they never touch the owner's error slot.
/// Error reporting belongs to [`Rule::validate`](crate::Rule::validate).
pub trait RuleKind {
    /// Short name of the kind, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Checks a value against this kind's predicate.
    fn check(&self, value: &Value) -> bool;

    /// Validates and absorbs the merged configuration.
    ///
    /// `None` means no configuration was supplied. Kinds configured
    /// through typed constructors accept that; kinds whose configuration
    /// is mandatory reject it with
    /// [`RuleError::InvalidConfiguration`](crate::RuleError::InvalidConfiguration).
    fn set_config(&mut self, config: Option<&Value>) -> Result<()> {
        let _ = config;
        Ok(())
    }

    /// Merges rule-local configuration with type-wide configuration.
    ///
    /// Default policy: a present type-wide configuration wins entirely
    /// over the local one. Kinds may implement finer merging.
    fn merge_config(&self, local: Option<Value>, global: Option<Value>) -> Option<Value> {
        global.or(local)
    }

    /// Whether this kind anchors a chain ("required" semantics).
    ///
    /// Required kinds may not be added to a chain with
    /// [`Rule::and`](crate::Rule::and) or [`Rule::or`](crate::Rule::or);
    /// they can only anchor one.
    fn is_required(&self) -> bool {
        false
    }
}
