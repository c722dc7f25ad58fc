//! Arbitrary-predicate rule.

use std::fmt;

use serde_json::Value;

use crate::error::{Result, RuleError};
use crate::kind::RuleKind;

/// Wraps an arbitrary predicate function as a rule kind.
///
/// The escape hatch for checks the stock kinds do not cover. A callback
/// is configured with code, not with a configuration value; handing it
/// one is rejected.
pub struct Callback<F> {
    callback: F,
}

impl<F> Callback<F>
where
    F: Fn(&Value) -> bool,
{
    /// Wraps `callback` as a rule kind.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> RuleKind for Callback<F>
where
    F: Fn(&Value) -> bool,
{
    fn name(&self) -> &'static str {
        "callback"
    }

    fn check(&self, value: &Value) -> bool {
        (self.callback)(value)
    }

    fn set_config(&mut self, config: Option<&Value>) -> Result<()> {
        match config {
            None => Ok(()),
            Some(_) => Err(RuleError::InvalidConfiguration {
                kind: "callback",
                reason: "a callback rule is configured with code, not a value".into(),
            }),
        }
    }
}

impl<F> fmt::Debug for Callback<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback").finish_non_exhaustive()
    }
}
