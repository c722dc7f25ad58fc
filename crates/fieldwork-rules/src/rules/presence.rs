//! Presence rules: nonempty, empty, required.

use serde_json::Value;

use crate::error::{Result, RuleError};
use crate::kind::RuleKind;

use super::nonempty_count;

/// Checks that the element's value is not empty.
///
/// `Null`, empty strings, empty arrays and empty objects count as empty;
/// numbers and booleans never do. For array values the configuration may
/// raise the number of non-empty items the check expects (a positive
/// integer, default 1).
#[derive(Debug, Clone)]
pub struct Nonempty {
    min_items: u64,
}

impl Nonempty {
    /// Creates the check expecting at least one non-empty item.
    pub fn new() -> Self {
        Self { min_items: 1 }
    }

    /// Creates the check expecting at least `min_items` non-empty items
    /// in an array value.
    pub fn min_items(min_items: u64) -> Self {
        Self { min_items }
    }
}

impl Default for Nonempty {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleKind for Nonempty {
    fn name(&self) -> &'static str {
        "nonempty"
    }

    fn check(&self, value: &Value) -> bool {
        nonempty_count(value) >= self.min_items
    }

    fn set_config(&mut self, config: Option<&Value>) -> Result<()> {
        let Some(config) = config else {
            return Ok(());
        };
        match config.as_u64() {
            Some(count) if count > 0 => {
                self.min_items = count;
                Ok(())
            }
            _ => Err(RuleError::InvalidConfiguration {
                kind: "nonempty",
                reason: format!("expected a positive item count, got {config}"),
            }),
        }
    }
}

/// Checks that the element's value is empty.
///
/// The counterpart of [`Nonempty`]; useful as an "or" escape hatch for
/// optional fields whose format checks should only apply once something
/// is filled in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

impl Empty {
    /// Creates the check.
    pub fn new() -> Self {
        Self
    }
}

impl RuleKind for Empty {
    fn name(&self) -> &'static str {
        "empty"
    }

    fn check(&self, value: &Value) -> bool {
        nonempty_count(value) == 0
    }
}

/// Marks the element as mandatory: the value must be non-empty.
///
/// Required rules anchor a chain; adding one through
/// [`Rule::and`](crate::Rule::and) or [`Rule::or`](crate::Rule::or) is
/// rejected, and a required rule must carry a non-empty error message.
#[derive(Debug, Clone, Default)]
pub struct Required {
    inner: Nonempty,
}

impl Required {
    /// Creates the check.
    pub fn new() -> Self {
        Self {
            inner: Nonempty::new(),
        }
    }
}

impl RuleKind for Required {
    fn name(&self) -> &'static str {
        "required"
    }

    fn check(&self, value: &Value) -> bool {
        self.inner.check(value)
    }

    fn set_config(&mut self, config: Option<&Value>) -> Result<()> {
        self.inner.set_config(config)
    }

    fn is_required(&self) -> bool {
        true
    }
}
