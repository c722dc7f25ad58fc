//! Value length rule.

use serde_json::Value;

use crate::error::{Result, RuleError};
use crate::kind::RuleKind;

use super::value_len;

fn invalid(reason: impl Into<String>) -> RuleError {
    RuleError::InvalidConfiguration {
        kind: "length",
        reason: reason.into(),
    }
}

/// Checks that the value's length falls within configured bounds.
///
/// Strings are measured in characters, arrays and objects in items;
/// values without a length fail the check. The configuration is an
/// integer (exact length) or an object with `min` and/or `max` keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct Length {
    min: Option<u64>,
    max: Option<u64>,
}

impl Length {
    /// Requires at least `min` characters or items.
    pub fn min(min: u64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Allows at most `max` characters or items.
    pub fn max(max: u64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Requires exactly `len` characters or items.
    pub fn exact(len: u64) -> Self {
        Self {
            min: Some(len),
            max: Some(len),
        }
    }

    /// Requires between `min` and `max` characters or items.
    pub fn range(min: u64, max: u64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

impl RuleKind for Length {
    fn name(&self) -> &'static str {
        "length"
    }

    fn check(&self, value: &Value) -> bool {
        let Some(len) = value_len(value) else {
            return false;
        };
        self.min.map_or(true, |min| len >= min) && self.max.map_or(true, |max| len <= max)
    }

    fn set_config(&mut self, config: Option<&Value>) -> Result<()> {
        let Some(config) = config else {
            return if self.min.is_some() || self.max.is_some() {
                Ok(())
            } else {
                Err(invalid("a length bound is needed"))
            };
        };
        match config {
            Value::Number(n) => {
                let len = n
                    .as_u64()
                    .ok_or_else(|| invalid("length must be a non-negative integer"))?;
                self.min = Some(len);
                self.max = Some(len);
                Ok(())
            }
            Value::Object(map) => {
                let bound = |key: &str| -> Result<Option<u64>> {
                    match map.get(key) {
                        None | Some(Value::Null) => Ok(None),
                        Some(value) => value.as_u64().map(Some).ok_or_else(|| {
                            invalid(format!("\"{key}\" must be a non-negative integer"))
                        }),
                    }
                };
                let min = bound("min")?;
                let max = bound("max")?;
                if min.is_none() && max.is_none() {
                    return Err(invalid("at least one of \"min\" and \"max\" is needed"));
                }
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        return Err(invalid(format!("\"min\" {min} exceeds \"max\" {max}")));
                    }
                }
                self.min = min;
                self.max = max;
                Ok(())
            }
            other => Err(invalid(format!(
                "expected an integer or a min/max object, got {other}"
            ))),
        }
    }
}
