//! Regular-expression rule.

use regex::Regex;
use serde_json::Value;

use crate::error::{Result, RuleError};
use crate::kind::RuleKind;

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|err| RuleError::InvalidConfiguration {
        kind: "pattern",
        reason: err.to_string(),
    })
}

/// Checks that a string value matches a regular expression.
///
/// Non-string values fail the check. Unset values and the empty string
/// pass: whether a value may be empty at all is
/// [`Required`](crate::rules::Required)'s concern. The configuration is
/// the pattern string; an unconfigured check rejects everything and rule
/// construction demands a pattern.
#[derive(Debug, Clone, Default)]
pub struct Pattern {
    regex: Option<Regex>,
}

impl Pattern {
    /// Compiles `pattern` into the check.
    ///
    /// # Errors
    ///
    /// [`RuleError::InvalidConfiguration`] when the pattern does not
    /// compile.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            regex: Some(compile(pattern)?),
        })
    }
}

impl RuleKind for Pattern {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn check(&self, value: &Value) -> bool {
        let Some(regex) = &self.regex else {
            return false;
        };
        match value {
            Value::Null => true,
            Value::String(s) => s.is_empty() || regex.is_match(s),
            _ => false,
        }
    }

    fn set_config(&mut self, config: Option<&Value>) -> Result<()> {
        match config {
            Some(Value::String(pattern)) => {
                self.regex = Some(compile(pattern)?);
                Ok(())
            }
            Some(other) => Err(RuleError::InvalidConfiguration {
                kind: "pattern",
                reason: format!("expected a pattern string, got {other}"),
            }),
            None if self.regex.is_some() => Ok(()),
            None => Err(RuleError::InvalidConfiguration {
                kind: "pattern",
                reason: "a pattern string is needed".into(),
            }),
        }
    }
}
