//! Cross-value comparison rule.

use std::cmp::Ordering;
use std::fmt;

use serde_json::Value;

use crate::element::ElementRef;
use crate::error::{Result, RuleError};
use crate::kind::RuleKind;

fn invalid(reason: impl Into<String>) -> RuleError {
    RuleError::InvalidConfiguration {
        kind: "compare",
        reason: reason.into(),
    }
}

/// Comparison operator understood by [`Compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Operator {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "==" | "eq" => Some(Self::Eq),
            "!=" | "ne" => Some(Self::Ne),
            "<" | "lt" => Some(Self::Lt),
            "<=" | "le" => Some(Self::Le),
            ">" | "gt" => Some(Self::Gt),
            ">=" | "ge" => Some(Self::Ge),
            _ => None,
        }
    }
}

enum Operand {
    Literal(Value),
    Element(ElementRef),
}

impl Operand {
    fn resolve(&self) -> Value {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Element(element) => element.value(),
        }
    }
}

/// Compares the owner's value against an operand.
///
/// The operand is a literal from the configuration
/// (`{"operator": "..", "operand": ..}`, operator defaulting to `==`) or
/// another element's current value, which makes "password equals
/// confirmation" style rules possible. Equality follows value equality;
/// the ordering operators compare numerically and fail the check when
/// either side is not a number.
pub struct Compare {
    operator: Operator,
    operand: Option<Operand>,
}

impl Compare {
    /// Compares against a literal value.
    pub fn to_value(operator: Operator, operand: impl Into<Value>) -> Self {
        Self {
            operator,
            operand: Some(Operand::Literal(operand.into())),
        }
    }

    /// Compares against another element's current value.
    pub fn to_element(operator: Operator, other: ElementRef) -> Self {
        Self {
            operator,
            operand: Some(Operand::Element(other)),
        }
    }
}

impl Default for Compare {
    fn default() -> Self {
        Self {
            operator: Operator::Eq,
            operand: None,
        }
    }
}

impl RuleKind for Compare {
    fn name(&self) -> &'static str {
        "compare"
    }

    fn check(&self, value: &Value) -> bool {
        let Some(operand) = &self.operand else {
            return false;
        };
        let operand = operand.resolve();
        match self.operator {
            Operator::Eq => *value == operand,
            Operator::Ne => *value != operand,
            op => {
                let (Some(lhs), Some(rhs)) = (value.as_f64(), operand.as_f64()) else {
                    return false;
                };
                matches!(
                    (op, lhs.partial_cmp(&rhs)),
                    (Operator::Lt, Some(Ordering::Less))
                        | (Operator::Gt, Some(Ordering::Greater))
                        | (Operator::Le, Some(Ordering::Less | Ordering::Equal))
                        | (Operator::Ge, Some(Ordering::Greater | Ordering::Equal))
                )
            }
        }
    }

    fn set_config(&mut self, config: Option<&Value>) -> Result<()> {
        let Some(config) = config else {
            return if self.operand.is_some() {
                Ok(())
            } else {
                Err(invalid("an operand to compare against is needed"))
            };
        };
        let Value::Object(map) = config else {
            return Err(invalid(format!(
                "expected an operator/operand object, got {config}"
            )));
        };
        let operator = match map.get("operator") {
            None | Some(Value::Null) => Operator::Eq,
            Some(Value::String(s)) => {
                Operator::parse(s).ok_or_else(|| invalid(format!("unknown operator \"{s}\"")))?
            }
            Some(other) => {
                return Err(invalid(format!("expected an operator string, got {other}")));
            }
        };
        let Some(operand) = map.get("operand") else {
            return Err(invalid("an operand to compare against is needed"));
        };
        self.operator = operator;
        self.operand = Some(Operand::Literal(operand.clone()));
        Ok(())
    }
}

impl fmt::Debug for Compare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compare")
            .field("operator", &self.operator)
            .finish_non_exhaustive()
    }
}
