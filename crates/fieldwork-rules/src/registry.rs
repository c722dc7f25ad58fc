//! Name-based rule construction with type-wide configuration.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::element::ElementRef;
use crate::error::{Result, RuleError};
use crate::kind::RuleKind;
use crate::rule::Rule;
use crate::rules::{Compare, Empty, Length, Nonempty, Pattern, Required};

type KindBuilder = Box<dyn Fn() -> Box<dyn RuleKind>>;

struct Registration {
    builder: KindBuilder,
    type_config: Option<Value>,
}

/// Registry of rule types.
///
/// Maps a type name to a kind constructor plus optional type-wide
/// configuration merged into every rule created under that name. Rules
/// created here carry the name in
/// [`Rule::registered_type`](crate::Rule::registered_type).
pub struct Registry {
    entries: HashMap<String, Registration>,
}

impl Registry {
    /// Creates a registry with the stock kinds registered.
    pub fn new() -> Self {
        let mut registry = Self {
            entries: HashMap::new(),
        };
        registry.register("nonempty", || Box::new(Nonempty::new()), None);
        registry.register("empty", || Box::new(Empty::new()), None);
        registry.register("required", || Box::new(Required::new()), None);
        registry.register("length", || Box::new(Length::default()), None);
        registry.register("pattern", || Box::new(Pattern::default()), None);
        registry.register("compare", || Box::new(Compare::default()), None);
        registry
    }

    /// Registers a rule type, replacing any previous registration of the
    /// same name.
    ///
    /// `type_config` applies to every rule created under this name; the
    /// kind's merge policy decides how it combines with rule-local
    /// configuration (by default it wins entirely).
    pub fn register<F>(&mut self, name: impl Into<String>, builder: F, type_config: Option<Value>)
    where
        F: Fn() -> Box<dyn RuleKind> + 'static,
    {
        let name = name.into();
        debug!("registering rule type \"{}\"", name);
        self.entries.insert(
            name,
            Registration {
                builder: Box::new(builder),
                type_config,
            },
        );
    }

    /// Whether a rule type with this name is registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Creates a rule of the named type bound to `owner`.
    ///
    /// # Errors
    ///
    /// [`RuleError::UnknownRuleType`] when no such type is registered,
    /// [`RuleError::InvalidConfiguration`] when the kind rejects the
    /// merged configuration.
    pub fn create(
        &self,
        name: &str,
        owner: ElementRef,
        message: impl Into<String>,
        config: Option<Value>,
    ) -> Result<Rule> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| RuleError::UnknownRuleType(name.to_string()))?;
        let kind = (entry.builder)();
        let mut rule = Rule::from_parts(kind, owner, message, config, entry.type_config.clone())?;
        rule.set_registered_type(name);
        Ok(rule)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, Field};
    use serde_json::json;

    #[test]
    fn test_stock_kinds_are_registered() {
        let registry = Registry::new();
        for name in ["nonempty", "empty", "required", "length", "pattern", "compare"] {
            assert!(registry.is_registered(name), "{name} missing");
        }
        assert!(!registry.is_registered("telepathy"));
    }

    #[test]
    fn test_create_stamps_the_registered_type() {
        let registry = Registry::new();
        let rule = registry
            .create("length", Field::new("abc"), "", Some(json!(3)))
            .unwrap();
        assert_eq!(rule.registered_type(), Some("length"));
        assert!(rule.validate());
    }

    #[test]
    fn test_create_unknown_type() {
        let registry = Registry::new();
        let err = registry
            .create("telepathy", Field::new(""), "", None)
            .unwrap_err();
        assert!(matches!(err, RuleError::UnknownRuleType(name) if name == "telepathy"));
    }

    #[test]
    fn test_create_rejects_bad_config() {
        let registry = Registry::new();
        let err = registry
            .create("pattern", Field::new(""), "", Some(json!("(unclosed")))
            .unwrap_err();
        assert!(matches!(err, RuleError::InvalidConfiguration { .. }));

        // pattern demands configuration
        let err = registry.create("pattern", Field::new(""), "", None).unwrap_err();
        assert!(matches!(err, RuleError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_type_config_wins_over_local() {
        let mut registry = Registry::new();
        registry.register("code", || Box::new(Pattern::default()), Some(json!("^[A-Z]+$")));

        let owner = Field::new("abc");
        let rule = registry
            .create("code", owner.clone(), "bad code", Some(json!("^[a-z]+$")))
            .unwrap();
        // the type-wide pattern replaces the local one entirely
        assert_eq!(rule.config(), Some(&json!("^[A-Z]+$")));
        assert!(!rule.validate());
        assert_eq!(owner.error().as_deref(), Some("bad code"));
    }

    #[test]
    fn test_local_config_used_without_type_config() {
        let registry = Registry::new();
        let rule = registry
            .create("pattern", Field::new("abc"), "", Some(json!("^[a-z]+$")))
            .unwrap();
        assert!(rule.validate());
    }

    #[test]
    fn test_custom_kind_registration() {
        let mut registry = Registry::new();
        registry.register("ascii", || Box::new(Pattern::default()), Some(json!("^[ -~]*$")));

        let rule = registry.create("ascii", Field::new("plain"), "", None).unwrap();
        assert!(rule.validate());

        let rule = registry.create("ascii", Field::new("café"), "", None).unwrap();
        assert!(!rule.validate());
    }
}
