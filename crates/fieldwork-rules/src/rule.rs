//! The rule chain node and its evaluation algorithm.

use serde_json::Value;
use tracing::debug;

use crate::element::ElementRef;
use crate::error::{Result, RuleError};
use crate::kind::RuleKind;

/// Chained rules in disjunctive normal form.
///
/// The outer sequence is a disjunction of conjunctive groups; the rule
/// owning the chain is an implicit first factor of every group. A fresh
/// chain holds exactly one empty group.
struct Chain {
    groups: Vec<Vec<Rule>>,
}

impl Chain {
    fn new() -> Self {
        Self {
            groups: vec![Vec::new()],
        }
    }

    /// Extends the current conjunctive group.
    fn push_and(&mut self, rule: Rule) {
        match self.groups.last_mut() {
            Some(group) => group.push(rule),
            None => self.groups.push(vec![rule]),
        }
    }

    /// Starts a new disjunctive group.
    fn push_or(&mut self, rule: Rule) {
        self.groups.push(vec![rule]);
    }

    fn groups(&self) -> &[Vec<Rule>] {
        &self.groups
    }
}

/// A validation rule bound to a form element.
///
/// A rule couples a value predicate (its [`RuleKind`]) with an owner
/// element and an error message. Further rules chained on with [`and`]
/// and [`or`] combine into a single boolean expression that
/// [`validate`] evaluates with short-circuiting in both directions.
///
/// [`and`]: Rule::and
/// [`or`]: Rule::or
/// [`validate`]: Rule::validate
pub struct Rule {
    owner: ElementRef,
    message: String,
    config: Option<Value>,
    kind: Box<dyn RuleKind>,
    registered_type: Option<String>,
    chain: Chain,
}

impl Rule {
    /// Creates a rule with no configuration value.
    ///
    /// # Errors
    ///
    /// [`RuleError::InvalidConfiguration`] when the kind demands
    /// configuration, or when a required kind is given an empty message.
    pub fn new(
        kind: impl RuleKind + 'static,
        owner: ElementRef,
        message: impl Into<String>,
    ) -> Result<Self> {
        Self::from_parts(Box::new(kind), owner, message, None, None)
    }

    /// Creates a rule from local and type-wide configuration.
    ///
    /// The two values are merged per the kind's merge policy (by default
    /// a present type-wide value wins entirely) and the merged value is
    /// validated and absorbed by the kind.
    ///
    /// # Errors
    ///
    /// [`RuleError::InvalidConfiguration`] when the kind rejects the
    /// merged configuration, or when a required kind is given an empty
    /// message.
    pub fn with_config(
        kind: impl RuleKind + 'static,
        owner: ElementRef,
        message: impl Into<String>,
        config: Option<Value>,
        type_config: Option<Value>,
    ) -> Result<Self> {
        Self::from_parts(Box::new(kind), owner, message, config, type_config)
    }

    pub(crate) fn from_parts(
        mut kind: Box<dyn RuleKind>,
        owner: ElementRef,
        message: impl Into<String>,
        config: Option<Value>,
        type_config: Option<Value>,
    ) -> Result<Self> {
        let message = message.into();
        if kind.is_required() && message.is_empty() {
            return Err(RuleError::InvalidConfiguration {
                kind: kind.name(),
                reason: "a required rule needs a non-empty error message".into(),
            });
        }
        let merged = kind.merge_config(config, type_config);
        kind.set_config(merged.as_ref())?;
        Ok(Self {
            owner,
            message,
            config: merged,
            kind,
            registered_type: None,
            chain: Chain::new(),
        })
    }

    /// Returns the rule's merged configuration value, if any.
    pub fn config(&self) -> Option<&Value> {
        self.config.as_ref()
    }

    /// Replaces the rule's configuration.
    ///
    /// The kind validates the new value first; on rejection the stored
    /// configuration is unchanged.
    ///
    /// # Errors
    ///
    /// [`RuleError::InvalidConfiguration`] when the kind rejects the
    /// value.
    pub fn set_config(&mut self, config: Option<Value>) -> Result<&mut Self> {
        self.kind.set_config(config.as_ref())?;
        self.config = config;
        Ok(self)
    }

    /// Returns the error message recorded on failure.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Sets the error message recorded on failure.
    ///
    /// An empty message means a failing chain records nothing on the
    /// owner.
    pub fn set_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.message = message.into();
        self
    }

    /// Rebinds the rule to a different element.
    ///
    /// Rebinding does not detach the rule from whatever the previous
    /// owner's subsystem knows about it.
    // TODO: detach from the previous owner when rebinding.
    pub fn set_owner(&mut self, owner: ElementRef) -> &mut Self {
        self.owner = owner;
        self
    }

    /// Returns the registry type name this rule was created under, if
    /// any.
    pub fn registered_type(&self) -> Option<&str> {
        self.registered_type.as_deref()
    }

    pub(crate) fn set_registered_type(&mut self, name: impl Into<String>) {
        self.registered_type = Some(name.into());
    }

    /// Whether this rule's kind carries "required" semantics.
    pub fn is_required(&self) -> bool {
        self.kind.is_required()
    }

    /// Chains `next` onto this rule with an "and" operator.
    ///
    /// `next` joins the current conjunctive group: during evaluation it
    /// only runs while every earlier rule of the group held. Returns the
    /// head of the chain for further chaining.
    ///
    /// # Errors
    ///
    /// [`RuleError::IllegalChainOperand`] if `next` is a required-kind
    /// rule; required rules anchor chains, they are never members.
    pub fn and(mut self, next: Rule) -> Result<Self> {
        if next.is_required() {
            return Err(RuleError::IllegalChainOperand { op: "and" });
        }
        self.chain.push_and(next);
        Ok(self)
    }

    /// Chains `next` onto this rule with an "or" operator.
    ///
    /// `next` starts a new disjunctive group, evaluated only while every
    /// earlier group failed. Returns the head of the chain.
    ///
    /// # Errors
    ///
    /// [`RuleError::IllegalChainOperand`] if `next` is a required-kind
    /// rule.
    pub fn or(mut self, next: Rule) -> Result<Self> {
        if next.is_required() {
            return Err(RuleError::IllegalChainOperand { op: "or" });
        }
        self.chain.push_or(next);
        Ok(self)
    }

    /// Evaluates the whole rule chain against the owner's current value.
    ///
    /// Rules of a conjunctive group run left to right and stop at the
    /// first failure; groups are tried in order and evaluation stops at
    /// the first group that holds. Rules cut off by either short circuit
    /// are not run at all, so their side effects never happen.
    ///
    /// When the chain fails overall and this rule carries a non-empty
    /// message, the message is recorded on the owner unless the owner
    /// already has an error: the first failure wins across the whole
    /// element, not just within this chain.
    pub fn validate(&self) -> bool {
        let mut global_valid = false;
        let mut local_valid = self.kind.check(&self.owner.value());
        for group in self.chain.groups() {
            for link in group {
                if !local_valid {
                    break;
                }
                local_valid = link.validate();
            }
            global_valid = global_valid || local_valid;
            if global_valid {
                break;
            }
            local_valid = true;
        }
        if !global_valid && !self.message.is_empty() && !has_error(&self.owner) {
            debug!("\"{}\" rule failed: {}", self.kind.name(), self.message);
            self.owner.set_error(&self.message);
        }
        global_valid
    }
}

fn has_error(owner: &ElementRef) -> bool {
    owner.error().is_some_and(|error| !error.is_empty())
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("kind", &self.kind.name())
            .field("message", &self.message)
            .field("config", &self.config)
            .field("registered_type", &self.registered_type)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::element::{Element, Field};
    use crate::rules::{Callback, Empty, Length, Required};

    /// Kind with a fixed outcome.
    struct Always(bool);

    impl RuleKind for Always {
        fn name(&self) -> &'static str {
            "always"
        }

        fn check(&self, _value: &Value) -> bool {
            self.0
        }
    }

    fn rule(outcome: bool, message: &str) -> Rule {
        Rule::new(Always(outcome), Field::new(Value::Null), message).unwrap()
    }

    /// Callback rule that counts how often it runs.
    fn counting_rule(hits: &Rc<Cell<u32>>, outcome: bool) -> Rule {
        let hits = Rc::clone(hits);
        let probe = Callback::new(move |_: &Value| {
            hits.set(hits.get() + 1);
            outcome
        });
        Rule::new(probe, Field::new(Value::Null), "").unwrap()
    }

    #[test]
    fn test_empty_chain_reduces_to_the_predicate() {
        assert!(rule(true, "").validate());
        assert!(!rule(false, "").validate());
    }

    #[test]
    fn test_and_conjunction() {
        for a in [false, true] {
            for b in [false, true] {
                let chain = rule(a, "").and(rule(b, "")).unwrap();
                assert_eq!(chain.validate(), a && b, "a={a} b={b}");
            }
        }
    }

    #[test]
    fn test_or_disjunction() {
        for a in [false, true] {
            for b in [false, true] {
                let chain = rule(a, "").or(rule(b, "")).unwrap();
                assert_eq!(chain.validate(), a || b, "a={a} b={b}");
            }
        }
    }

    #[test]
    fn test_disjunction_of_conjunctions() {
        // a.and(b).or(c) means (a AND b) OR (a AND c): the base rule is a
        // factor of every group.
        for a in [false, true] {
            for b in [false, true] {
                for c in [false, true] {
                    let chain = rule(a, "")
                        .and(rule(b, ""))
                        .unwrap()
                        .or(rule(c, ""))
                        .unwrap();
                    assert_eq!(
                        chain.validate(),
                        (a && b) || (a && c),
                        "a={a} b={b} c={c}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_and_short_circuits_when_base_fails() {
        let hits = Rc::new(Cell::new(0));
        let chain = rule(false, "").and(counting_rule(&hits, true)).unwrap();
        assert!(!chain.validate());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_and_runs_the_link_when_base_holds() {
        let hits = Rc::new(Cell::new(0));
        let chain = rule(true, "").and(counting_rule(&hits, true)).unwrap();
        assert!(chain.validate());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_or_short_circuits_when_base_holds() {
        let hits = Rc::new(Cell::new(0));
        let chain = rule(true, "").or(counting_rule(&hits, true)).unwrap();
        assert!(chain.validate());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_failing_group_member_cuts_off_the_rest_of_the_group() {
        let hits = Rc::new(Cell::new(0));
        let chain = rule(true, "")
            .and(counting_rule(&hits, false))
            .unwrap()
            .and(counting_rule(&hits, true))
            .unwrap();
        assert!(!chain.validate());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_message_written_on_failure() {
        let owner = Field::new("");
        let rule = Rule::new(Always(false), owner.clone(), "no good").unwrap();
        assert!(!rule.validate());
        assert_eq!(owner.error().as_deref(), Some("no good"));
    }

    #[test]
    fn test_no_message_written_on_success() {
        let owner = Field::new("");
        let rule = Rule::new(Always(true), owner.clone(), "no good").unwrap();
        assert!(rule.validate());
        assert!(owner.error().is_none());
    }

    #[test]
    fn test_no_message_written_when_message_is_empty() {
        let owner = Field::new("");
        let rule = Rule::new(Always(false), owner.clone(), "").unwrap();
        assert!(!rule.validate());
        assert!(owner.error().is_none());
    }

    #[test]
    fn test_first_error_wins() {
        let owner = Field::new("");
        owner.set_error("earlier failure");
        let rule = Rule::new(Always(false), owner.clone(), "later failure").unwrap();
        assert!(!rule.validate());
        assert_eq!(owner.error().as_deref(), Some("earlier failure"));
    }

    #[test]
    fn test_required_cannot_be_chained() {
        let owner = Field::new("");
        let required = Rule::new(Required::new(), owner.clone(), "fill this in").unwrap();
        let err = rule(true, "").and(required).unwrap_err();
        assert!(matches!(err, RuleError::IllegalChainOperand { op: "and" }));

        let required = Rule::new(Required::new(), owner, "fill this in").unwrap();
        let err = rule(true, "").or(required).unwrap_err();
        assert!(matches!(err, RuleError::IllegalChainOperand { op: "or" }));
    }

    #[test]
    fn test_required_can_anchor_a_chain() {
        let owner = Field::new("ab");
        let chain = Rule::new(Required::new(), owner.clone(), "fill this in")
            .unwrap()
            .and(Rule::new(Length::min(5), owner.clone(), "too short").unwrap())
            .unwrap();
        assert!(!chain.validate());
        // the link failed first, so its message is the one that sticks
        assert_eq!(owner.error().as_deref(), Some("too short"));
    }

    #[test]
    fn test_required_needs_a_message() {
        let err = Rule::new(Required::new(), Field::new(""), "").unwrap_err();
        assert!(matches!(err, RuleError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_min_length_scenario() {
        let owner = Field::new("ab");
        let rule = Rule::new(Length::min(5), owner.clone(), "too short").unwrap();
        assert!(!rule.validate());
        assert_eq!(owner.error().as_deref(), Some("too short"));
    }

    #[test]
    fn test_min_length_or_empty_scenario() {
        let owner = Field::new("");
        let rule = Rule::new(Length::min(5), owner.clone(), "too short")
            .unwrap()
            .or(Rule::new(Empty::new(), owner.clone(), "").unwrap())
            .unwrap();
        assert!(rule.validate());
        assert!(owner.error().is_none());
    }

    #[test]
    fn test_chained_rule_reports_on_its_own_owner() {
        // Cross-field chain: the link's failure message lands on the
        // link's owner, the head's on the head's owner.
        let head_owner = Field::new("");
        let link_owner = Field::new("");
        let chain = Rule::new(Always(true), head_owner.clone(), "head failed")
            .unwrap()
            .and(Rule::new(Always(false), link_owner.clone(), "link failed").unwrap())
            .unwrap();
        assert!(!chain.validate());
        assert_eq!(link_owner.error().as_deref(), Some("link failed"));
        assert_eq!(head_owner.error().as_deref(), Some("head failed"));
    }

    #[test]
    fn test_set_owner_rebinds() {
        let first = Field::new("");
        let second = Field::new("");
        let mut rule = Rule::new(Always(false), first.clone(), "nope").unwrap();
        rule.set_owner(second.clone());
        assert!(!rule.validate());
        assert!(first.error().is_none());
        assert_eq!(second.error().as_deref(), Some("nope"));
    }

    #[test]
    fn test_set_message_and_accessors() {
        let mut rule = rule(false, "old");
        assert_eq!(rule.message(), "old");
        rule.set_message("new");
        assert_eq!(rule.message(), "new");
        assert!(rule.config().is_none());
        assert!(rule.registered_type().is_none());
        assert!(!rule.is_required());
    }
}
