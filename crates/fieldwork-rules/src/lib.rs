//! # fieldwork-rules
//!
//! Chainable validation rules for server-side forms.
//!
//! A [`Rule`] binds a value predicate (a [`RuleKind`]) and an error
//! message to a form element. Rules chain into boolean expressions with
//! [`Rule::and`] and [`Rule::or`]; [`Rule::validate`] evaluates the whole
//! chain against the element's current value with short-circuiting, and
//! records the message on the element when the expression is false.
//!
//! This crate provides:
//! - The rule-chaining evaluator and its two chaining operators
//! - Stock rule kinds (presence, length, pattern, compare, callback)
//! - A [`Registry`] for name-based rule construction with type-wide
//!   configuration
//! - The [`Element`] trait connecting rules to the surrounding form tree
//!
//! ## Quick Start
//!
//! ```rust
//! use fieldwork_rules::rules::Length;
//! use fieldwork_rules::{Element, Field, Rule};
//!
//! let username = Field::new("ab");
//! let rule = Rule::new(Length::min(5), username.clone(), "too short")?;
//!
//! assert!(!rule.validate());
//! assert_eq!(username.error().as_deref(), Some("too short"));
//! # Ok::<(), fieldwork_rules::RuleError>(())
//! ```
//!
//! ## Chaining
//!
//! `and` extends the current conjunctive group, `or` starts a new one;
//! the base rule is a factor of every group. An optional field that must
//! be well-formed *when filled in* reads like this:
//!
//! ```rust
//! use fieldwork_rules::rules::{Empty, Length};
//! use fieldwork_rules::{Element, Field, Rule};
//!
//! let bio = Field::new("");
//! let rule = Rule::new(Length::min(10), bio.clone(), "bio is too short")?
//!     .or(Rule::new(Empty::new(), bio.clone(), "")?)?;
//!
//! // Empty is fine, a short value would not be.
//! assert!(rule.validate());
//! assert!(bio.error().is_none());
//! # Ok::<(), fieldwork_rules::RuleError>(())
//! ```
//!
//! Evaluation short-circuits in both directions: rules of a group stop
//! running at the first failure and groups stop at the first success. A
//! rule that is cut off never runs at all.
//!
//! ## The registry
//!
//! Rule types can be registered by name, optionally with configuration
//! that applies to every rule of that type:
//!
//! ```rust
//! use fieldwork_rules::{Element, Field, Registry};
//! use serde_json::json;
//!
//! let registry = Registry::new();
//! let code = Field::new("A-17");
//! let rule = registry.create(
//!     "pattern",
//!     code.clone(),
//!     "not a valid code",
//!     Some(json!("^[A-Z]-\\d+$")),
//! )?;
//! assert!(rule.validate());
//! # Ok::<(), fieldwork_rules::RuleError>(())
//! ```
//!
//! ## Custom kinds
//!
//! Implement [`RuleKind`] for anything with a value predicate, or wrap a
//! closure with [`rules::Callback`] for one-off checks.

mod element;
mod error;
mod kind;
mod registry;
mod rule;
pub mod rules;

pub use element::{Element, ElementRef, Field};
pub use error::{Result, RuleError};
pub use kind::RuleKind;
pub use registry::Registry;
pub use rule::Rule;
