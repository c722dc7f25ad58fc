//! Owner-element interface consumed by rules.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

/// A form element whose value rules validate.
///
/// The form-element tree lives outside this crate; rules only need the
/// element's current value and its single error slot. `set_error` takes
/// `&self`, so implementations keep the slot behind interior mutability.
pub trait Element {
    /// Returns the element's current value, `Null` when unset.
    fn value(&self) -> Value;

    /// Returns the validation error recorded on the element, if any.
    ///
    /// A non-empty string means an error is already recorded.
    fn error(&self) -> Option<String>;

    /// Records a validation error, replacing any previous one.
    fn set_error(&self, message: &str);
}

/// Shared handle to a form element.
///
/// Rules hold a shared handle rather than owning the element; the form
/// tree governs element lifetime.
pub type ElementRef = Rc<dyn Element>;

/// A minimal in-memory element.
///
/// Holds a value and an error slot with no surrounding form tree. Enough
/// to validate standalone values and to drive tests.
#[derive(Debug, Default)]
pub struct Field {
    value: RefCell<Value>,
    error: RefCell<Option<String>>,
}

impl Field {
    /// Creates a field holding the given value.
    pub fn new(value: impl Into<Value>) -> Rc<Self> {
        Rc::new(Self {
            value: RefCell::new(value.into()),
            error: RefCell::new(None),
        })
    }

    /// Replaces the field's value.
    pub fn set_value(&self, value: impl Into<Value>) {
        *self.value.borrow_mut() = value.into();
    }

    /// Clears the recorded error.
    pub fn clear_error(&self) {
        self.error.borrow_mut().take();
    }
}

impl Element for Field {
    fn value(&self) -> Value {
        self.value.borrow().clone()
    }

    fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    fn set_error(&self, message: &str) {
        *self.error.borrow_mut() = Some(message.to_string());
    }
}
