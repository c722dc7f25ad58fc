//! Example: Signup Form Validation
//!
//! Builds the rule set for a small signup form and validates two
//! submissions, printing the outcome recorded on each field.
//!
//! Run with: cargo run --example signup -p fieldwork-rules

use std::rc::Rc;

use fieldwork_rules::rules::{Compare, Empty, Length, Operator, Pattern};
use fieldwork_rules::{Element, Field, Registry, Result, Rule};

struct SignupForm {
    username: Rc<Field>,
    password: Rc<Field>,
    confirm: Rc<Field>,
    referral: Rc<Field>,
    rules: Vec<Rule>,
}

impl SignupForm {
    fn new() -> Result<Self> {
        let registry = Registry::new();

        let username = Field::new("");
        let password = Field::new("");
        let confirm = Field::new("");
        let referral = Field::new("");

        let rules = vec![
            registry.create("required", username.clone(), "username is required", None)?,
            Rule::new(
                Length::range(3, 20),
                username.clone(),
                "username must be 3-20 characters",
            )?
            .and(Rule::new(
                Pattern::new("^[a-z0-9_]*$")?,
                username.clone(),
                "lowercase letters, digits and underscores only",
            )?)?,
            Rule::new(
                Length::min(8),
                password.clone(),
                "password must be at least 8 characters",
            )?,
            Rule::new(
                Compare::to_element(Operator::Eq, confirm.clone()),
                password.clone(),
                "passwords do not match",
            )?,
            // referral code is optional, but has 6 characters when given
            Rule::new(
                Length::exact(6),
                referral.clone(),
                "referral codes have 6 characters",
            )?
            .or(Rule::new(Empty::new(), referral.clone(), "")?)?,
        ];

        Ok(Self {
            username,
            password,
            confirm,
            referral,
            rules,
        })
    }

    fn submit(&self, username: &str, password: &str, confirm: &str, referral: &str) -> bool {
        for field in [&self.username, &self.password, &self.confirm, &self.referral] {
            field.clear_error();
        }
        self.username.set_value(username);
        self.password.set_value(password);
        self.confirm.set_value(confirm);
        self.referral.set_value(referral);

        // Run every rule: a failing field must not hide later fields'
        // problems, so no short-circuiting across rules here.
        self.rules
            .iter()
            .fold(true, |valid, rule| rule.validate() && valid)
    }

    fn report(&self) {
        for (name, field) in [
            ("username", &self.username),
            ("password", &self.password),
            ("confirm", &self.confirm),
            ("referral", &self.referral),
        ] {
            match field.error() {
                Some(error) => println!("  {name}: {error}"),
                None => println!("  {name}: ok"),
            }
        }
    }
}

fn main() -> Result<()> {
    let form = SignupForm::new()?;

    println!("first submission:");
    let valid = form.submit("jo", "hunter2hunter2", "hunter2", "ABC");
    form.report();
    println!("  valid: {valid}\n");

    println!("second submission:");
    let valid = form.submit("marta_77", "correct horse", "correct horse", "FRIEND");
    form.report();
    println!("  valid: {valid}");

    Ok(())
}
