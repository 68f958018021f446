// SPDX-FileCopyrightText: 2026 Rolodex contributors
// SPDX-License-Identifier: MIT

use std::fmt;

use crate::model::Field;

/// One field-level validation check, applied just before commit.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    field: Field,
    check: fn(&str) -> Result<(), String>,
}

impl Rule {
    pub fn new(field: Field, check: fn(&str) -> Result<(), String>) -> Self {
        Self { field, check }
    }

    pub fn field(&self) -> Field {
        self.field
    }
}

/// The checks applied at save time.
///
/// New rules slot in via [`RuleSet::push`] without touching the
/// save/cancel control flow.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in rule set: the required surname field must not be blank.
    pub fn standard() -> Self {
        let mut rules = Self::empty();
        rules.push(Rule::new(Field::LastName, last_name_present));
        rules
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn check(&self, field: Field, value: &str) -> Result<(), ValidationError> {
        for rule in self.rules.iter().filter(|rule| rule.field == field) {
            if let Err(message) = (rule.check)(value) {
                return Err(ValidationError { field, message });
            }
        }
        Ok(())
    }
}

fn last_name_present(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err("Last Name value cannot be blank.".to_owned())
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: Field,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
