//! Customer record validation and Unicode name normalization.
//!
//! [`CustomerPayload`] is the loose shape of an incoming request body:
//! every field is an optional raw JSON value, so a number where a string
//! belongs is a validation failure rather than a deserialization error.
//! [`validate`] turns a payload into a list of human-readable problems;
//! an empty list means the payload converts cleanly into a [`Customer`].

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use unicode_normalization::{is_nfc, UnicodeNormalization};

/// Basic local@domain.tld shape: no internal whitespace, domain
/// contains a dot. Deliberately loose; deliverability is not checked.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Parsed request body before validation. Fields keep their raw JSON
/// representation so type mismatches surface as validation messages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerPayload {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub age: Option<Value>,
}

/// A customer record that passed validation. The age keeps its JSON
/// number representation so `30` echoes back as `30`, not `30.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<serde_json::Number>,
}

/// Validate a customer payload, returning every applicable problem.
/// An empty list signals validity.
#[must_use]
pub fn validate(payload: &CustomerPayload) -> Vec<String> {
    let mut errors = Vec::new();

    let name_ok = payload
        .name
        .as_ref()
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty());
    if !name_ok {
        errors.push("Name is required and must be a non-empty string".to_string());
    }

    match payload.email.as_ref().and_then(Value::as_str) {
        Some(email) if !email.is_empty() => {
            if !EMAIL_PATTERN.is_match(email) {
                errors.push("Email must be a valid email address".to_string());
            }
        }
        _ => errors.push("Email is required and must be a string".to_string()),
    }

    if let Some(age) = payload.age.as_ref() {
        let in_range = age.as_f64().is_some_and(|n| (0.0..=150.0).contains(&n));
        if !in_range {
            errors.push("Age must be a valid number between 0 and 150".to_string());
        }
    }

    errors
}

impl CustomerPayload {
    /// Validate and convert into a typed [`Customer`].
    pub fn into_validated(self) -> Result<Customer, Vec<String>> {
        let errors = validate(&self);
        if !errors.is_empty() {
            return Err(errors);
        }

        // validate() guarantees name/email are non-empty strings here
        let name = self
            .name
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let email = self
            .email
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let age = match self.age {
            Some(Value::Number(n)) => Some(n),
            _ => None,
        };

        Ok(Customer { name, email, age })
    }
}

impl Customer {
    /// Rewrite the name to Unicode NFC (canonical composition). Idempotent;
    /// never touches email or age.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if !is_nfc(&self.name) {
            self.name = self.name.nfc().collect();
        }
        self
    }
}
