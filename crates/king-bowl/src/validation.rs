//! Form validation shared by the reservation desk and checkout.
//!
//! Errors are collected per field rather than failing on the first one, so a form
//! can show every message at once.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern compiles")
});

/// Indian mobile number: ten digits, the first 6-9.
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9]\d{9}$").expect("phone pattern compiles"));

static PIN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}$").expect("pin pattern compiles"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

/// Drops spaces and hyphens and an optional `+91` country code.
pub fn normalize_phone(phone: &str) -> String {
    let digits: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    match digits.strip_prefix("+91") {
        Some(rest) => rest.to_string(),
        None => digits,
    }
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE.is_match(&normalize_phone(phone))
}

pub fn is_valid_pin(pin: &str) -> bool {
    PIN.is_match(pin)
}

/// Messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field`. The first message for a field wins.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn require(&mut self, field: &'static str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.add(field, message);
        }
    }

    pub fn email(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "Email is required");
        } else if !is_valid_email(value) {
            self.add(field, "Please enter a valid email address");
        }
    }

    pub fn phone(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "Phone number is required");
        } else if !is_valid_phone(value) {
            self.add(field, "Please enter a valid 10-digit mobile number");
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}
