//! Client-side field validation for the login form.
//!
//! The email rule only checks shape (`something@something`, no whitespace);
//! domain and TLD checks are left to whatever authenticates the pair.

use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;

use crate::{
    domain::{Credentials, Field},
    error::{FieldError, MIN_PASSWORD_LEN},
};

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\S+@\S+$").expect("email shape pattern compiles"));

/// Per-field validation failures. A field without an entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: BTreeMap<Field, FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.entries.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn insert(&mut self, error: FieldError) {
        self.entries.insert(error.field(), error);
    }

    /// Drops the entry for `field`, returning whether one existed.
    pub fn clear(&mut self, field: Field) -> bool {
        self.entries.remove(&field).is_some()
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.entries.iter().map(|(field, error)| (*field, *error))
    }
}

impl FromIterator<FieldError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        let mut errors = Self::default();
        for error in iter {
            errors.insert(error);
        }
        errors
    }
}

pub fn validate_email(email: &str) -> Option<FieldError> {
    if email.is_empty() {
        Some(FieldError::EmailRequired)
    } else if !EMAIL_SHAPE.is_match(email) {
        Some(FieldError::InvalidEmailFormat)
    } else {
        None
    }
}

/// Length is counted in Unicode scalar values, not UTF-16 code units, so
/// `"😀😀😀"` is three characters and too short.
pub fn validate_password(password: &str) -> Option<FieldError> {
    if password.is_empty() {
        Some(FieldError::PasswordRequired)
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Some(FieldError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        })
    } else {
        None
    }
}

/// Checks both fields. The result is empty iff the pair may be submitted.
pub fn validate(credentials: &Credentials) -> ValidationErrors {
    validate_email(&credentials.email)
        .into_iter()
        .chain(validate_password(&credentials.password))
        .collect()
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
