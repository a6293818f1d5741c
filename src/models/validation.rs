//! Field validation shared by the record inputs.

use std::str::FromStr;

use crate::errors::{AppError, FieldErrors};

/// Collects every field problem of one input before failing.
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    /// A required text field; blank counts as missing.
    pub fn required(&mut self, field: &str, value: Option<String>) -> Option<String> {
        let value = non_blank(value);
        if value.is_none() {
            self.errors.missing.push(field.to_string());
        }
        value
    }

    /// A required closed-enum field.
    pub fn required_enum<T: FromStr>(&mut self, field: &str, value: Option<String>) -> Option<T> {
        let raw = self.required(field, value)?;
        match raw.parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                self.invalid(field);
                None
            }
        }
    }

    /// An optional closed-enum field that falls back to the enum default.
    pub fn defaulted_enum<T: FromStr + Default>(&mut self, field: &str, value: Option<String>) -> T {
        match non_blank(value) {
            None => T::default(),
            Some(raw) => match raw.parse() {
                Ok(parsed) => parsed,
                Err(_) => {
                    self.invalid(field);
                    T::default()
                }
            },
        }
    }

    pub fn invalid(&mut self, field: &str) {
        self.errors.invalid.push(field.to_string());
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_error(self) -> AppError {
        AppError::Validation(self.errors)
    }
}

/// Trimmed text, or `None` when absent or blank.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
