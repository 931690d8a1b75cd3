//! Field-level rules for every submitted entity.
//!
//! Validators are pure: they take the raw request input and either return a
//! normalized value set or a [`ValidationErrors`] listing `{field, message}`
//! pairs. The same rules run on create and on update, so a merged record is
//! held to exactly the constraints a fresh submission is.

pub mod lost_item;
pub mod product;
pub mod user;

use serde::Serialize;
use thiserror::Error;

use crate::config::ValidationConfig;

pub use lost_item::{LostItemChanges, LostItemDraft, LostItemInput};
pub use product::{ProductChanges, ProductDraft, ProductInput};
pub use user::{Credentials, LoginInput, NewAccount, SignupInput};

pub const MISSING_FIELDS_MESSAGE: &str = "Please provide all required fields";
pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Aggregate validation failure with a summary message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct ValidationErrors {
    pub message: String,
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            errors: vec![FieldError::new(field, message.clone())],
            message,
        }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// Collects failures across fields before deciding the outcome
#[derive(Debug, Default)]
pub(crate) struct Report {
    missing: bool,
    errors: Vec<FieldError>,
}

impl Report {
    pub(crate) fn missing(&mut self, field: &str) {
        self.missing = true;
        self.errors.push(FieldError::new(field, REQUIRED_MESSAGE));
    }

    pub(crate) fn invalid(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Required text: trims, records a missing field when absent or blank
    pub(crate) fn required(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        match present(value) {
            Some(v) => Some(v.to_string()),
            None => {
                self.missing(field);
                None
            }
        }
    }

    /// Run a rule over an optional value, recording its failure
    pub(crate) fn check<T>(&mut self, field: &str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(message) => {
                self.invalid(field, message);
                None
            }
        }
    }

    pub(crate) fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let message = if self.missing {
            MISSING_FIELDS_MESSAGE.to_string()
        } else {
            self.errors[0].message.clone()
        };
        Err(ValidationErrors {
            message,
            errors: self.errors,
        })
    }
}

/// Trimmed, non-empty view of an optional string
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Lowercases and checks the institutional suffix
pub fn institutional_email(raw: &str, rules: &ValidationConfig) -> Result<String, String> {
    let email = raw.trim().to_lowercase();
    let suffix = rules.email_suffix();
    let local = email.strip_suffix(suffix.as_str()).unwrap_or("");
    if local.is_empty() || local.contains('@') || local.contains(char::is_whitespace) {
        return Err(rules.email_message());
    }
    Ok(email)
}

pub fn password(raw: &str) -> Result<(), String> {
    if raw.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }
    Ok(())
}

pub(crate) fn min_chars(value: &str, min: usize, label: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.chars().count() < min {
        return Err(format!("{} must be at least {} characters", label, min));
    }
    Ok(trimmed.to_string())
}

/// Embedded images are data URLs or bare base64; size is checked on the decoded payload
pub fn image(raw: &str, rules: &ValidationConfig) -> Result<String, String> {
    let trimmed = raw.trim();
    let payload = match trimmed.split_once(',') {
        Some((header, data)) if header.starts_with("data:") => data,
        _ => trimmed,
    };
    if payload.is_empty() {
        return Err("Please provide an image".to_string());
    }
    let padding = payload.bytes().rev().take_while(|b| *b == b'=').count();
    let decoded = (payload.len() * 3 / 4).saturating_sub(padding);
    if decoded > rules.max_image_bytes {
        return Err(format!(
            "Image must be {}MB or smaller",
            rules.max_image_bytes / (1024 * 1024)
        ));
    }
    Ok(trimmed.to_string())
}
