use serde::Deserialize;

use super::{institutional_email, min_chars, password, Report, ValidationErrors};
use crate::config::ValidationConfig;

/// POST /api/auth/signup body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/auth/login body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Signup input that passed every rule; password still in clear text
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

pub fn validate_signup(input: &SignupInput, rules: &ValidationConfig) -> Result<NewAccount, ValidationErrors> {
    let mut report = Report::default();

    let name = report
        .required("name", input.name.as_deref())
        .and_then(|n| report.check("name", min_chars(&n, 2, "Name")));
    let email = report
        .required("email", input.email.as_deref())
        .and_then(|e| report.check("email", institutional_email(&e, rules)));

    // Passwords are taken verbatim; whitespace counts toward the length
    let secret = match input.password.as_deref().filter(|p| !p.is_empty()) {
        Some(p) => report.check("password", password(p)).map(|_| p.to_string()),
        None => {
            report.missing("password");
            None
        }
    };

    report.finish()?;
    match (name, email, secret) {
        (Some(name), Some(email), Some(password)) => Ok(NewAccount { name, email, password }),
        _ => Err(ValidationErrors::single("input", super::MISSING_FIELDS_MESSAGE)),
    }
}

/// Login only checks shape and domain; the password is compared later against the stored hash
pub fn validate_login(input: &LoginInput, rules: &ValidationConfig) -> Result<Credentials, ValidationErrors> {
    let mut report = Report::default();

    let email = report
        .required("email", input.email.as_deref())
        .and_then(|e| report.check("email", institutional_email(&e, rules)));
    let secret = match input.password.as_deref().filter(|p| !p.is_empty()) {
        Some(p) => Some(p.to_string()),
        None => {
            report.missing("password");
            None
        }
    };

    report.finish()?;
    match (email, secret) {
        (Some(email), Some(password)) => Ok(Credentials { email, password }),
        _ => Err(ValidationErrors::single("input", super::MISSING_FIELDS_MESSAGE)),
    }
}
