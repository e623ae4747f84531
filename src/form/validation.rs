use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

#[cfg(any(test, feature = "testing"))]
use mockall::automock;

use crate::backend::RegistrationInput;

pub const TOO_SHORT: &str = "Too short";
pub const INVALID_EMAIL: &str = "Invalid email address";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters.";

const MIN_NAME_CHARS: usize = 2;
const MIN_USERNAME_CHARS: usize = 2;
const MIN_PASSWORD_CHARS: usize = 8;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Name,
    Username,
    Email,
    Password,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Username, Field::Email, Field::Password];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Username => "username",
            Field::Email => "email",
            Field::Password => "password",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Username => "Username",
            Field::Email => "Email",
            Field::Password => "Password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw, unvalidated form values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpValues {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignUpValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Username => &self.username,
            Field::Email => &self.email,
            Field::Password => &self.password,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Username => self.username = value,
            Field::Email => self.email = value,
            Field::Password => self.password = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// Per-field validation failures, at most one per field
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error unless the field already has one
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.errors.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

/// Turns raw form values into a `RegistrationInput`
#[cfg_attr(any(test, feature = "testing"), automock)]
pub trait Validator: Send + Sync {
    fn validate(&self, raw: &SignUpValues) -> Result<RegistrationInput, ValidationErrors>;
}

/// Sign-up rules: name and username at least 2 characters, a well-formed
/// email, password at least 8 characters.
///
/// Text fields are trimmed before checking; the password is taken verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct SignUpSchema;

impl Validator for SignUpSchema {
    fn validate(&self, raw: &SignUpValues) -> Result<RegistrationInput, ValidationErrors> {
        let name = raw.name.trim();
        let username = raw.username.trim();
        let email = raw.email.trim();

        let mut errors = ValidationErrors::new();

        if name.chars().count() < MIN_NAME_CHARS {
            errors.add(Field::Name, TOO_SHORT);
        }
        if username.chars().count() < MIN_USERNAME_CHARS {
            errors.add(Field::Username, TOO_SHORT);
        }
        if !EMAIL_PATTERN.is_match(email) {
            errors.add(Field::Email, INVALID_EMAIL);
        }
        if raw.password.chars().count() < MIN_PASSWORD_CHARS {
            errors.add(Field::Password, PASSWORD_TOO_SHORT);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(RegistrationInput::new(name, username, email, raw.password.as_str()))
    }
}
