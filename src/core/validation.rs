//! # Form Validation
//!
//! Client-side checks run before any request leaves the machine.
//! Each field has an ordered list of rules; the first one that fails is the
//! one reported. The messages are shown to the user verbatim.
//!
//! - `validate_user_form`: full create form, both fields required
//! - `validate_user_update`: partial edit, only present fields are checked

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::api::{CreateUserRequest, UpdateUserRequest};

pub const NAME_REQUIRED: &str = "Name is required";
pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters";
pub const NAME_TOO_LONG: &str = "Name must be less than 100 characters";
pub const NAME_INVALID_CHARS: &str = "Name can only contain letters and spaces";
pub const ZIP_REQUIRED: &str = "ZIP code is required";
pub const ZIP_INVALID_FORMAT: &str = "ZIP code must be in format 12345 or 12345-6789";

const NAME_MIN_LEN: usize = 2;
const NAME_MAX_LEN: usize = 100;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z ]+$").expect("name pattern is a valid regex"));

// [0-9] rather than \d: the regex crate's \d also matches non-ASCII digits.
static ZIP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("zip pattern is a valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    ZipCode,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::ZipCode => write!(f, "zipCode"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Every field that failed, each with its first violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", summarize(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// The message reported for `field`, if it failed.
    pub fn message_for(&self, field: Field) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Length limits count UTF-16 code units, as the backend does, so an
/// astral-plane character such as an emoji counts as two.
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let len = name.encode_utf16().count();
    if len == 0 {
        Err(NAME_REQUIRED)
    } else if len < NAME_MIN_LEN {
        Err(NAME_TOO_SHORT)
    } else if len > NAME_MAX_LEN {
        Err(NAME_TOO_LONG)
    } else if !NAME_PATTERN.is_match(name) {
        Err(NAME_INVALID_CHARS)
    } else {
        Ok(())
    }
}

pub fn validate_zip_code(zip_code: &str) -> Result<(), &'static str> {
    if zip_code.is_empty() {
        Err(ZIP_REQUIRED)
    } else if !ZIP_PATTERN.is_match(zip_code) {
        Err(ZIP_INVALID_FORMAT)
    } else {
        Ok(())
    }
}

/// Validates a create form. Returns the input unchanged when it passes.
pub fn validate_user_form(form: CreateUserRequest) -> Result<CreateUserRequest, ValidationErrors> {
    let mut errors = Vec::new();
    collect(&mut errors, Field::Name, validate_name(&form.name));
    collect(&mut errors, Field::ZipCode, validate_zip_code(&form.zip_code));
    finish(form, errors)
}

/// Validates a partial update. Absent fields are not checked.
pub fn validate_user_update(
    update: UpdateUserRequest,
) -> Result<UpdateUserRequest, ValidationErrors> {
    let mut errors = Vec::new();
    if let Some(name) = &update.name {
        collect(&mut errors, Field::Name, validate_name(name));
    }
    if let Some(zip_code) = &update.zip_code {
        collect(&mut errors, Field::ZipCode, validate_zip_code(zip_code));
    }
    finish(update, errors)
}

fn collect(errors: &mut Vec<FieldError>, field: Field, result: Result<(), &'static str>) {
    if let Err(message) = result {
        errors.push(FieldError { field, message });
    }
}

fn finish<T>(value: T, errors: Vec<FieldError>) -> Result<T, ValidationErrors> {
    if errors.is_empty() {
        Ok(value)
    } else {
        Err(ValidationErrors { errors })
    }
}
