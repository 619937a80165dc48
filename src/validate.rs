//! Input validation applied before create/update reach the store.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};

use crate::{person::PersonDraft, types::Gender};

/// Maximum characters in a first or last name.
pub const NAME_MAX_CHARS: usize = 50;
/// Maximum characters in a birth place.
pub const BIRTH_PLACE_MAX_CHARS: usize = 100;

/// Raw create/update body. Every field is optional so missing input is
/// reported per field instead of failing deserialization as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonForm {
    /// Required, at most [`NAME_MAX_CHARS`].
    pub first_name: Option<String>,
    /// Required, at most [`NAME_MAX_CHARS`].
    pub last_name: Option<String>,
    /// `Male`, `Female` or `Other`, case-insensitive.
    pub gender: Option<String>,
    /// `YYYY-MM-DD`.
    pub date_of_birth: Option<String>,
    /// Required, see [`is_local_phone_number`].
    pub phone_number: Option<String>,
    /// Optional, at most [`BIRTH_PLACE_MAX_CHARS`].
    pub birth_place: Option<String>,
    /// Defaults to false.
    pub is_graduated: Option<bool>,
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// camelCase field name as sent on the wire.
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

/// All field errors found in a form, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    /// Rejected fields.
    pub fields: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// True when nothing was rejected.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when `field` has at least one error.
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(&err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Returns true for a 10-digit number starting `03`, `05`, `07`, `08` or `09`.
pub fn is_local_phone_number(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[0] == b'0'
        && matches!(b[1], b'3' | b'5' | b'7' | b'8' | b'9')
        && b[2..].iter().all(u8::is_ascii_digit)
}

fn required_name(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    value: Option<&str>,
) -> String {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        errors.push(field, format!("{label} is required."));
    } else if value.chars().count() > NAME_MAX_CHARS {
        errors.push(
            field,
            format!("{label} cannot exceed {NAME_MAX_CHARS} characters."),
        );
    }
    value.to_string()
}

impl PersonForm {
    /// Checks every field and builds a draft, or returns all failures at once.
    pub fn validate(&self) -> Result<PersonDraft, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let first_name = required_name(
            &mut errors,
            "firstName",
            "First name",
            self.first_name.as_deref(),
        );
        let last_name = required_name(
            &mut errors,
            "lastName",
            "Last name",
            self.last_name.as_deref(),
        );

        let gender = match self.gender.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push("gender", "Gender is required.");
                None
            }
            Some(raw) => match raw.parse::<Gender>() {
                Ok(g) => Some(g),
                Err(_) => {
                    errors.push("gender", "Gender must be Male, Female or Other.");
                    None
                }
            },
        };

        let date_of_birth = match self.date_of_birth.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push("dateOfBirth", "Date of birth is required.");
                None
            }
            Some(raw) => match Date::parse(raw, format_description!("[year]-[month]-[day]")) {
                Ok(d) => Some(d),
                Err(_) => {
                    errors.push("dateOfBirth", "Date of birth must be YYYY-MM-DD.");
                    None
                }
            },
        };

        let phone_number = self
            .phone_number
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        if phone_number.is_empty() {
            errors.push("phoneNumber", "Phone number is required.");
        } else if !is_local_phone_number(&phone_number) {
            errors.push("phoneNumber", "Invalid Vietnamese phone number format.");
        }

        let birth_place = self
            .birth_place
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        if birth_place.chars().count() > BIRTH_PLACE_MAX_CHARS {
            errors.push(
                "birthPlace",
                format!("Birthplace cannot exceed {BIRTH_PLACE_MAX_CHARS} characters."),
            );
        }

        match (gender, date_of_birth) {
            (Some(gender), Some(date_of_birth)) if errors.is_empty() => Ok(PersonDraft {
                first_name,
                last_name,
                gender,
                date_of_birth,
                phone_number,
                birth_place,
                is_graduated: self.is_graduated.unwrap_or(false),
            }),
            _ => Err(errors),
        }
    }
}
