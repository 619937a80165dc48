//! Person record and draft types.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::types::{Gender, PersonId};

/// Fully materialized roster record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Store-assigned identifier.
    pub id: PersonId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Recorded gender.
    pub gender: Gender,
    /// Calendar date of birth.
    pub date_of_birth: Date,
    /// Local-format phone number.
    pub phone_number: String,
    /// Free-text birth place, empty when unknown.
    #[serde(default)]
    pub birth_place: String,
    /// Whether the person has graduated.
    #[serde(default)]
    pub is_graduated: bool,
}

/// Create payload; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDraft {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Recorded gender.
    pub gender: Gender,
    /// Calendar date of birth.
    pub date_of_birth: Date,
    /// Local-format phone number.
    pub phone_number: String,
    /// Free-text birth place, empty when unknown.
    #[serde(default)]
    pub birth_place: String,
    /// Whether the person has graduated.
    #[serde(default)]
    pub is_graduated: bool,
}

impl Person {
    /// Materializes `draft` under `id`.
    pub fn from_draft(id: PersonId, draft: PersonDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            gender: draft.gender,
            date_of_birth: draft.date_of_birth,
            phone_number: draft.phone_number,
            birth_place: draft.birth_place,
            is_graduated: draft.is_graduated,
        }
    }

    /// `first_name` and `last_name` joined by a single space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Birth year, the key used by the year-bucket filters.
    pub fn birth_year(&self) -> i32 {
        self.date_of_birth.year()
    }

    /// Date of birth rendered as `dd/MM/yyyy`.
    pub fn date_of_birth_string(&self) -> String {
        let d = self.date_of_birth;
        format!("{:02}/{:02}/{:04}", d.day(), u8::from(d.month()), d.year())
    }

    /// `Yes` when graduated, `No` otherwise.
    pub fn graduated_string(&self) -> &'static str {
        if self.is_graduated { "Yes" } else { "No" }
    }
}

/// Wire view of a [`Person`] including the derived display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonView {
    /// Underlying record, flattened.
    #[serde(flatten)]
    pub person: Person,
    /// Derived full name.
    pub full_name: String,
    /// `dd/MM/yyyy` date of birth.
    pub date_of_birth_string: String,
    /// `Yes` / `No`.
    pub graduated_string: &'static str,
}

impl From<Person> for PersonView {
    fn from(person: Person) -> Self {
        Self {
            full_name: person.full_name(),
            date_of_birth_string: person.date_of_birth_string(),
            graduated_string: person.graduated_string(),
            person,
        }
    }
}
