//! Shared primitive IDs and roster enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Store-assigned person identifier.
pub type PersonId = u32;

/// Gender recorded for a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Any other or unspecified gender.
    Other,
}

impl Gender {
    /// Display label, also used as the spreadsheet cell text.
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(format!("unknown gender: {other}")),
        }
    }
}

/// Comparison applied to a birth year by [`crate::filter::PersonFilter::BirthYear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearCmp {
    /// Strictly before the year.
    Less,
    /// Exactly the year.
    Equal,
    /// Strictly after the year.
    Greater,
}

impl YearCmp {
    /// Parses the redirect `action` keyword (`lessthan`, `equal`, `greaterthan`).
    ///
    /// Matching is case-insensitive.
    pub fn from_action(action: &str) -> Option<Self> {
        match action.to_ascii_lowercase().as_str() {
            "lessthan" => Some(YearCmp::Less),
            "equal" => Some(YearCmp::Equal),
            "greaterthan" => Some(YearCmp::Greater),
            _ => None,
        }
    }

    /// Returns true when `year` satisfies the comparison against `pivot`.
    pub fn test(self, year: i32, pivot: i32) -> bool {
        match self {
            YearCmp::Less => year < pivot,
            YearCmp::Equal => year == pivot,
            YearCmp::Greater => year > pivot,
        }
    }
}
