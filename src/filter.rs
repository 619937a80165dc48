//! Composable, serializable record filters.

use serde::{Deserialize, Serialize};

use crate::{
    person::Person,
    types::{Gender, YearCmp},
};

/// Pivot year used by the birth-year buckets.
pub const BIRTH_YEAR_PIVOT: i32 = 2000;

/// Selection criterion evaluated per record.
///
/// Serialized with an internal `kind` tag so clients can post filters as JSON:
/// `{"kind":"birth_year","cmp":"less","year":2000}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PersonFilter {
    /// Matches one gender.
    Gender {
        /// Gender to match.
        gender: Gender,
    },
    /// Compares the birth year against `year`.
    BirthYear {
        /// Comparison to apply.
        cmp: YearCmp,
        /// Pivot year.
        year: i32,
    },
    /// Matches on graduation status.
    Graduated {
        /// Required status.
        is_graduated: bool,
    },
    /// Every inner filter must match; empty matches everything.
    All {
        /// Conjuncts.
        filters: Vec<PersonFilter>,
    },
    /// At least one inner filter must match; empty matches nothing.
    Any {
        /// Disjuncts.
        filters: Vec<PersonFilter>,
    },
}

impl PersonFilter {
    /// Matches male records.
    pub fn male() -> Self {
        Self::Gender {
            gender: Gender::Male,
        }
    }

    /// Compares the birth year against `year` with `cmp`.
    pub fn birth_year(cmp: YearCmp, year: i32) -> Self {
        Self::BirthYear { cmp, year }
    }

    /// Birth year strictly before `year`.
    pub fn born_before(year: i32) -> Self {
        Self::birth_year(YearCmp::Less, year)
    }

    /// Birth year equal to `year`.
    pub fn born_in(year: i32) -> Self {
        Self::birth_year(YearCmp::Equal, year)
    }

    /// Birth year strictly after `year`.
    pub fn born_after(year: i32) -> Self {
        Self::birth_year(YearCmp::Greater, year)
    }

    /// Combines `self` and `other` with logical AND, flattening nested conjunctions.
    pub fn and(self, other: PersonFilter) -> Self {
        match self {
            Self::All { mut filters } => {
                filters.push(other);
                Self::All { filters }
            }
            first => Self::All {
                filters: vec![first, other],
            },
        }
    }

    /// Returns true when `person` is selected.
    pub fn matches(&self, person: &Person) -> bool {
        match self {
            Self::Gender { gender } => person.gender == *gender,
            Self::BirthYear { cmp, year } => cmp.test(person.birth_year(), *year),
            Self::Graduated { is_graduated } => person.is_graduated == *is_graduated,
            Self::All { filters } => filters.iter().all(|f| f.matches(person)),
            Self::Any { filters } => filters.iter().any(|f| f.matches(person)),
        }
    }
}
