//! Named sort policies and their key chains.

use crate::error::SortError;
use crate::models::MergedContact;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A merged contact field that can be sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    FirstName,
    Surname,
    NormalizedNumber,
    Email,
}

impl SortField {
    /// Read the field from a contact.
    pub fn extract<'a>(&self, contact: &'a MergedContact) -> Option<&'a str> {
        match self {
            Self::FirstName => contact.first_name(),
            Self::Surname => contact.surname(),
            Self::NormalizedNumber => contact.normalized_number(),
            Self::Email => contact.email(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// One link of a comparator chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: Direction,
}

impl SortKey {
    pub const fn new(field: SortField, direction: Direction) -> Self {
        Self { field, direction }
    }
}

const NAME_FIRST: [SortField; 4] = [
    SortField::FirstName,
    SortField::Surname,
    SortField::NormalizedNumber,
    SortField::Email,
];

const SURNAME_FIRST: [SortField; 4] = [
    SortField::Surname,
    SortField::FirstName,
    SortField::NormalizedNumber,
    SortField::Email,
];

/// The supported orderings of the contact list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortPolicy {
    #[default]
    ByName,
    ByNameReversed,
    BySurname,
    BySurnameReversed,
}

impl SortPolicy {
    /// Every policy, in the order they are offered to the user.
    pub const ALL: [SortPolicy; 4] = [
        SortPolicy::ByName,
        SortPolicy::ByNameReversed,
        SortPolicy::BySurname,
        SortPolicy::BySurnameReversed,
    ];

    /// Wire name of the policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ByName => "BY_NAME",
            Self::ByNameReversed => "BY_NAME_REVERSED",
            Self::BySurname => "BY_SURNAME",
            Self::BySurnameReversed => "BY_SURNAME_REVERSED",
        }
    }

    /// Comparator chain for this policy, highest priority first.
    pub fn keys(&self) -> Vec<SortKey> {
        let (fields, direction) = match self {
            Self::ByName => (NAME_FIRST, Direction::Ascending),
            Self::ByNameReversed => (NAME_FIRST, Direction::Descending),
            Self::BySurname => (SURNAME_FIRST, Direction::Ascending),
            Self::BySurnameReversed => (SURNAME_FIRST, Direction::Descending),
        };
        fields
            .into_iter()
            .map(|field| SortKey::new(field, direction))
            .collect()
    }
}

impl FromStr for SortPolicy {
    type Err = SortError;

    /// Parse an exact policy name such as `BY_SURNAME`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|policy| policy.as_str() == s)
            .ok_or_else(|| SortError::UnsupportedPolicy(s.to_string()))
    }
}

impl fmt::Display for SortPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SortPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
