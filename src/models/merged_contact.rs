//! Merged contact model: the canonical identity of one person.

use super::{non_empty, ContactRecord};
use crate::domain::ContactType;
use serde::Serialize;
use std::collections::BTreeSet;

/// A deduplicated contact combining one or more source records.
///
/// Scalar fields are resolved from the constituents in their stored order:
/// the first non-empty value wins. `types` is the union of constituent types.
/// A merged contact always owns at least one record.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MergedContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    surname: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    normalized_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    photo: Option<String>,

    types: BTreeSet<ContactType>,

    source_contacts: Vec<ContactRecord>,
}

impl MergedContact {
    /// Build a merged contact from records already in priority order.
    ///
    /// Returns `None` when `records` is empty.
    pub fn from_records(records: Vec<ContactRecord>) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let resolve = |field: fn(&ContactRecord) -> &Option<String>| -> Option<String> {
            records
                .iter()
                .find_map(|record| non_empty(field(record)))
                .map(str::to_string)
        };

        Some(Self {
            first_name: resolve(|r| &r.first_name),
            surname: resolve(|r| &r.surname),
            normalized_number: resolve(|r| &r.normalized_number),
            email: resolve(|r| &r.email),
            photo: resolve(|r| &r.photo),
            types: records.iter().map(|r| r.contact_type).collect(),
            source_contacts: records,
        })
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn surname(&self) -> Option<&str> {
        self.surname.as_deref()
    }

    pub fn normalized_number(&self) -> Option<&str> {
        self.normalized_number.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    pub fn types(&self) -> &BTreeSet<ContactType> {
        &self.types
    }

    /// Constituent records, in source priority order.
    pub fn source_contacts(&self) -> &[ContactRecord] {
        &self.source_contacts
    }

    /// Consume the contact, returning its constituent records.
    pub fn into_source_contacts(self) -> Vec<ContactRecord> {
        self.source_contacts
    }
}

impl AsRef<MergedContact> for MergedContact {
    fn as_ref(&self) -> &MergedContact {
        self
    }
}
