//! Display projection of a merged contact.

use super::MergedContact;
use crate::domain::ContactType;
use serde::Serialize;
use std::collections::BTreeSet;

/// A merged contact mapped for presentation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactView {
    /// "First Surname", or the number/email when no name is known
    pub display_name: String,

    /// Secondary line: the number if present, else the email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    pub types: BTreeSet<ContactType>,

    /// How many source records were merged into this contact
    pub source_count: usize,
}

impl From<&MergedContact> for ContactView {
    fn from(contact: &MergedContact) -> Self {
        let name = [contact.first_name(), contact.surname()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        let details = contact
            .normalized_number()
            .or_else(|| contact.email())
            .map(str::to_string);

        let display_name = if name.is_empty() {
            details.clone().unwrap_or_default()
        } else {
            name
        };

        Self {
            display_name,
            details,
            photo: contact.photo().map(str::to_string),
            types: contact.types().clone(),
            source_count: contact.source_contacts().len(),
        }
    }
}
