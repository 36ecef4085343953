//! Raw contact record as delivered by a single source.

use crate::domain::{ContactType, SourceName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One source's view of a single person.
///
/// Every field except the source and type may be absent; an empty string is
/// treated the same as an absent value everywhere in the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    /// Name of the source this record was read from
    pub source_name: SourceName,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,

    /// Phone number as normalized by the source (e.g. "+79991234567")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Reachability classification of this record
    #[serde(rename = "type")]
    pub contact_type: ContactType,

    /// Photo URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    /// Source specific fields carried through untouched
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub raw_fields: BTreeMap<String, String>,
}

impl ContactRecord {
    /// Create a record with only the source and type set.
    pub fn new(source_name: SourceName, contact_type: ContactType) -> Self {
        Self {
            source_name,
            first_name: None,
            surname: None,
            normalized_number: None,
            email: None,
            contact_type,
            photo: None,
            raw_fields: BTreeMap::new(),
        }
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn with_surname(mut self, surname: impl Into<String>) -> Self {
        self.surname = Some(surname.into());
        self
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.normalized_number = Some(number.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_missing_fields() {
        let json = r#"{"sourceName":"sim","firstName":"Ann","type":"PHONE"}"#;
        let record: ContactRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.source_name.as_str(), "sim");
        assert_eq!(record.first_name.as_deref(), Some("Ann"));
        assert!(record.surname.is_none());
        assert_eq!(record.contact_type, ContactType::Phone);
        assert!(record.raw_fields.is_empty());
    }

    #[test]
    fn test_deserialize_rejects_unknown_type() {
        let json = r#"{"sourceName":"sim","type":"PAGER"}"#;
        let result: Result<ContactRecord, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_builder() {
        let record = ContactRecord::new(SourceName::new("device").unwrap(), ContactType::Email)
            .with_first_name("Bob")
            .with_email("bob@example.com");
        assert_eq!(record.email.as_deref(), Some("bob@example.com"));
        assert!(record.normalized_number.is_none());
    }
}
