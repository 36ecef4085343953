//! Sample sources and records for tests.

use contacts_pipeline::domain::{ContactType, SourceName};
use contacts_pipeline::models::{ContactRecord, ContactSource, MergedContact};

pub fn source(name: &str) -> ContactSource {
    ContactSource::new(SourceName::new(name).unwrap())
}

pub fn record(source_name: &str, contact_type: ContactType) -> ContactRecord {
    ContactRecord::new(SourceName::new(source_name).unwrap(), contact_type)
}

/// A merged contact with the given names and types, built from one record per type.
pub fn contact(first: &str, surname: &str, types: &[ContactType]) -> MergedContact {
    let records = types
        .iter()
        .map(|&contact_type| {
            record("device", contact_type)
                .with_first_name(first)
                .with_surname(surname)
        })
        .collect();
    MergedContact::from_records(records).unwrap()
}

/// Display names of `contacts`, first name and surname joined.
pub fn names<C: AsRef<MergedContact>>(contacts: &[C]) -> Vec<String> {
    contacts
        .iter()
        .map(|c| {
            let c = c.as_ref();
            format!("{} {}", c.first_name().unwrap_or(""), c.surname().unwrap_or(""))
                .trim()
                .to_string()
        })
        .collect()
}
