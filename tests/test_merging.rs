mod mocks;

use contacts_pipeline::domain::ContactType;
use contacts_pipeline::error::MergeError;
use contacts_pipeline::merging::{ContactMerger, MergeKey, MergePolicy};
use contacts_pipeline::models::{ContactRecord, MergedContact};
use mocks::{record, source};

fn grouping(merged: &[MergedContact]) -> Vec<Vec<String>> {
    let mut groups: Vec<Vec<String>> = merged
        .iter()
        .map(|contact| {
            let mut ids: Vec<String> = contact
                .source_contacts()
                .iter()
                .map(|r| r.raw_fields.get("id").cloned().unwrap_or_default())
                .collect();
            ids.sort();
            ids
        })
        .collect();
    groups.sort();
    groups
}

fn with_id(record: ContactRecord, id: &str) -> ContactRecord {
    let mut record = record;
    record.raw_fields.insert("id".to_string(), id.to_string());
    record
}

#[test]
fn test_same_person_from_two_sources_merges() {
    let sources = vec![source("device"), source("sim")];
    let records = vec![
        record("device", ContactType::Phone)
            .with_first_name("Ann")
            .with_number("123"),
        record("sim", ContactType::Phone)
            .with_first_name("Ann")
            .with_number("123"),
    ];

    let merged = ContactMerger::default().merge(&sources, records).unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].source_contacts().len(), 2);
    assert_eq!(merged[0].first_name(), Some("Ann"));
}

#[test]
fn test_source_priority_resolves_fields() {
    // "sim" outranks "device" because it comes first in the source list.
    let sources = vec![source("sim"), source("device")];
    let records = vec![
        record("device", ContactType::Telegram)
            .with_first_name("Annie")
            .with_email("ann@example.com")
            .with_photo("content://photo/1"),
        record("sim", ContactType::Phone)
            .with_first_name("Ann")
            .with_surname("")
            .with_email("ANN@example.com "),
    ];

    let merged = ContactMerger::default().merge(&sources, records).unwrap();
    assert_eq!(merged.len(), 1);

    let contact = &merged[0];
    assert_eq!(contact.first_name(), Some("Ann"));
    assert_eq!(contact.surname(), None);
    assert_eq!(contact.photo(), Some("content://photo/1"));
    assert_eq!(contact.source_contacts()[0].source_name.as_str(), "sim");
    assert!(contact.types().contains(&ContactType::Phone));
    assert!(contact.types().contains(&ContactType::Telegram));
}

#[test]
fn test_merging_is_transitive() {
    // a~b by number, b~c by email: all three end up together.
    let sources = vec![source("device")];
    let records = vec![
        with_id(record("device", ContactType::Phone).with_number("+1 555 0100"), "a"),
        with_id(record("device", ContactType::Phone).with_number("15550100").with_email("x@y.z"), "b"),
        with_id(record("device", ContactType::Email).with_email("X@Y.Z"), "c"),
        with_id(record("device", ContactType::Email).with_email("other@y.z"), "d"),
    ];

    let merged = ContactMerger::default().merge(&sources, records).unwrap();
    assert_eq!(
        grouping(&merged),
        vec![vec!["a".to_string(), "b".to_string(), "c".to_string()], vec!["d".to_string()]]
    );
}

#[test]
fn test_grouping_independent_of_input_order() {
    let sources = vec![source("device"), source("sim")];
    let records = vec![
        with_id(record("device", ContactType::Phone).with_number("1"), "a"),
        with_id(record("sim", ContactType::Email).with_email("e@x"), "b"),
        with_id(record("device", ContactType::Phone).with_number("2").with_email("e@x"), "c"),
        with_id(record("sim", ContactType::Phone).with_number("1").with_email("f@x"), "d"),
        with_id(record("device", ContactType::Email).with_email("f@x"), "e"),
        with_id(record("sim", ContactType::Viber).with_number("3"), "f"),
    ];

    let merger = ContactMerger::default();
    let forward = grouping(&merger.merge(&sources, records.clone()).unwrap());

    let mut reversed = records.clone();
    reversed.reverse();
    assert_eq!(grouping(&merger.merge(&sources, reversed).unwrap()), forward);

    let mut rotated = records;
    rotated.rotate_left(2);
    assert_eq!(grouping(&merger.merge(&sources, rotated).unwrap()), forward);
}

#[test]
fn test_full_name_only_joins_records_without_stronger_keys() {
    let sources = vec![source("device")];
    let records = vec![
        with_id(record("device", ContactType::Phone).with_first_name("Ann").with_surname("Lee"), "a"),
        with_id(record("device", ContactType::Signal).with_first_name("ann").with_surname(" lee "), "b"),
        // Same name but a number of its own: kept apart
        with_id(
            record("device", ContactType::Phone)
                .with_first_name("Ann")
                .with_surname("Lee")
                .with_number("999"),
            "c",
        ),
    ];

    let merged = ContactMerger::default().merge(&sources, records).unwrap();
    assert_eq!(
        grouping(&merged),
        vec![vec!["a".to_string(), "b".to_string()], vec!["c".to_string()]]
    );
}

#[test]
fn test_custom_policy_ignores_names() {
    let sources = vec![source("device")];
    let records = vec![
        record("device", ContactType::Phone).with_first_name("Ann"),
        record("device", ContactType::Phone).with_first_name("Ann"),
    ];

    let policy = MergePolicy::new(vec![MergeKey::NormalizedNumber]).unwrap();
    let merged = ContactMerger::new(policy).merge(&sources, records).unwrap();
    assert_eq!(merged.len(), 2);
}

#[test]
fn test_records_without_keys_stay_separate() {
    let sources = vec![source("device")];
    let records = vec![
        record("device", ContactType::Phone),
        record("device", ContactType::Phone),
    ];

    let merged = ContactMerger::default().merge(&sources, records).unwrap();
    assert_eq!(merged.len(), 2);
}

#[test]
fn test_remerging_reproduces_grouping() {
    let sources = vec![source("device"), source("sim")];
    let records = vec![
        with_id(record("device", ContactType::Phone).with_number("1").with_first_name("Ann"), "a"),
        with_id(record("sim", ContactType::Phone).with_number("1"), "b"),
        with_id(record("sim", ContactType::Email).with_email("bob@x"), "c"),
        with_id(record("device", ContactType::Email).with_email("bob@x").with_first_name("Bob"), "d"),
        with_id(record("device", ContactType::Threema).with_first_name("Cid"), "e"),
    ];

    let merger = ContactMerger::default();
    let first = merger.merge(&sources, records).unwrap();
    let expected = grouping(&first);

    let flattened: Vec<ContactRecord> = first
        .into_iter()
        .flat_map(MergedContact::into_source_contacts)
        .collect();
    let second = merger.merge(&sources, flattened).unwrap();

    assert_eq!(grouping(&second), expected);
}

#[test]
fn test_unknown_source_fails_whole_merge() {
    let sources = vec![source("device")];
    let records = vec![
        record("device", ContactType::Phone).with_number("1"),
        record("ghost", ContactType::Phone).with_number("2"),
    ];

    let result = ContactMerger::default().merge(&sources, records);
    assert_eq!(
        result,
        Err(MergeError::UnknownSource {
            index: 1,
            source_name: "ghost".to_string()
        })
    );
}

#[test]
fn test_duplicate_source_fails() {
    let sources = vec![source("device"), source("device")];
    let result = ContactMerger::default().merge(&sources, Vec::new());
    assert_eq!(result, Err(MergeError::DuplicateSource("device".to_string())));
}

#[test]
fn test_empty_input() {
    let merged = ContactMerger::default().merge(&[], Vec::new()).unwrap();
    assert!(merged.is_empty());
}
