use std::io::Write;

use contacts_cleaner::db::*;
use contacts_cleaner::error::CleanerError;
use contacts_cleaner::migrate;
use contacts_cleaner::model::*;
use contacts_cleaner::ops::cleaner_ops;
use contacts_cleaner::source::ContactSource;
use contacts_cleaner::store::ContactStore;

fn sample() -> Contact {
    let mut c = Contact::with_name("a", Some("Alice"), Some("Smith"));
    c.birthday = Some("1990-05-15".into());
    c.phone_numbers = vec![
        ContactPhoneNumber::new("p2", "555-0002", Some("work")),
        ContactPhoneNumber::new("p1", "555-0001", Some("home")),
    ];
    c.emails = vec![ContactEmail::new("e1", "alice@example.com", None)];
    c.url_addresses = vec![ContactUrlAddress::new("u1", "https://alice.dev", Some("homepage"))];
    c.phone_numbers[0].localized_label = Some("Work".into());
    c
}

// ==========================================================================
// CONTACT REPO TESTS
// ==========================================================================

#[test]
fn contact_insert_and_find() {
    let conn = schema::test_connection();
    let contact = sample();
    contact_repo::insert(&conn, &contact).unwrap();

    let found = contact_repo::find_by_id(&conn, &contact.id).unwrap().unwrap();
    assert_eq!(found, contact);
}

#[test]
fn find_all_keeps_insertion_and_list_order() {
    let conn = schema::test_connection();
    let second = Contact::with_name("z", Some("Zed"), None);
    contact_repo::insert(&conn, &second).unwrap();
    contact_repo::insert(&conn, &sample()).unwrap();

    let all = contact_repo::find_all(&conn).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id.as_str(), "z");
    assert_eq!(all[1].item_ids(SubItemKind::PhoneNumbers), vec!["p2", "p1"]);
}

#[test]
fn contact_update_replaces_lists() {
    let conn = schema::test_connection();
    let mut contact = sample();
    contact_repo::insert(&conn, &contact).unwrap();

    contact.job_title = Some("Engineer".into());
    contact.phone_numbers.remove(0);
    contact.emails.clear();
    contact_repo::update(&conn, &contact).unwrap();

    let found = contact_repo::find_by_id(&conn, &contact.id).unwrap().unwrap();
    assert_eq!(found.job_title.as_deref(), Some("Engineer"));
    assert_eq!(found.item_ids(SubItemKind::PhoneNumbers), vec!["p1"]);
    assert!(found.emails.is_empty());
}

#[test]
fn contact_update_missing_is_not_found() {
    let conn = schema::test_connection();
    let err = contact_repo::update(&conn, &Contact::new("ghost")).unwrap_err();
    assert!(matches!(err, CleanerError::NotFound { .. }));
}

#[test]
fn contact_delete_cascades_items() {
    let conn = schema::test_connection();
    let contact = sample();
    contact_repo::insert(&conn, &contact).unwrap();
    contact_repo::delete(&conn, &contact.id).unwrap();

    assert!(contact_repo::find_by_id(&conn, &contact.id).unwrap().is_none());
    let items: i64 = conn
        .query_row("SELECT COUNT(*) FROM contact_items", [], |row| row.get(0))
        .unwrap();
    assert_eq!(items, 0);
}

#[test]
fn duplicate_item_ids_in_one_list_are_rejected() {
    let conn = schema::test_connection();
    let mut contact = Contact::new("a");
    contact.emails = vec![
        ContactEmail::new("e1", "one@example.com", None),
        ContactEmail::new("e1", "two@example.com", None),
    ];
    assert!(contact_repo::insert(&conn, &contact).is_err());
}

// ==========================================================================
// SQLITE SOURCE TESTS
// ==========================================================================

#[test]
fn source_creates_new_contacts_with_generated_ids() {
    let mut source = SqliteSource::from_connection(schema::test_connection()).unwrap();

    let update = ContactUpdate {
        first_name: Some(Some("Bob".into())),
        phone_numbers: vec![ItemUpdate {
            value: Some("777".into()),
            ..ItemUpdate::default()
        }],
        ..ContactUpdate::default()
    };
    source.persist_contacts(&[update], &[]).unwrap();

    let contacts = source.list_contacts().unwrap();
    assert_eq!(contacts.len(), 1);
    assert!(!contacts[0].id.is_unsaved());
    assert!(!contacts[0].phone_numbers[0].id.is_unsaved());
    assert_eq!(contacts[0].phone_numbers[0].phone_number.as_deref(), Some("777"));
}

#[test]
fn source_rejects_invalid_birthday_without_writing() {
    let mut source = SqliteSource::from_connection(schema::test_connection()).unwrap();
    let mut bad = Contact::new("");
    bad.birthday = Some("yesterday".into());

    let err = source
        .persist_contacts(&[ContactUpdate::from(&bad)], &[])
        .unwrap_err();

    assert!(matches!(err, CleanerError::InvalidDate { .. }));
    assert_eq!(contact_repo::count(source.connection()).unwrap(), 0);
}

#[test]
fn source_update_of_unknown_contact_rolls_back() {
    let conn = schema::test_connection();
    contact_repo::insert(&conn, &sample()).unwrap();
    let mut source = SqliteSource::from_connection(conn).unwrap();

    let ghost = ContactUpdate::from(&Contact::new("ghost"));
    let err = source.persist_contacts(&[ghost], &[Id::new("a")]).unwrap_err();

    assert!(matches!(err, CleanerError::NotFound { .. }));
    assert_eq!(contact_repo::count(source.connection()).unwrap(), 1);
}

#[test]
fn cleaner_round_trip_through_sqlite() {
    let conn = schema::test_connection();
    let mut twin = Contact::with_name("b", Some("alice"), Some("smith"));
    twin.phone_numbers = vec![ContactPhoneNumber::new("p9", "5550001", None)];
    contact_repo::insert(&conn, &sample()).unwrap();
    contact_repo::insert(&conn, &twin).unwrap();
    let mut source = SqliteSource::from_connection(conn).unwrap();

    let mut store = ContactStore::new();
    cleaner_ops::fetch_contacts(&mut store, &source).unwrap();
    assert_eq!(store.duplicate_name_contacts().len(), 1);
    assert_eq!(store.duplicate_phone_contacts().len(), 1);

    cleaner_ops::delete_contacts(&mut store, &mut source, &["b__phoneNumber:p9"]).unwrap();

    assert_eq!(store.contacts().len(), 1);
    assert_eq!(store.contacts()[0], sample());
    assert!(store.duplicate_phone_contacts().is_empty());
}

#[test]
fn source_keeps_absent_item_values_on_save() {
    let conn = schema::test_connection();
    let mut contact = Contact::with_name("n", Some("Nia"), None);
    contact.phone_numbers = vec![
        ContactPhoneNumber::new("p1", "1", None),
        ContactPhoneNumber::new("p2", "2", None),
    ];
    contact.emails = vec![ContactEmail {
        id: Id::new("e1"),
        label: None,
        localized_label: None,
        email: None,
    }];
    contact_repo::insert(&conn, &contact).unwrap();
    let mut source = SqliteSource::from_connection(conn).unwrap();

    let mut store = ContactStore::new();
    cleaner_ops::fetch_contacts(&mut store, &source).unwrap();
    cleaner_ops::delete_contacts(&mut store, &mut source, &["n__phoneNumber:p1"]).unwrap();

    let saved = contact_repo::find_by_id(source.connection(), &Id::new("n"))
        .unwrap()
        .unwrap();
    assert_eq!(saved.item_ids(SubItemKind::PhoneNumbers), vec!["p2"]);
    assert_eq!(saved.emails, contact.emails);
}

// ==========================================================================
// IMPORT TESTS
// ==========================================================================

#[test]
fn import_json_loads_contacts() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("contacts.json");
    let db_path = dir.path().join("contacts.db");

    let mut blank_id = Contact::with_name("", Some("New"), None);
    blank_id.emails = vec![ContactEmail::new("", "new@example.com", None)];
    let json = serde_json::to_string(&vec![sample(), blank_id]).unwrap();
    std::fs::File::create(&json_path)
        .unwrap()
        .write_all(json.as_bytes())
        .unwrap();

    let stats = migrate::import_json(&json_path, &db_path).unwrap();
    assert_eq!(
        stats,
        migrate::ImportStats {
            contacts: 2,
            phone_numbers: 2,
            emails: 2,
            url_addresses: 1,
        }
    );

    let source = SqliteSource::open(&db_path).unwrap();
    let contacts = source.list_contacts().unwrap();
    assert_eq!(contacts[0], sample());
    assert!(!contacts[1].id.is_unsaved());
    assert!(!contacts[1].emails[0].id.is_unsaved());
}

#[test]
fn import_rejects_repeated_ids() {
    let mut conn = schema::test_connection();
    let err = migrate::import_contacts(&mut conn, &[sample(), sample()]).unwrap_err();
    assert!(matches!(err, CleanerError::AlreadyExists { .. }));
    assert_eq!(contact_repo::count(&conn).unwrap(), 0);
}
