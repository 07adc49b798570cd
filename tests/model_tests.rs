use chrono::NaiveDate;
use contacts_cleaner::error::CleanerError;
use contacts_cleaner::model::*;

// ==========================================================================
// ID TESTS
// ==========================================================================

#[test]
fn id_generate_creates_unique_ids() {
    let id1 = Id::<Contact>::generate();
    let id2 = Id::<Contact>::generate();
    assert_ne!(id1, id2);
}

#[test]
fn id_is_type_safe() {
    let contact_id = Id::<Contact>::new("1");
    let email_id = Id::<ContactEmail>::new("1");
    // Different types at compile time; only the raw values can be compared.
    assert_eq!(contact_id.value, email_id.value);
}

// ==========================================================================
// CONTACT TESTS
// ==========================================================================

#[test]
fn contact_deserializes_from_bridge_json() {
    let json = r#"{
        "id": "a",
        "firstName": "Jo",
        "secondName": "Doe",
        "middleName": null,
        "organizationName": "Acme",
        "jobTitle": null,
        "birthday": "1990-05-15",
        "phoneNumbers": [
            {"id": "p1", "label": "mobile", "localizedLabel": "Mobile", "phoneNumber": "+1 555"}
        ],
        "emails": [{"id": "e1", "label": null, "email": "jo@example.com"}],
        "urlAddresses": []
    }"#;

    let contact: Contact = serde_json::from_str(json).unwrap();
    assert_eq!(contact.id.as_str(), "a");
    assert_eq!(contact.organization_name.as_deref(), Some("Acme"));
    assert_eq!(contact.phone_numbers[0].localized_label.as_deref(), Some("Mobile"));
    assert_eq!(contact.emails[0].localized_label, None);
    assert_eq!(
        contact.birthday_date().unwrap(),
        NaiveDate::from_ymd_opt(1990, 5, 15)
    );
}

#[test]
fn contact_serializes_in_camel_case() {
    let mut contact = Contact::with_name("a", Some("Jo"), None);
    contact.url_addresses = vec![ContactUrlAddress::new("u1", "https://jo.dev", Some("homepage"))];

    let json = serde_json::to_value(&contact).unwrap();
    assert_eq!(json["firstName"], "Jo");
    assert_eq!(json["urlAddresses"][0]["url"], "https://jo.dev");
    assert_eq!(json["urlAddresses"][0]["label"], "homepage");
}

#[test]
fn free_form_labels_round_trip() {
    let mut contact = Contact::new("a");
    contact.phone_numbers = vec![ContactPhoneNumber::new("p1", "1", Some("_$!<Other>!$_"))];

    let json = serde_json::to_string(&contact).unwrap();
    let back: Contact = serde_json::from_str(&json).unwrap();
    assert_eq!(back, contact);
}

#[test]
fn invalid_birthday_is_reported() {
    let mut contact = Contact::new("a");
    contact.birthday = Some("May 15".into());
    assert!(matches!(
        contact.birthday_date(),
        Err(CleanerError::InvalidDate { .. })
    ));
}

#[test]
fn empty_birthday_means_unset() {
    let mut contact = Contact::new("a");
    contact.birthday = Some(String::new());
    assert_eq!(contact.birthday_date().unwrap(), None);
}

// ==========================================================================
// SUB-ITEM KIND TESTS
// ==========================================================================

#[test]
fn every_kind_maps_plural_to_singular() {
    let pairs: Vec<(&str, &str)> = SubItemKind::ALL
        .iter()
        .map(|k| (k.plural(), k.singular()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("phoneNumbers", "phoneNumber"),
            ("emails", "email"),
            ("urlAddresses", "urlAddress"),
        ]
    );
}

#[test]
fn unknown_kind_is_an_error() {
    assert!(matches!(
        "faxNumbers".parse::<SubItemKind>(),
        Err(CleanerError::UnknownKind(_))
    ));
}

#[test]
fn sub_item_trait_reads_each_list() {
    let mut contact = Contact::new("a");
    contact.phone_numbers = vec![ContactPhoneNumber::new("p1", "1", None)];
    contact.emails = vec![ContactEmail::new("e1", "a@b.c", None)];

    assert_eq!(ContactPhoneNumber::items_of(&contact).len(), 1);
    assert_eq!(ContactEmail::items_of(&contact)[0].value(), Some("a@b.c"));
    assert!(ContactUrlAddress::items_of(&contact).is_empty());
}

// ==========================================================================
// CONTACT REF TESTS
// ==========================================================================

#[test]
fn contact_ref_round_trips_through_string() {
    for kind in SubItemKind::ALL.iter().copied() {
        let r = ContactRef::item(&Id::new("c-1"), kind, "i-1");
        assert_eq!(ContactRef::parse(&r.to_string()), r);
    }
}

#[test]
fn unsaved_contact_ref_keeps_empty_parent() {
    let r = ContactRef::parse("__phoneNumber:p1");
    assert_eq!(r.contact_id().as_str(), "");
    assert_eq!(r.item_id(), Some("p1"));
    assert_eq!(r.kind(), Some(SubItemKind::PhoneNumbers));
    assert_eq!(r.to_string(), "__phoneNumber:p1");
}
