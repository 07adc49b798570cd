use std::collections::HashMap;

use serde::Serialize;

use crate::model::{
    Contact, ContactEmail, ContactPhoneNumber, ContactRef, ContactUrlAddress, FlatEmailContact,
    FlatPhoneContact, FlatUrlContact, FlattenContact, Id, SubItem, SubItemKind,
};

/// One row per item of list `I`, in contact order then list order.
/// Contacts with an empty list contribute nothing.
pub fn flatten<I: SubItem>(contacts: &[Contact]) -> Vec<FlattenContact<I>> {
    contacts
        .iter()
        .flat_map(|contact| {
            I::items_of(contact)
                .iter()
                .map(move |item| FlattenContact::new(contact, item))
        })
        .collect()
}

/// Flattened rows for a kind chosen at runtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlatRows {
    PhoneNumbers(Vec<FlatPhoneContact>),
    Emails(Vec<FlatEmailContact>),
    UrlAddresses(Vec<FlatUrlContact>),
}

impl FlatRows {
    pub fn len(&self) -> usize {
        match self {
            FlatRows::PhoneNumbers(rows) => rows.len(),
            FlatRows::Emails(rows) => rows.len(),
            FlatRows::UrlAddresses(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ids(&self) -> Vec<&ContactRef> {
        match self {
            FlatRows::PhoneNumbers(rows) => rows.iter().map(|r| &r.id).collect(),
            FlatRows::Emails(rows) => rows.iter().map(|r| &r.id).collect(),
            FlatRows::UrlAddresses(rows) => rows.iter().map(|r| &r.id).collect(),
        }
    }
}

pub fn flatten_by(contacts: &[Contact], kind: SubItemKind) -> FlatRows {
    match kind {
        SubItemKind::PhoneNumbers => FlatRows::PhoneNumbers(flatten::<ContactPhoneNumber>(contacts)),
        SubItemKind::Emails => FlatRows::Emails(flatten::<ContactEmail>(contacts)),
        SubItemKind::UrlAddresses => FlatRows::UrlAddresses(flatten::<ContactUrlAddress>(contacts)),
    }
}

/// Row ids only, without materializing the rows.
pub fn flatten_ids(contacts: &[Contact], kind: SubItemKind) -> Vec<ContactRef> {
    contacts
        .iter()
        .flat_map(|contact| {
            contact
                .item_ids(kind)
                .into_iter()
                .map(move |item_id| ContactRef::item(&contact.id, kind, item_id))
        })
        .collect()
}

/// Items selected under one contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnflattenedContact {
    pub id: Id<Contact>,
    /// Empty when the contact was only referenced as a whole.
    pub nested_ids: Vec<String>,
}

/// Groups composite row ids back under their contacts, in first-seen order.
pub fn unflatten<S: AsRef<str>>(ids: &[S]) -> Vec<UnflattenedContact> {
    unflatten_refs(ids.iter().map(|s| ContactRef::parse(s.as_ref())))
}

pub fn unflatten_refs(refs: impl IntoIterator<Item = ContactRef>) -> Vec<UnflattenedContact> {
    let mut groups: Vec<UnflattenedContact> = Vec::new();
    let mut slots: HashMap<Id<Contact>, usize> = HashMap::new();

    for r in refs {
        let (contact_id, item_id) = match r {
            ContactRef::Whole(id) => (id, None),
            ContactRef::Item {
                contact_id, item_id, ..
            } => (contact_id, Some(item_id)),
        };

        let slot = match slots.get(&contact_id) {
            Some(&slot) => slot,
            None => {
                groups.push(UnflattenedContact {
                    id: contact_id.clone(),
                    nested_ids: Vec::new(),
                });
                slots.insert(contact_id, groups.len() - 1);
                groups.len() - 1
            }
        };

        if let Some(item_id) = item_id {
            groups[slot].nested_ids.push(item_id);
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact_with_phones(id: &str, phones: &[&str]) -> Contact {
        let mut c = Contact::new(id);
        c.phone_numbers = phones
            .iter()
            .map(|p| ContactPhoneNumber::new(p, "123", None))
            .collect();
        c
    }

    #[test]
    fn flatten_skips_contacts_without_items() {
        let contacts = vec![contact_with_phones("a", &["p1"]), contact_with_phones("b", &[])];
        let rows = flatten::<ContactPhoneNumber>(&contacts);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id.to_string(), "a__phoneNumber:p1");
    }

    #[test]
    fn flatten_ids_match_row_ids() {
        let contacts = vec![contact_with_phones("a", &["p1", "p2"]), contact_with_phones("b", &["p3"])];
        let rows = flatten::<ContactPhoneNumber>(&contacts);
        let ids = flatten_ids(&contacts, SubItemKind::PhoneNumbers);
        assert_eq!(rows.iter().map(|r| r.id.clone()).collect::<Vec<_>>(), ids);
    }

    #[test]
    fn unflatten_groups_in_first_seen_order() {
        let groups = unflatten(&["b__email:e1", "a", "b__email:e2", "a__email:e3"]);
        assert_eq!(
            groups,
            vec![
                UnflattenedContact {
                    id: Id::new("b"),
                    nested_ids: vec!["e1".into(), "e2".into()],
                },
                UnflattenedContact {
                    id: Id::new("a"),
                    nested_ids: vec!["e3".into()],
                },
            ]
        );
    }

    #[test]
    fn unflatten_bare_id_has_no_nested_ids() {
        let groups = unflatten(&["42"]);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].nested_ids.is_empty());
    }

    #[test]
    fn empty_inputs_give_empty_outputs() {
        assert!(flatten::<ContactEmail>(&[]).is_empty());
        assert!(flatten_by(&[], SubItemKind::UrlAddresses).is_empty());
        assert!(unflatten::<&str>(&[]).is_empty());
    }
}
