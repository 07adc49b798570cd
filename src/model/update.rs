use super::contact::{Contact, ContactEmail, ContactPhoneNumber, ContactUrlAddress, SubItem};
use super::ids::Id;

/// Partial form of a list item handed to a contact source on save.
/// Missing parts read as empty strings when the source writes them out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    pub id: Option<String>,
    pub label: Option<String>,
    pub localized_label: Option<String>,
    pub value: Option<String>,
}

impl ItemUpdate {
    pub fn from_item<I: SubItem>(item: &I) -> Self {
        Self {
            id: Some(item.id().to_string()),
            label: item.label().map(str::to_string),
            localized_label: item.localized_label().map(str::to_string),
            value: item.value().map(str::to_string),
        }
    }

    pub fn wire_id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn wire_label(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }

    pub fn wire_value(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    pub fn is_new(&self) -> bool {
        self.wire_id().is_empty()
    }

    /// Id to store: the given one, or a fresh one for new items.
    fn stored_id<T>(&self) -> Id<T> {
        if self.is_new() {
            Id::generate()
        } else {
            Id::new(self.wire_id())
        }
    }
}

/// Partial contact for `persist_contacts`.
///
/// Scalar fields use `None` for "leave as is" and `Some(None)` for "clear".
/// The three lists are always complete and replace what the source holds.
/// An unsaved (empty) id means "create".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub id: Id<Contact>,
    pub first_name: Option<Option<String>>,
    pub second_name: Option<Option<String>>,
    pub middle_name: Option<Option<String>>,
    pub organization_name: Option<Option<String>>,
    pub job_title: Option<Option<String>>,
    pub birthday: Option<Option<String>>,
    pub phone_numbers: Vec<ItemUpdate>,
    pub emails: Vec<ItemUpdate>,
    pub url_addresses: Vec<ItemUpdate>,
}

impl ContactUpdate {
    pub fn is_new(&self) -> bool {
        self.id.is_unsaved()
    }

    /// Produces the contact a source should hold after this update.
    /// `existing` is the stored version, if any. New contacts and new
    /// items get generated ids; absent labels and values stay absent.
    pub fn apply_to(&self, existing: Option<&Contact>) -> Contact {
        let mut contact = existing.cloned().unwrap_or_default();
        contact.id = if self.is_new() {
            Id::generate()
        } else {
            self.id.clone()
        };

        assign(&mut contact.first_name, &self.first_name);
        assign(&mut contact.second_name, &self.second_name);
        assign(&mut contact.middle_name, &self.middle_name);
        assign(&mut contact.organization_name, &self.organization_name);
        assign(&mut contact.job_title, &self.job_title);
        assign(&mut contact.birthday, &self.birthday);

        contact.phone_numbers = self
            .phone_numbers
            .iter()
            .map(|u| ContactPhoneNumber {
                id: u.stored_id(),
                label: u.label.clone(),
                localized_label: u.localized_label.clone(),
                phone_number: u.value.clone(),
            })
            .collect();
        contact.emails = self
            .emails
            .iter()
            .map(|u| ContactEmail {
                id: u.stored_id(),
                label: u.label.clone(),
                localized_label: u.localized_label.clone(),
                email: u.value.clone(),
            })
            .collect();
        contact.url_addresses = self
            .url_addresses
            .iter()
            .map(|u| ContactUrlAddress {
                id: u.stored_id(),
                label: u.label.clone(),
                localized_label: u.localized_label.clone(),
                url: u.value.clone(),
            })
            .collect();

        contact
    }
}

fn assign(field: &mut Option<String>, change: &Option<Option<String>>) {
    if let Some(value) = change {
        *field = value.clone();
    }
}

impl From<&Contact> for ContactUpdate {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id.clone(),
            first_name: Some(contact.first_name.clone()),
            second_name: Some(contact.second_name.clone()),
            middle_name: Some(contact.middle_name.clone()),
            organization_name: Some(contact.organization_name.clone()),
            job_title: Some(contact.job_title.clone()),
            birthday: Some(contact.birthday.clone()),
            phone_numbers: contact.phone_numbers.iter().map(ItemUpdate::from_item).collect(),
            emails: contact.emails.iter().map(ItemUpdate::from_item).collect(),
            url_addresses: contact.url_addresses.iter().map(ItemUpdate::from_item).collect(),
        }
    }
}
