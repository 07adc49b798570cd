use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::Id;
use crate::error::{CleanerError, CleanerResult};
use crate::validation;

/// Which repeated list of a contact is being addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubItemKind {
    PhoneNumbers,
    Emails,
    UrlAddresses,
}

impl SubItemKind {
    pub const ALL: &'static [SubItemKind] = &[
        SubItemKind::PhoneNumbers,
        SubItemKind::Emails,
        SubItemKind::UrlAddresses,
    ];

    /// Field name of the list on a contact.
    pub fn plural(&self) -> &'static str {
        match self {
            SubItemKind::PhoneNumbers => "phoneNumbers",
            SubItemKind::Emails => "emails",
            SubItemKind::UrlAddresses => "urlAddresses",
        }
    }

    /// Field name of the single item on a flattened row.
    pub fn singular(&self) -> &'static str {
        match self {
            SubItemKind::PhoneNumbers => "phoneNumber",
            SubItemKind::Emails => "email",
            SubItemKind::UrlAddresses => "urlAddress",
        }
    }

    /// Separator between parent and item id in a composite row id.
    pub fn marker(&self) -> &'static str {
        match self {
            SubItemKind::PhoneNumbers => "__phoneNumber:",
            SubItemKind::Emails => "__email:",
            SubItemKind::UrlAddresses => "__urlAddress:",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SubItemKind::PhoneNumbers => "Phone numbers",
            SubItemKind::Emails => "Emails",
            SubItemKind::UrlAddresses => "URL addresses",
        }
    }

    pub fn from_plural(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.plural() == s)
    }

    pub fn from_singular(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.singular() == s)
    }

    /// Accepts either the plural or the singular field name.
    pub fn parse(s: &str) -> CleanerResult<Self> {
        Self::from_plural(s)
            .or_else(|| Self::from_singular(s))
            .ok_or_else(|| CleanerError::UnknownKind(s.to_string()))
    }
}

impl FromStr for SubItemKind {
    type Err = CleanerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SubItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPhoneNumber {
    pub id: Id<ContactPhoneNumber>,
    pub label: Option<String>,
    #[serde(default)]
    pub localized_label: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactEmail {
    pub id: Id<ContactEmail>,
    pub label: Option<String>,
    #[serde(default)]
    pub localized_label: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactUrlAddress {
    pub id: Id<ContactUrlAddress>,
    pub label: Option<String>,
    #[serde(default)]
    pub localized_label: Option<String>,
    pub url: Option<String>,
}

impl ContactPhoneNumber {
    pub fn new(id: &str, phone_number: &str, label: Option<&str>) -> Self {
        Self {
            id: Id::new(id),
            label: label.map(str::to_string),
            localized_label: None,
            phone_number: Some(phone_number.to_string()),
        }
    }
}

impl ContactEmail {
    pub fn new(id: &str, email: &str, label: Option<&str>) -> Self {
        Self {
            id: Id::new(id),
            label: label.map(str::to_string),
            localized_label: None,
            email: Some(email.to_string()),
        }
    }
}

impl ContactUrlAddress {
    pub fn new(id: &str, url: &str, label: Option<&str>) -> Self {
        Self {
            id: Id::new(id),
            label: label.map(str::to_string),
            localized_label: None,
            url: Some(url.to_string()),
        }
    }
}

/// A person record as handed out by the contact source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Id<Contact>,
    pub first_name: Option<String>,
    pub second_name: Option<String>,
    pub middle_name: Option<String>,
    pub organization_name: Option<String>,
    pub job_title: Option<String>,
    pub birthday: Option<String>,
    #[serde(default)]
    pub phone_numbers: Vec<ContactPhoneNumber>,
    #[serde(default)]
    pub emails: Vec<ContactEmail>,
    #[serde(default)]
    pub url_addresses: Vec<ContactUrlAddress>,
}

impl Contact {
    pub fn new(id: &str) -> Self {
        Self {
            id: Id::new(id),
            ..Self::default()
        }
    }

    pub fn with_name(id: &str, first_name: Option<&str>, second_name: Option<&str>) -> Self {
        let mut contact = Self::new(id);
        contact.first_name = first_name.map(str::to_string);
        contact.second_name = second_name.map(str::to_string);
        contact
    }

    /// `"<first> <second>"` trimmed, with absent parts read as empty.
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.second_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }

    pub fn birthday_date(&self) -> CleanerResult<Option<NaiveDate>> {
        validation::optional_date(self.birthday.as_deref(), "birthday")
    }

    /// Ids of the items in the list selected by `kind`, in list order.
    pub fn item_ids(&self, kind: SubItemKind) -> Vec<&str> {
        match kind {
            SubItemKind::PhoneNumbers => self.phone_numbers.iter().map(|i| i.id.as_str()).collect(),
            SubItemKind::Emails => self.emails.iter().map(|i| i.id.as_str()).collect(),
            SubItemKind::UrlAddresses => self.url_addresses.iter().map(|i| i.id.as_str()).collect(),
        }
    }

    pub fn item_count(&self, kind: SubItemKind) -> usize {
        match kind {
            SubItemKind::PhoneNumbers => self.phone_numbers.len(),
            SubItemKind::Emails => self.emails.len(),
            SubItemKind::UrlAddresses => self.url_addresses.len(),
        }
    }

    /// Keeps only the items of `kind` for which `keep` returns true.
    pub fn retain_items(&mut self, kind: SubItemKind, mut keep: impl FnMut(&str) -> bool) {
        match kind {
            SubItemKind::PhoneNumbers => self.phone_numbers.retain(|i| keep(i.id.as_str())),
            SubItemKind::Emails => self.emails.retain(|i| keep(i.id.as_str())),
            SubItemKind::UrlAddresses => self.url_addresses.retain(|i| keep(i.id.as_str())),
        }
    }
}

/// One entry of a contact's repeated lists.
pub trait SubItem: Clone + fmt::Debug + Serialize {
    const KIND: SubItemKind;

    fn id(&self) -> &str;
    fn label(&self) -> Option<&str>;
    fn localized_label(&self) -> Option<&str>;
    fn value(&self) -> Option<&str>;

    fn items_of(contact: &Contact) -> &[Self];
    fn items_of_mut(contact: &mut Contact) -> &mut Vec<Self>;
}

impl SubItem for ContactPhoneNumber {
    const KIND: SubItemKind = SubItemKind::PhoneNumbers;

    fn id(&self) -> &str {
        self.id.as_str()
    }
    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
    fn localized_label(&self) -> Option<&str> {
        self.localized_label.as_deref()
    }
    fn value(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }
    fn items_of(contact: &Contact) -> &[Self] {
        &contact.phone_numbers
    }
    fn items_of_mut(contact: &mut Contact) -> &mut Vec<Self> {
        &mut contact.phone_numbers
    }
}

impl SubItem for ContactEmail {
    const KIND: SubItemKind = SubItemKind::Emails;

    fn id(&self) -> &str {
        self.id.as_str()
    }
    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
    fn localized_label(&self) -> Option<&str> {
        self.localized_label.as_deref()
    }
    fn value(&self) -> Option<&str> {
        self.email.as_deref()
    }
    fn items_of(contact: &Contact) -> &[Self] {
        &contact.emails
    }
    fn items_of_mut(contact: &mut Contact) -> &mut Vec<Self> {
        &mut contact.emails
    }
}

impl SubItem for ContactUrlAddress {
    const KIND: SubItemKind = SubItemKind::UrlAddresses;

    fn id(&self) -> &str {
        self.id.as_str()
    }
    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
    fn localized_label(&self) -> Option<&str> {
        self.localized_label.as_deref()
    }
    fn value(&self) -> Option<&str> {
        self.url.as_deref()
    }
    fn items_of(contact: &Contact) -> &[Self] {
        &contact.url_addresses
    }
    fn items_of_mut(contact: &mut Contact) -> &mut Vec<Self> {
        &mut contact.url_addresses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_follow_the_fixed_mapping() {
        assert_eq!(SubItemKind::PhoneNumbers.singular(), "phoneNumber");
        assert_eq!(SubItemKind::Emails.singular(), "email");
        assert_eq!(SubItemKind::UrlAddresses.singular(), "urlAddress");
        assert_eq!(SubItemKind::UrlAddresses.marker(), "__urlAddress:");
    }

    #[test]
    fn kind_parses_both_forms() {
        assert_eq!("urlAddresses".parse::<SubItemKind>().unwrap(), SubItemKind::UrlAddresses);
        assert_eq!("email".parse::<SubItemKind>().unwrap(), SubItemKind::Emails);
    }

    #[test]
    fn kind_rejects_unknown_names() {
        let err = SubItemKind::parse("postalAddresses").unwrap_err();
        assert!(matches!(err, CleanerError::UnknownKind(ref k) if k == "postalAddresses"));
    }

    #[test]
    fn display_name_ignores_missing_parts() {
        assert_eq!(Contact::with_name("1", Some("Jo"), None).display_name(), "Jo");
        assert_eq!(Contact::with_name("1", None, Some("Doe")).display_name(), "Doe");
        assert_eq!(Contact::new("1").display_name(), "");
    }

    #[test]
    fn retain_items_only_touches_selected_list() {
        let mut c = Contact::new("a");
        c.phone_numbers = vec![
            ContactPhoneNumber::new("1", "111", None),
            ContactPhoneNumber::new("2", "222", None),
        ];
        c.emails = vec![ContactEmail::new("1", "a@b.c", None)];
        c.retain_items(SubItemKind::PhoneNumbers, |id| id != "1");
        assert_eq!(c.item_ids(SubItemKind::PhoneNumbers), vec!["2"]);
        assert_eq!(c.item_ids(SubItemKind::Emails), vec!["1"]);
    }
}
