use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::contact::{Contact, ContactEmail, ContactPhoneNumber, ContactUrlAddress, SubItem, SubItemKind};
use super::ids::Id;

/// Address of either a whole contact or one item inside one of its lists.
///
/// UI code passes these around as strings (`"<contactId>__<kind>:<itemId>"`
/// for items, the bare contact id otherwise); the string form is produced
/// by `Display` and read back by [`ContactRef::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ContactRef {
    Whole(Id<Contact>),
    Item {
        contact_id: Id<Contact>,
        kind: SubItemKind,
        item_id: String,
    },
}

impl ContactRef {
    pub fn item(contact_id: &Id<Contact>, kind: SubItemKind, item_id: &str) -> Self {
        ContactRef::Item {
            contact_id: contact_id.clone(),
            kind,
            item_id: item_id.to_string(),
        }
    }

    /// Parses the string form. Never fails: a string is an item reference
    /// only when exactly one kind marker occurs in it, exactly once.
    /// Anything else is taken as a whole-contact id.
    pub fn parse(s: &str) -> Self {
        let mut found: Option<(SubItemKind, usize)> = None;

        for kind in SubItemKind::ALL.iter().copied() {
            let mut positions = s.match_indices(kind.marker()).map(|(pos, _)| pos);
            let Some(pos) = positions.next() else {
                continue;
            };
            if positions.next().is_some() || found.is_some() {
                return ContactRef::Whole(Id::new(s));
            }
            found = Some((kind, pos));
        }

        match found {
            Some((kind, pos)) => ContactRef::Item {
                contact_id: Id::new(&s[..pos]),
                kind,
                item_id: s[pos + kind.marker().len()..].to_string(),
            },
            None => ContactRef::Whole(Id::new(s)),
        }
    }

    pub fn contact_id(&self) -> &Id<Contact> {
        match self {
            ContactRef::Whole(id) => id,
            ContactRef::Item { contact_id, .. } => contact_id,
        }
    }

    pub fn item_id(&self) -> Option<&str> {
        match self {
            ContactRef::Whole(_) => None,
            ContactRef::Item { item_id, .. } => Some(item_id),
        }
    }

    pub fn kind(&self) -> Option<SubItemKind> {
        match self {
            ContactRef::Whole(_) => None,
            ContactRef::Item { kind, .. } => Some(*kind),
        }
    }
}

impl fmt::Display for ContactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactRef::Whole(id) => write!(f, "{}", id),
            ContactRef::Item {
                contact_id,
                kind,
                item_id,
            } => write!(f, "{}{}{}", contact_id, kind.marker(), item_id),
        }
    }
}

impl From<ContactRef> for String {
    fn from(value: ContactRef) -> Self {
        value.to_string()
    }
}

impl From<String> for ContactRef {
    fn from(value: String) -> Self {
        ContactRef::parse(&value)
    }
}

/// One contact paired with exactly one item of one of its lists.
///
/// `contact` is the source contact with the flattened list emptied; the
/// other two lists are carried unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenContact<I> {
    pub id: ContactRef,
    pub contact: Contact,
    pub item: I,
}

pub type FlatPhoneContact = FlattenContact<ContactPhoneNumber>;
pub type FlatEmailContact = FlattenContact<ContactEmail>;
pub type FlatUrlContact = FlattenContact<ContactUrlAddress>;

impl<I: SubItem> FlattenContact<I> {
    pub fn new(source: &Contact, item: &I) -> Self {
        let mut contact = source.clone();
        I::items_of_mut(&mut contact).clear();
        Self {
            id: ContactRef::item(&source.id, I::KIND, item.id()),
            contact,
            item: item.clone(),
        }
    }

    pub fn contact_id(&self) -> &Id<Contact> {
        &self.contact.id
    }
}

impl<I: SubItem> Serialize for FlattenContact<I> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let c = &self.contact;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id.to_string())?;
        map.serialize_entry("firstName", &c.first_name)?;
        map.serialize_entry("secondName", &c.second_name)?;
        map.serialize_entry("middleName", &c.middle_name)?;
        map.serialize_entry("organizationName", &c.organization_name)?;
        map.serialize_entry("jobTitle", &c.job_title)?;
        map.serialize_entry("birthday", &c.birthday)?;
        for kind in SubItemKind::ALL.iter().copied() {
            if kind == I::KIND {
                map.serialize_entry(kind.singular(), &self.item)?;
                continue;
            }
            match kind {
                SubItemKind::PhoneNumbers => map.serialize_entry(kind.plural(), &c.phone_numbers)?,
                SubItemKind::Emails => map.serialize_entry(kind.plural(), &c.emails)?,
                SubItemKind::UrlAddresses => map.serialize_entry(kind.plural(), &c.url_addresses)?,
            }
        }
        map.end()
    }
}
