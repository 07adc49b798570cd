use std::collections::HashMap;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{CleanerError, CleanerResult};
use crate::model::{Contact, ContactEmail, ContactPhoneNumber, ContactUrlAddress, Id, SubItem, SubItemKind};

const CONTACT_COLUMNS: &str =
    "id, first_name, second_name, middle_name, organization_name, job_title, birthday";

pub fn insert(conn: &Connection, contact: &Contact) -> CleanerResult<()> {
    conn.execute(
        "INSERT INTO contacts (id, first_name, second_name, middle_name, organization_name, job_title, birthday)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            contact.id.as_str(),
            contact.first_name,
            contact.second_name,
            contact.middle_name,
            contact.organization_name,
            contact.job_title,
            contact.birthday,
        ],
    )?;
    insert_items(conn, contact)
}

/// Rewrites the scalar fields and replaces all three lists.
pub fn update(conn: &Connection, contact: &Contact) -> CleanerResult<()> {
    let changed = conn.execute(
        "UPDATE contacts SET first_name = ?1, second_name = ?2, middle_name = ?3,
             organization_name = ?4, job_title = ?5, birthday = ?6, updated_at = datetime('now')
         WHERE id = ?7",
        params![
            contact.first_name,
            contact.second_name,
            contact.middle_name,
            contact.organization_name,
            contact.job_title,
            contact.birthday,
            contact.id.as_str(),
        ],
    )?;
    if changed == 0 {
        return Err(CleanerError::NotFound {
            entity_type: "Contact".into(),
            id: contact.id.to_string(),
        });
    }

    conn.execute(
        "DELETE FROM contact_items WHERE contact_id = ?1",
        params![contact.id.as_str()],
    )?;
    insert_items(conn, contact)
}

pub fn delete(conn: &Connection, contact_id: &Id<Contact>) -> CleanerResult<()> {
    conn.execute(
        "DELETE FROM contacts WHERE id = ?1",
        params![contact_id.as_str()],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, contact_id: &Id<Contact>) -> CleanerResult<Option<Contact>> {
    let contact = conn
        .query_row(
            &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
            params![contact_id.as_str()],
            row_to_contact,
        )
        .optional()?;

    let Some(mut contact) = contact else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT contact_id, kind, id, label, localized_label, value
         FROM contact_items WHERE contact_id = ?1 ORDER BY kind, position",
    )?;
    let items = stmt
        .query_map(params![contact_id.as_str()], row_to_item)?
        .collect::<Result<Vec<_>, _>>()?;
    for item in items {
        attach_item(&mut contact, item)?;
    }

    Ok(Some(contact))
}

/// Every stored contact, in insertion order.
pub fn find_all(conn: &Connection) -> CleanerResult<Vec<Contact>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY rowid"
    ))?;
    let mut contacts = stmt
        .query_map([], row_to_contact)?
        .collect::<Result<Vec<_>, _>>()?;

    let slots: HashMap<String, usize> = contacts
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id.value.clone(), i))
        .collect();

    let mut stmt = conn.prepare(
        "SELECT contact_id, kind, id, label, localized_label, value
         FROM contact_items ORDER BY contact_id, kind, position",
    )?;
    let items = stmt
        .query_map([], row_to_item)?
        .collect::<Result<Vec<_>, _>>()?;

    for item in items {
        let slot = slots.get(&item.contact_id).copied().ok_or_else(|| {
            CleanerError::Other(format!("Item {} belongs to unknown contact {}", item.id, item.contact_id))
        })?;
        attach_item(&mut contacts[slot], item)?;
    }

    Ok(contacts)
}

pub fn count(conn: &Connection) -> CleanerResult<usize> {
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
    Ok(n as usize)
}

fn insert_items(conn: &Connection, contact: &Contact) -> CleanerResult<()> {
    insert_list(conn, &contact.id, &contact.phone_numbers)?;
    insert_list(conn, &contact.id, &contact.emails)?;
    insert_list(conn, &contact.id, &contact.url_addresses)?;
    Ok(())
}

fn insert_list<I: SubItem>(conn: &Connection, contact_id: &Id<Contact>, items: &[I]) -> CleanerResult<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO contact_items (contact_id, kind, id, position, label, localized_label, value)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    for (position, item) in items.iter().enumerate() {
        stmt.execute(params![
            contact_id.as_str(),
            I::KIND.plural(),
            item.id(),
            position as i64,
            item.label(),
            item.localized_label(),
            item.value(),
        ])?;
    }
    Ok(())
}

struct ItemRow {
    contact_id: String,
    kind: String,
    id: String,
    label: Option<String>,
    localized_label: Option<String>,
    value: Option<String>,
}

fn row_to_contact(row: &Row) -> rusqlite::Result<Contact> {
    let id: String = row.get(0)?;
    Ok(Contact {
        id: Id::new(id),
        first_name: row.get(1)?,
        second_name: row.get(2)?,
        middle_name: row.get(3)?,
        organization_name: row.get(4)?,
        job_title: row.get(5)?,
        birthday: row.get(6)?,
        phone_numbers: Vec::new(),
        emails: Vec::new(),
        url_addresses: Vec::new(),
    })
}

fn row_to_item(row: &Row) -> rusqlite::Result<ItemRow> {
    Ok(ItemRow {
        contact_id: row.get(0)?,
        kind: row.get(1)?,
        id: row.get(2)?,
        label: row.get(3)?,
        localized_label: row.get(4)?,
        value: row.get(5)?,
    })
}

fn attach_item(contact: &mut Contact, item: ItemRow) -> CleanerResult<()> {
    let kind = SubItemKind::from_plural(&item.kind)
        .ok_or_else(|| CleanerError::Other(format!("Unknown item kind in database: {}", item.kind)))?;

    match kind {
        SubItemKind::PhoneNumbers => contact.phone_numbers.push(ContactPhoneNumber {
            id: Id::new(item.id),
            label: item.label,
            localized_label: item.localized_label,
            phone_number: item.value,
        }),
        SubItemKind::Emails => contact.emails.push(ContactEmail {
            id: Id::new(item.id),
            label: item.label,
            localized_label: item.localized_label,
            email: item.value,
        }),
        SubItemKind::UrlAddresses => contact.url_addresses.push(ContactUrlAddress {
            id: Id::new(item.id),
            label: item.label,
            localized_label: item.localized_label,
            url: item.value,
        }),
    }
    Ok(())
}
