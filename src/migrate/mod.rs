use std::collections::HashSet;
use std::path::Path;

use rusqlite::Connection;
use tracing::info;

use crate::db::{contact_repo, schema};
use crate::error::{CleanerError, CleanerResult};
use crate::model::{Contact, ContactUpdate};

/// Imports a JSON array of contacts (the shape the platform bridge emits)
/// into a SQLite database.
pub fn import_json(json_path: &Path, db_path: &Path) -> CleanerResult<ImportStats> {
    let json_str = std::fs::read_to_string(json_path)?;
    let contacts: Vec<Contact> = serde_json::from_str(&json_str)?;

    let mut conn = Connection::open(db_path)?;
    schema::initialize(&conn)?;

    let stats = import_contacts(&mut conn, &contacts)?;
    info!(
        contacts = stats.contacts,
        path = %json_path.display(),
        "imported contacts"
    );
    Ok(stats)
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub contacts: usize,
    pub phone_numbers: usize,
    pub emails: usize,
    pub url_addresses: usize,
}

/// Writes `contacts` in one transaction. Contacts or items without an id
/// get a generated one; a repeated contact id aborts the import.
pub fn import_contacts(conn: &mut Connection, contacts: &[Contact]) -> CleanerResult<ImportStats> {
    let tx = conn.transaction()?;
    let mut seen = HashSet::new();
    let mut stats = ImportStats::default();

    for source in contacts {
        let contact = ContactUpdate::from(source).apply_to(None);
        if !seen.insert(contact.id.value.clone()) {
            return Err(CleanerError::AlreadyExists {
                entity_type: "Contact".into(),
                identifier: contact.id.to_string(),
            });
        }
        contact.birthday_date()?;
        contact_repo::insert(&tx, &contact)?;

        stats.contacts += 1;
        stats.phone_numbers += contact.phone_numbers.len();
        stats.emails += contact.emails.len();
        stats.url_addresses += contact.url_addresses.len();
    }

    tx.commit()?;
    Ok(stats)
}
