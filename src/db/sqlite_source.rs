use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, info};

use super::{contact_repo, schema};
use crate::error::{CleanerError, CleanerResult};
use crate::model::{Contact, ContactUpdate, Id};
use crate::source::ContactSource;

/// Contact source backed by a SQLite database.
pub struct SqliteSource {
    conn: Connection,
}

impl SqliteSource {
    pub fn open(path: &Path) -> CleanerResult<Self> {
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        info!(path = %path.display(), "opened contacts database");
        Ok(Self { conn })
    }

    pub fn from_connection(conn: Connection) -> CleanerResult<Self> {
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl ContactSource for SqliteSource {
    fn list_contacts(&self) -> CleanerResult<Vec<Contact>> {
        contact_repo::find_all(&self.conn)
    }

    /// Runs in one transaction: nothing is written if any update fails.
    fn persist_contacts(
        &mut self,
        updates: &[ContactUpdate],
        deleted_ids: &[Id<Contact>],
    ) -> CleanerResult<()> {
        let tx = self.conn.transaction()?;

        for id in deleted_ids {
            contact_repo::delete(&tx, id)?;
        }

        for update in updates {
            let existing = if update.is_new() {
                None
            } else {
                Some(contact_repo::find_by_id(&tx, &update.id)?.ok_or_else(|| {
                    CleanerError::NotFound {
                        entity_type: "Contact".into(),
                        id: update.id.to_string(),
                    }
                })?)
            };

            let contact = update.apply_to(existing.as_ref());
            contact.birthday_date()?;

            if existing.is_some() {
                contact_repo::update(&tx, &contact)?;
            } else {
                contact_repo::insert(&tx, &contact)?;
            }
        }

        tx.commit()?;
        debug!(
            updated = updates.len(),
            deleted = deleted_ids.len(),
            "persisted contacts"
        );
        Ok(())
    }
}
