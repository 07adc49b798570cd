use tracing::debug;

use crate::error::{CleanerError, CleanerResult};
use crate::model::{Contact, ContactUpdate, Id};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
}

/// Answer of the platform when asked for contacts access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Blocked,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        self == PermissionStatus::Granted
    }
}

/// Where contacts come from and where changes go.
pub trait ContactSource {
    fn access(&self, _kind: AccessKind) -> CleanerResult<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    /// The full current set, no paging.
    fn list_contacts(&self) -> CleanerResult<Vec<Contact>>;

    /// Applies `updates` and removes `deleted_ids` in one call.
    fn persist_contacts(
        &mut self,
        updates: &[ContactUpdate],
        deleted_ids: &[Id<Contact>],
    ) -> CleanerResult<()>;
}

/// Keeps contacts in a `Vec`.
#[derive(Debug, Clone)]
pub struct MemorySource {
    contacts: Vec<Contact>,
    read: PermissionStatus,
    write: PermissionStatus,
}

impl MemorySource {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self {
            contacts,
            read: PermissionStatus::Granted,
            write: PermissionStatus::Granted,
        }
    }

    pub fn with_access(mut self, kind: AccessKind, status: PermissionStatus) -> Self {
        match kind {
            AccessKind::Read => self.read = status,
            AccessKind::Write => self.write = status,
        }
        self
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }
}

impl ContactSource for MemorySource {
    fn access(&self, kind: AccessKind) -> CleanerResult<PermissionStatus> {
        Ok(match kind {
            AccessKind::Read => self.read,
            AccessKind::Write => self.write,
        })
    }

    fn list_contacts(&self) -> CleanerResult<Vec<Contact>> {
        Ok(self.contacts.clone())
    }

    fn persist_contacts(
        &mut self,
        updates: &[ContactUpdate],
        deleted_ids: &[Id<Contact>],
    ) -> CleanerResult<()> {
        // Nothing is touched unless every update has a target.
        let mut targets = Vec::with_capacity(updates.len());
        for update in updates {
            if update.is_new() {
                targets.push(None);
                continue;
            }
            let index = self
                .contacts
                .iter()
                .position(|c| c.id == update.id && !deleted_ids.contains(&c.id))
                .ok_or_else(|| CleanerError::NotFound {
                    entity_type: "Contact".into(),
                    id: update.id.to_string(),
                })?;
            targets.push(Some(index));
        }

        for (update, target) in updates.iter().zip(targets) {
            match target {
                Some(index) => {
                    let applied = update.apply_to(Some(&self.contacts[index]));
                    self.contacts[index] = applied;
                }
                None => self.contacts.push(update.apply_to(None)),
            }
        }
        self.contacts.retain(|c| !deleted_ids.contains(&c.id));

        debug!(
            updated = updates.len(),
            deleted = deleted_ids.len(),
            "persisted contacts in memory"
        );
        Ok(())
    }
}
