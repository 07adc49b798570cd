use crate::db::SqliteSource;
use crate::error::CleanerError;
use crate::model::*;
use crate::ops::cleaner_ops;
use crate::store::{ContactStore, FetchStatus};

pub struct CLIContext {
    pub store: ContactStore,
    pub source: SqliteSource,
}

impl CLIContext {
    /// Loads all contacts from `source` into a fresh store.
    pub fn load(source: SqliteSource) -> Result<Self, CleanerError> {
        let mut store = ContactStore::new();
        cleaner_ops::fetch_contacts(&mut store, &source)?;
        if store.status() == FetchStatus::Blocked {
            return Err(CleanerError::AccessDenied);
        }
        Ok(Self { store, source })
    }

    pub fn contacts(&self) -> &[Contact] {
        self.store.contacts()
    }

    /// `"Ann Lee"`, or a placeholder for nameless contacts.
    pub fn name_of(contact: &Contact) -> String {
        let name = contact.display_name();
        if name.is_empty() {
            contact
                .organization_name
                .clone()
                .unwrap_or_else(|| "(no name)".into())
        } else {
            name
        }
    }

    pub fn format_item(value: Option<&str>, label: Option<&str>) -> String {
        match label {
            Some(l) if !l.is_empty() => format!("{} ({})", value.unwrap_or(""), l),
            _ => value.unwrap_or("").to_string(),
        }
    }

    pub fn print_json<T: serde::Serialize + ?Sized>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => self.print_error(&e.into()),
        }
    }

    /// Print an error.
    pub fn print_error(&self, e: &CleanerError) {
        println!("Error: {}", e);
    }
}
