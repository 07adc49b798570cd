use serde::Serialize;
use tracing::debug;

use crate::model::{Contact, ContactPhoneNumber, FlatPhoneContact};
use crate::queries::{duplicate_queries, flatten_queries};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    Unknown,
    Fetching,
    Error,
    Blocked,
    Fetched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&ContactStore)>;

/// Loaded contacts plus the views derived from them.
///
/// The phone-flattened list and both duplicate clusterings are recomputed
/// whenever the contacts are replaced. Listeners run after every change.
pub struct ContactStore {
    status: FetchStatus,
    contacts: Vec<Contact>,
    flat_contacts: Vec<FlatPhoneContact>,
    duplicate_name_contacts: Vec<Vec<Contact>>,
    duplicate_phone_contacts: Vec<Vec<FlatPhoneContact>>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for ContactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactStore {
    pub fn new() -> Self {
        Self {
            status: FetchStatus::Unknown,
            contacts: Vec::new(),
            flat_contacts: Vec::new(),
            duplicate_name_contacts: Vec::new(),
            duplicate_phone_contacts: Vec::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn flat_contacts(&self) -> &[FlatPhoneContact] {
        &self.flat_contacts
    }

    pub fn duplicate_name_contacts(&self) -> &[Vec<Contact>] {
        &self.duplicate_name_contacts
    }

    pub fn duplicate_phone_contacts(&self) -> &[Vec<FlatPhoneContact>] {
        &self.duplicate_phone_contacts
    }

    pub fn set_status(&mut self, status: FetchStatus) {
        if self.status == status {
            return;
        }
        debug!(from = ?self.status, to = ?status, "contact store status changed");
        self.status = status;
        self.notify();
    }

    pub fn set_contacts(&mut self, contacts: Vec<Contact>) {
        self.flat_contacts = flatten_queries::flatten::<ContactPhoneNumber>(&contacts);
        self.duplicate_name_contacts = duplicate_queries::find_duplicate_name_contacts(&contacts, None);
        self.duplicate_phone_contacts =
            duplicate_queries::find_duplicate_phone_contacts(&self.flat_contacts, None);
        self.contacts = contacts;

        debug!(
            contacts = self.contacts.len(),
            phone_rows = self.flat_contacts.len(),
            name_clusters = self.duplicate_name_contacts.len(),
            phone_clusters = self.duplicate_phone_contacts.len(),
            "contact store refreshed"
        );
        self.notify();
    }

    pub fn subscribe(&mut self, listener: impl Fn(&ContactStore) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(self);
        }
    }
}
