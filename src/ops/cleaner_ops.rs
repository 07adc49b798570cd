use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::error::{CleanerError, CleanerResult};
use crate::model::{Contact, ContactRef, ContactUpdate, Id, SubItemKind};
use crate::queries::contact_queries;
use crate::queries::flatten_queries::{self, UnflattenedContact};
use crate::source::{AccessKind, ContactSource};
use crate::store::{ContactStore, FetchStatus};

/// What a selection turns into once applied to the loaded contacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalPlan {
    /// Contacts that keep at least one item of the removed kind.
    pub updates: Vec<Contact>,
    /// Contacts left with no item of that kind, removed entirely.
    pub deleted_ids: Vec<Id<Contact>>,
}

impl RemovalPlan {
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.deleted_ids.is_empty()
    }
}

/// Removes the selected items of `kind` from each referenced contact.
///
/// A whole-contact reference clears the list. A contact whose list ends up
/// empty is deleted; the rest are updated. Ids that match no loaded contact
/// are ignored. Output follows the order of `contacts`.
pub fn plan_removal(
    contacts: &[Contact],
    selection: &[UnflattenedContact],
    kind: SubItemKind,
) -> RemovalPlan {
    let selected: HashMap<&Id<Contact>, &[String]> = selection
        .iter()
        .map(|s| (&s.id, s.nested_ids.as_slice()))
        .collect();

    let mut plan = RemovalPlan::default();
    for contact in contacts {
        let Some(nested_ids) = selected.get(&contact.id) else {
            continue;
        };

        let mut updated = contact.clone();
        if nested_ids.is_empty() {
            updated.retain_items(kind, |_| false);
        } else {
            updated.retain_items(kind, |item_id| !nested_ids.iter().any(|n| n == item_id));
        }

        if updated.item_count(kind) == 0 {
            plan.deleted_ids.push(updated.id);
        } else {
            plan.updates.push(updated);
        }
    }
    plan
}

/// Loads every contact from `source` into `store`, sorted by name.
///
/// A blocked or denied read leaves the store untouched apart from the
/// `Blocked` status. Failures set `Error` and are returned.
pub fn fetch_contacts(store: &mut ContactStore, source: &dyn ContactSource) -> CleanerResult<()> {
    store.set_status(FetchStatus::Fetching);

    match load_sorted(source) {
        Ok(Some(contacts)) => {
            info!(count = contacts.len(), "fetched contacts");
            store.set_contacts(contacts);
            store.set_status(FetchStatus::Fetched);
            Ok(())
        }
        Ok(None) => {
            warn!("contacts read access is blocked");
            store.set_status(FetchStatus::Blocked);
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "failed to fetch contacts");
            store.set_status(FetchStatus::Error);
            Err(e)
        }
    }
}

fn load_sorted(source: &dyn ContactSource) -> CleanerResult<Option<Vec<Contact>>> {
    if !source.access(AccessKind::Read)?.is_granted() {
        return Ok(None);
    }
    let mut contacts = source.list_contacts()?;
    contact_queries::sort_by_display_name(&mut contacts);
    Ok(Some(contacts))
}

/// Removes the selected phone numbers (or whole contacts) and reloads.
///
/// `ids` are flattened row ids or bare contact ids, as a UI would pass them.
pub fn delete_contacts<S: AsRef<str>>(
    store: &mut ContactStore,
    source: &mut dyn ContactSource,
    ids: &[S],
) -> CleanerResult<RemovalPlan> {
    remove_items(store, source, ids, SubItemKind::PhoneNumbers)
}

pub fn delete_contact(
    store: &mut ContactStore,
    source: &mut dyn ContactSource,
    contact_id: &str,
) -> CleanerResult<RemovalPlan> {
    delete_contacts(store, source, &[contact_id])
}

/// Same as [`delete_contacts`] for any list kind.
///
/// Row ids of another kind are skipped, so an email row can never empty
/// the phone list of its contact.
pub fn remove_items<S: AsRef<str>>(
    store: &mut ContactStore,
    source: &mut dyn ContactSource,
    ids: &[S],
    kind: SubItemKind,
) -> CleanerResult<RemovalPlan> {
    if !source.access(AccessKind::Write)?.is_granted() {
        warn!("contacts write access is not granted");
        store.set_status(FetchStatus::Error);
        return Err(CleanerError::AccessDenied);
    }

    let selection = select_refs(ids, kind);
    let plan = plan_removal(store.contacts(), &selection, kind);

    let updates: Vec<ContactUpdate> = plan.updates.iter().map(ContactUpdate::from).collect();
    source.persist_contacts(&updates, &plan.deleted_ids)?;
    info!(
        kind = %kind,
        updated = plan.updates.len(),
        deleted = plan.deleted_ids.len(),
        "removed selected contact items"
    );

    fetch_contacts(store, source)?;
    Ok(plan)
}

/// Groups `ids` by contact, keeping bare ids and row ids of `kind` only.
pub fn select_refs<S: AsRef<str>>(ids: &[S], kind: SubItemKind) -> Vec<UnflattenedContact> {
    let refs = ids.iter().map(|s| ContactRef::parse(s.as_ref())).filter(|r| match r.kind() {
        Some(other) if other != kind => {
            debug!(id = %r, expected = %kind, "skipping row id of another kind");
            false
        }
        _ => true,
    });
    flatten_queries::unflatten_refs(refs)
}
