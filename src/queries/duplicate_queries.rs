use std::collections::HashMap;

use crate::model::{Contact, FlatPhoneContact};
use crate::validation::is_unset;

/// Extra filter applied after blank entries are dropped. Receives the entry
/// and its index among the entries that survived that first filter.
pub type Predicate<'a, T> = &'a dyn Fn(&T, usize) -> bool;

const PHONE_PUNCTUATION: &[char] = &['+', '-', '(', ')', ' '];

/// Grouping key for name duplicates, or `None` when both name parts are blank.
/// Each part is trimmed before joining so stray spaces never split a group.
pub fn name_key(contact: &Contact) -> Option<String> {
    let first = contact.first_name.as_deref();
    let second = contact.second_name.as_deref();
    if is_unset(first) && is_unset(second) {
        return None;
    }
    let joined = [first, second]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        return None;
    }
    Some(joined.to_lowercase())
}

/// Grouping key for phone duplicates, or `None` for a blank number.
/// Only `+ - ( )` and spaces are stripped; other punctuation is significant.
pub fn phone_key(phone_number: Option<&str>) -> Option<String> {
    if is_unset(phone_number) {
        return None;
    }
    let normalized = phone_number.unwrap_or("").trim().to_lowercase();
    Some(normalized.replace(PHONE_PUNCTUATION, ""))
}

/// Contacts sharing a normalized full name. Every group has at least two members.
pub fn find_duplicate_name_contacts(
    contacts: &[Contact],
    predicate: Option<Predicate<'_, Contact>>,
) -> Vec<Vec<Contact>> {
    group_duplicates(contacts, predicate, name_key)
}

/// Phone-flattened rows sharing a normalized number. Every group has at least two members.
pub fn find_duplicate_phone_contacts(
    rows: &[FlatPhoneContact],
    predicate: Option<Predicate<'_, FlatPhoneContact>>,
) -> Vec<Vec<FlatPhoneContact>> {
    group_duplicates(rows, predicate, |row| {
        phone_key(row.item.phone_number.as_deref())
    })
}

fn group_duplicates<T: Clone>(
    items: &[T],
    predicate: Option<Predicate<'_, T>>,
    key_of: impl Fn(&T) -> Option<String>,
) -> Vec<Vec<T>> {
    let mut groups: Vec<Vec<T>> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    let keyed = items
        .iter()
        .filter_map(|item| key_of(item).map(|key| (key, item)))
        .enumerate()
        .filter(|(index, (_, item))| predicate.map_or(true, |p| p(*item, *index)));

    for (_, (key, item)) in keyed {
        match slots.get(&key) {
            Some(&slot) => groups[slot].push(item.clone()),
            None => {
                slots.insert(key, groups.len());
                groups.push(vec![item.clone()]);
            }
        }
    }

    groups.retain(|group| group.len() > 1);
    groups
}
