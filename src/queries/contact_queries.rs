use crate::model::Contact;

/// Orders contacts by `"<first> <second>"`, ignoring case. Stable, so
/// contacts with equal names keep their source order.
pub fn sort_by_display_name(contacts: &mut [Contact]) {
    contacts.sort_by_cached_key(|c| c.display_name().to_lowercase());
}

/// Case-insensitive substring match on the display name.
pub fn find_by_name<'a>(contacts: &'a [Contact], query: &str) -> Vec<&'a Contact> {
    let lower = query.trim().to_lowercase();
    contacts
        .iter()
        .filter(|c| c.display_name().to_lowercase().contains(&lower))
        .collect()
}
