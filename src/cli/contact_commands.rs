use crate::cli::context::CLIContext;
use crate::model::*;
use crate::queries::contact_queries;
use crate::queries::flatten_queries::{self, FlatRows};

pub fn list(ctx: &CLIContext, name: Option<&str>, json: bool) {
    let contacts: Vec<&Contact> = match name {
        Some(query) => contact_queries::find_by_name(ctx.contacts(), query),
        None => ctx.contacts().iter().collect(),
    };
    if json {
        ctx.print_json(&contacts);
        return;
    }
    if contacts.is_empty() {
        match name {
            Some(query) => println!("No contact found matching '{}'", query),
            None => println!("No contacts yet. Use 'import' to load some."),
        }
        return;
    }

    println!("Contacts ({}):", contacts.len());
    println!();
    for contact in &contacts {
        println!("  {}  [{}]", CLIContext::name_of(contact), contact.id);
        for phone in &contact.phone_numbers {
            println!("      phone: {}", CLIContext::format_item(phone.value(), phone.label()));
        }
        for email in &contact.emails {
            println!("      email: {}", CLIContext::format_item(email.value(), email.label()));
        }
        for url in &contact.url_addresses {
            println!("      url:   {}", CLIContext::format_item(url.value(), url.label()));
        }
    }
}

pub fn flatten(ctx: &CLIContext, kind: SubItemKind, json: bool) {
    let rows = flatten_queries::flatten_by(ctx.contacts(), kind);
    if json {
        ctx.print_json(&rows);
        return;
    }
    if rows.is_empty() {
        println!("No {} found.", kind.display_name().to_lowercase());
        return;
    }

    println!("{} ({}):", kind.display_name(), rows.len());
    println!();
    match &rows {
        FlatRows::PhoneNumbers(rows) => print_rows(rows),
        FlatRows::Emails(rows) => print_rows(rows),
        FlatRows::UrlAddresses(rows) => print_rows(rows),
    }
}

fn print_rows<I: SubItem>(rows: &[FlattenContact<I>]) {
    for row in rows {
        println!(
            "  {:<40} {}  {}",
            row.id.to_string(),
            CLIContext::name_of(&row.contact),
            CLIContext::format_item(row.item.value(), row.item.label())
        );
    }
}
