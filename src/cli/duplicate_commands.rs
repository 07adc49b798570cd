use clap::ValueEnum;

use crate::cli::context::CLIContext;
use crate::model::*;
use crate::ops::cleaner_ops;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DuplicateBy {
    Name,
    Phone,
}

pub fn duplicates(ctx: &CLIContext, by: DuplicateBy, json: bool) {
    match by {
        DuplicateBy::Name => {
            let clusters = ctx.store.duplicate_name_contacts();
            if json {
                ctx.print_json(clusters);
                return;
            }
            if clusters.is_empty() {
                println!("No contacts share a name.");
                return;
            }
            println!("Contacts sharing a name ({} groups):", clusters.len());
            for cluster in clusters {
                println!();
                println!("  {}", CLIContext::name_of(&cluster[0]));
                for contact in cluster {
                    let phones: Vec<&str> = contact
                        .phone_numbers
                        .iter()
                        .filter_map(|p| p.value())
                        .collect();
                    println!("    [{}] {}", contact.id, phones.join(", "));
                }
            }
        }
        DuplicateBy::Phone => {
            let clusters = ctx.store.duplicate_phone_contacts();
            if json {
                ctx.print_json(clusters);
                return;
            }
            if clusters.is_empty() {
                println!("No phone number is shared by two entries.");
                return;
            }
            println!("Entries sharing a phone number ({} groups):", clusters.len());
            for cluster in clusters {
                println!();
                println!("  {}", cluster[0].item.value().unwrap_or(""));
                for row in cluster {
                    println!("    [{}] {}", row.id, CLIContext::name_of(&row.contact));
                }
            }
        }
    }
}

/// Deletes the given phone-number rows or whole contacts.
pub fn delete(ctx: &mut CLIContext, ids: &[String]) {
    match cleaner_ops::delete_contacts(&mut ctx.store, &mut ctx.source, ids) {
        Ok(plan) if plan.is_empty() => println!("Nothing matched; no changes made."),
        Ok(plan) => {
            println!(
                "Updated {} contact(s), deleted {} contact(s).",
                plan.updates.len(),
                plan.deleted_ids.len()
            );
            for id in &plan.deleted_ids {
                println!("  deleted {}", id);
            }
        }
        Err(e) => ctx.print_error(&e),
    }
}
