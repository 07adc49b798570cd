pub mod context;
pub mod contact_commands;
pub mod duplicate_commands;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::db::SqliteSource;
use crate::error::{CleanerError, CleanerResult};
use crate::model::SubItemKind;
use context::CLIContext;
use duplicate_commands::DuplicateBy;

const DEFAULT_DB_DIR: &str = ".data";
const DEFAULT_DB_FILE: &str = "contacts.db";

#[derive(Debug, Parser)]
#[command(
    name = "contacts-cleaner",
    version,
    about = "Browse contacts and clean up duplicate names and phone numbers"
)]
pub struct Cli {
    /// Database file path (default: .data/contacts.db)
    #[arg(short = 'f', long = "file", env = "CONTACTS_DB", global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every contact with its phone numbers, emails and URLs
    List {
        /// Only contacts whose name contains this text
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show one row per phone number, email or URL address
    Flatten {
        /// phoneNumbers, emails or urlAddresses
        #[arg(long, default_value = "phoneNumbers", value_parser = parse_kind)]
        kind: SubItemKind,
        #[arg(long)]
        json: bool,
    },
    /// Show groups of probable duplicates
    Duplicates {
        #[arg(long, value_enum, default_value_t = DuplicateBy::Name)]
        by: DuplicateBy,
        #[arg(long)]
        json: bool,
    },
    /// Delete phone-number rows (as printed by `flatten`) or whole contacts by id
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Import contacts from a JSON array into a new database
    Import { json_path: PathBuf },
}

fn parse_kind(s: &str) -> Result<SubItemKind, String> {
    SubItemKind::parse(s).map_err(|e| e.to_string())
}

pub fn run(cli: Cli) -> CleanerResult<()> {
    let db_path = match cli.file {
        Some(path) => path,
        None => default_db_path()?,
    };
    debug!(path = %db_path.display(), "using contacts database");

    if let Command::Import { json_path } = &cli.command {
        return import(json_path, &db_path);
    }

    let mut ctx = CLIContext::load(SqliteSource::open(&db_path)?)?;
    match cli.command {
        Command::List { name, json } => contact_commands::list(&ctx, name.as_deref(), json),
        Command::Flatten { kind, json } => contact_commands::flatten(&ctx, kind, json),
        Command::Duplicates { by, json } => duplicate_commands::duplicates(&ctx, by, json),
        Command::Delete { ids } => duplicate_commands::delete(&mut ctx, &ids),
        Command::Import { .. } => {}
    }
    Ok(())
}

fn default_db_path() -> CleanerResult<PathBuf> {
    let dir = PathBuf::from(DEFAULT_DB_DIR);
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir.join(DEFAULT_DB_FILE))
}

fn import(json_path: &Path, db_path: &Path) -> CleanerResult<()> {
    if db_path.exists() {
        return Err(CleanerError::AlreadyExists {
            entity_type: "Database file".into(),
            identifier: db_path.display().to_string(),
        });
    }

    println!("Importing from {}...", json_path.display());
    let stats = crate::migrate::import_json(json_path, db_path)?;
    println!("Import complete!");
    println!("  Contacts: {}", stats.contacts);
    println!("  Phone numbers: {}", stats.phone_numbers);
    println!("  Emails: {}", stats.emails);
    println!("  URL addresses: {}", stats.url_addresses);
    Ok(())
}
