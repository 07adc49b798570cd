pub mod contact_repo;
pub mod schema;
pub mod sqlite_source;

pub use sqlite_source::SqliteSource;
