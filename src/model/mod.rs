pub mod ids;
pub mod contact;
pub mod flat;
pub mod update;

// Re-exports for convenience
pub use ids::Id;
pub use contact::{Contact, ContactEmail, ContactPhoneNumber, ContactUrlAddress, SubItem, SubItemKind};
pub use flat::{ContactRef, FlatEmailContact, FlatPhoneContact, FlatUrlContact, FlattenContact};
pub use update::{ContactUpdate, ItemUpdate};
