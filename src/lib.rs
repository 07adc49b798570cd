pub mod error;
pub mod validation;
pub mod model;
pub mod queries;
pub mod source;
pub mod store;
pub mod ops;
pub mod db;
pub mod migrate;
pub mod cli;
