/// Database module for clipboard-manager
///
/// Handles all history persistence using SQLite and sqlx.

pub mod connection;
pub mod models;
pub mod queries;

pub use connection::{Database, StoreStats};
pub use models::*;
