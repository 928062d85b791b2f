//! Storage layer: repository traits and their SQLite implementation.

pub mod sqlite;
pub mod traits;

pub use sqlite::SqliteConnection;
pub use traits::{Connection, ProfileStorage, TransactionStorage};
