//! SQLite storage backend.
//!
//! Stands in for the original application's remote document store behind the
//! repository traits, so the domain layer never touches SQL directly.

pub mod connection;
pub mod profile_repository;
pub mod transaction_repository;

pub use connection::SqliteConnection;
pub use profile_repository::ProfileRepository;
pub use transaction_repository::TransactionRepository;
