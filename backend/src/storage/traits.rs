//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::models::profile::UserProfile;
use crate::domain::models::transaction::Transaction;

/// Trait defining the interface for transaction storage operations
///
/// This trait abstracts away the specific storage implementation details,
/// allowing the domain layer to work with different storage backends
/// without modification.
#[async_trait]
pub trait TransactionStorage: Send + Sync {
    /// Store a new transaction
    async fn store_transaction(&self, transaction: &Transaction) -> Result<()>;

    /// Retrieve a specific transaction by ID
    async fn get_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Option<Transaction>>;

    /// List transactions with pagination support and optional date filtering.
    /// Returns transactions ordered by date descending (most recent first);
    /// `after` is an exclusive cursor naming the transaction to resume after.
    async fn list_transactions(
        &self,
        user_id: &str,
        limit: Option<u32>,
        after: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Transaction>>;

    /// List all transactions inside an inclusive date range, in chronological
    /// order (oldest first)
    async fn list_transactions_in_range(
        &self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Transaction>>;

    /// Delete multiple transactions.
    /// Returns the number of transactions actually deleted
    async fn delete_transactions(&self, user_id: &str, transaction_ids: &[String]) -> Result<u32>;

    /// Check which of the given IDs exist for a specific user
    async fn check_transactions_exist(
        &self,
        user_id: &str,
        transaction_ids: &[String],
    ) -> Result<Vec<String>>;
}

/// Trait defining the interface for user profile storage operations
#[async_trait]
pub trait ProfileStorage: Send + Sync {
    /// Store a new profile
    async fn store_profile(&self, profile: &UserProfile) -> Result<()>;

    /// Retrieve a profile by user ID
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>>;

    /// Update an existing profile
    async fn update_profile(&self, profile: &UserProfile) -> Result<()>;
}

/// Trait defining the interface for storage connections
///
/// Abstracts away the specific connection type and provides factory methods
/// for creating repositories, so the domain layer can work with any storage
/// backend without knowing the implementation details.
pub trait Connection: Send + Sync + Clone {
    /// The type of TransactionStorage this connection creates
    type TransactionRepository: TransactionStorage + Clone;

    /// The type of ProfileStorage this connection creates
    type ProfileRepository: ProfileStorage + Clone;

    /// Create a new transaction repository for this connection
    fn create_transaction_repository(&self) -> Self::TransactionRepository;

    /// Create a new profile repository for this connection
    fn create_profile_repository(&self) -> Self::ProfileRepository;
}
