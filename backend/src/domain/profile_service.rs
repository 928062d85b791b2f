//! User profile and budget ledger logic.
//!
//! The profile carries the denormalized budget ledger the original screens
//! show at a glance: budget_total, budget_left, income_total, expense_total.
//! The transaction service calls [`ProfileService::apply_transaction`] and
//! [`ProfileService::revert_transaction`] so the ledger moves in step with
//! transaction mutations.

use anyhow::{anyhow, Result};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::domain::events::{DataChanged, EventBus};
use crate::domain::models::profile::UserProfile as DomainProfile;
use crate::domain::models::transaction::TransactionType;
use crate::io::rest::mappers::profile_mapper::ProfileMapper;
use crate::storage::{Connection, ProfileStorage};
use shared::{SetBudgetRequest, SetPhotoRequest, UpdateProfileRequest, UserProfile};

#[derive(Clone)]
pub struct ProfileService<C: Connection> {
    profile_repository: C::ProfileRepository,
    events: EventBus,
}

impl<C: Connection> ProfileService<C> {
    pub fn new(connection: Arc<C>, events: EventBus) -> Self {
        Self {
            profile_repository: connection.create_profile_repository(),
            events,
        }
    }

    /// Fetch a user's profile, creating a blank one on first access
    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile> {
        let profile = self.get_or_create(user_id).await?;
        Ok(ProfileMapper::to_dto(profile))
    }

    /// Update the editable identity fields; absent fields are left unchanged
    pub async fn update_profile(&self, request: UpdateProfileRequest) -> Result<UserProfile> {
        let mut profile = self.get_or_create(&request.user_id).await?;

        if let Some(name) = request.name {
            profile.name = name;
        }
        if let Some(age) = request.age {
            profile.age = Some(age);
        }
        if let Some(job) = request.job {
            profile.job = job;
        }
        if let Some(address) = request.address {
            profile.address = address;
        }
        profile.updated_at = Utc::now().to_rfc3339();

        self.profile_repository.update_profile(&profile).await?;
        info!("Updated profile for user {}", profile.id);
        Ok(ProfileMapper::to_dto(profile))
    }

    /// Set the budget ceiling and recompute what is left of it
    pub async fn set_budget(&self, request: SetBudgetRequest) -> Result<UserProfile> {
        if !request.amount.is_finite() || request.amount < 0.0 {
            return Err(anyhow!("Budget amount must be a non-negative number"));
        }

        let mut profile = self.get_or_create(&request.user_id).await?;
        profile.budget_total = request.amount;
        profile.budget_left = request.amount - profile.expense_total;
        profile.updated_at = Utc::now().to_rfc3339();

        self.profile_repository.update_profile(&profile).await?;
        info!(
            "Budget for user {} set to {:.2} ({:.2} left)",
            profile.id, profile.budget_total, profile.budget_left
        );

        self.events.publish(DataChanged::BudgetUpdated {
            user_id: profile.id.clone(),
        });

        Ok(ProfileMapper::to_dto(profile))
    }

    /// Record the URL of an externally uploaded profile photo
    pub async fn set_photo_url(&self, request: SetPhotoRequest) -> Result<UserProfile> {
        if request.photo_url.is_empty() {
            return Err(anyhow!("Photo URL must not be empty"));
        }

        let mut profile = self.get_or_create(&request.user_id).await?;
        profile.photo_url = Some(request.photo_url);
        profile.updated_at = Utc::now().to_rfc3339();

        self.profile_repository.update_profile(&profile).await?;
        Ok(ProfileMapper::to_dto(profile))
    }

    /// Fold a newly created transaction into the budget ledger
    pub async fn apply_transaction(
        &self,
        user_id: &str,
        transaction_type: TransactionType,
        amount: f64,
    ) -> Result<()> {
        let mut profile = self.get_or_create(user_id).await?;

        match transaction_type {
            TransactionType::Expense => {
                profile.expense_total += amount;
                profile.budget_left -= amount;
            }
            TransactionType::Income => {
                profile.income_total += amount;
            }
        }
        profile.updated_at = Utc::now().to_rfc3339();

        self.profile_repository.update_profile(&profile).await?;
        Ok(())
    }

    /// Undo a deleted transaction's effect on the budget ledger
    pub async fn revert_transaction(
        &self,
        user_id: &str,
        transaction_type: TransactionType,
        amount: f64,
    ) -> Result<()> {
        let mut profile = self.get_or_create(user_id).await?;

        match transaction_type {
            TransactionType::Expense => {
                profile.expense_total -= amount;
                profile.budget_left += amount;
            }
            TransactionType::Income => {
                profile.income_total -= amount;
            }
        }
        profile.updated_at = Utc::now().to_rfc3339();

        self.profile_repository.update_profile(&profile).await?;
        Ok(())
    }

    async fn get_or_create(&self, user_id: &str) -> Result<DomainProfile> {
        if user_id.is_empty() {
            return Err(anyhow!("User ID must not be empty"));
        }

        if let Some(profile) = self.profile_repository.get_profile(user_id).await? {
            return Ok(profile);
        }

        let profile = DomainProfile::empty(user_id, &Utc::now().to_rfc3339());
        self.profile_repository.store_profile(&profile).await?;
        info!("Created blank profile for user {}", user_id);
        Ok(profile)
    }
}
