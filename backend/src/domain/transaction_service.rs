//! Transaction service domain logic for the expense tracker.
//!
//! Owns entry validation (amount, category-per-type, description length),
//! persistence, budget ledger upkeep, and data-changed event publication.
//! The aggregation engine receives its input from here and never validates
//! records itself.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use tracing::info;

use crate::domain::events::{DataChanged, EventBus};
use crate::domain::models::transaction::Transaction as DomainTransaction;
use crate::domain::profile_service::ProfileService;
use crate::domain::reporting::ReportConfig;
use crate::io::rest::mappers::transaction_mapper::TransactionMapper;
use crate::storage::{Connection, TransactionStorage};
use shared::{
    CreateTransactionRequest, DeleteTransactionsRequest, DeleteTransactionsResponse,
    PaginationInfo, Transaction as SharedTransaction, TransactionListRequest,
    TransactionListResponse, TransactionType,
};

const MAX_DESCRIPTION_LENGTH: usize = 256;
const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Clone)]
pub struct TransactionService<C: Connection> {
    transaction_repository: C::TransactionRepository,
    profile_service: ProfileService<C>,
    config: Arc<ReportConfig>,
    events: EventBus,
}

impl<C: Connection> TransactionService<C> {
    pub fn new(
        connection: Arc<C>,
        profile_service: ProfileService<C>,
        config: Arc<ReportConfig>,
        events: EventBus,
    ) -> Self {
        Self {
            transaction_repository: connection.create_transaction_repository(),
            profile_service,
            config,
            events,
        }
    }

    pub async fn create_transaction(
        &self,
        request: CreateTransactionRequest,
    ) -> Result<SharedTransaction> {
        if request.user_id.is_empty() {
            return Err(anyhow!("User ID must not be empty"));
        }
        if !request.amount.is_finite() || request.amount <= 0.0 {
            return Err(anyhow!("Amount must be a positive number"));
        }
        if request.description.len() > MAX_DESCRIPTION_LENGTH {
            return Err(anyhow!(
                "Description must be at most {} characters",
                MAX_DESCRIPTION_LENGTH
            ));
        }
        if !self
            .config
            .is_valid_category(request.transaction_type, &request.category)
        {
            return Err(anyhow!(
                "Unknown {} category: {}",
                request.transaction_type,
                request.category
            ));
        }

        let now_millis = next_creation_timestamp()?;
        let transaction_id =
            SharedTransaction::generate_id(request.transaction_type, now_millis);
        let transaction_date = request
            .date
            .unwrap_or_else(|| Local::now().date_naive());

        let domain_transaction = DomainTransaction {
            id: transaction_id,
            user_id: request.user_id.clone(),
            date: transaction_date,
            description: request.description,
            amount: request.amount,
            category: request.category,
            transaction_type: TransactionMapper::to_domain_type(request.transaction_type),
        };

        self.transaction_repository
            .store_transaction(&domain_transaction)
            .await?;

        self.profile_service
            .apply_transaction(
                &request.user_id,
                domain_transaction.transaction_type,
                domain_transaction.amount,
            )
            .await?;

        info!(
            "Created {} transaction {} for user {}",
            domain_transaction.transaction_type.as_str(),
            domain_transaction.id,
            request.user_id
        );

        self.events.publish(DataChanged::TransactionCreated {
            user_id: request.user_id,
            transaction_id: domain_transaction.id.clone(),
        });

        Ok(TransactionMapper::to_dto(domain_transaction))
    }

    pub async fn list_transactions(
        &self,
        request: TransactionListRequest,
    ) -> Result<TransactionListResponse> {
        if let (Some(start), Some(end)) = (request.start_date, request.end_date) {
            if end < start {
                return Err(anyhow!("Invalid date range: {} is after {}", start, end));
            }
        }

        let limit = request.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
        // Query one extra record to determine if there are more results
        let query_limit = limit + 1;

        let mut db_transactions = self
            .transaction_repository
            .list_transactions(
                &request.user_id,
                Some(query_limit),
                request.after,
                request.start_date,
                request.end_date,
            )
            .await?;

        let has_more = db_transactions.len() > limit as usize;
        if has_more {
            db_transactions.truncate(limit as usize);
        }

        let next_cursor = if has_more {
            db_transactions.last().map(|t| t.id.clone())
        } else {
            None
        };

        let dto_transactions = db_transactions
            .into_iter()
            .map(TransactionMapper::to_dto)
            .collect();

        Ok(TransactionListResponse {
            transactions: dto_transactions,
            pagination: PaginationInfo {
                has_more,
                next_cursor,
            },
        })
    }

    /// Fetch every transaction inside an inclusive date range, oldest first.
    /// Filtering happens on a structured date range, never on formatted date
    /// strings.
    pub async fn transactions_in_range(
        &self,
        user_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<SharedTransaction>> {
        let transactions = self
            .transaction_repository
            .list_transactions_in_range(user_id, start_date, end_date)
            .await?;

        Ok(transactions
            .into_iter()
            .map(TransactionMapper::to_dto)
            .collect())
    }

    /// Fetch one month's transactions of a given type, for the report views
    pub async fn transactions_for_month(
        &self,
        user_id: &str,
        transaction_type: TransactionType,
        month: u32,
        year: i32,
    ) -> Result<Vec<SharedTransaction>> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| anyhow!("Invalid month: {}/{}", month, year))?;
        let last = first
            .checked_add_months(chrono::Months::new(1))
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| anyhow!("Invalid month: {}/{}", month, year))?;

        let transactions = self.transactions_in_range(user_id, first, last).await?;

        Ok(transactions
            .into_iter()
            .filter(|t| t.transaction_type == transaction_type)
            .collect())
    }

    /// Fetch a user's entire transaction history, newest first
    pub async fn all_transactions(&self, user_id: &str) -> Result<Vec<SharedTransaction>> {
        let transactions = self
            .transaction_repository
            .list_transactions(user_id, None, None, None, None)
            .await?;

        Ok(transactions
            .into_iter()
            .map(TransactionMapper::to_dto)
            .collect())
    }

    pub async fn delete_transactions(
        &self,
        request: DeleteTransactionsRequest,
    ) -> Result<DeleteTransactionsResponse> {
        let existing_ids = self
            .transaction_repository
            .check_transactions_exist(&request.user_id, &request.transaction_ids)
            .await?;
        let not_found_ids: Vec<String> = request
            .transaction_ids
            .iter()
            .filter(|id| !existing_ids.contains(id))
            .cloned()
            .collect();

        // Load the doomed transactions first; their amounts are needed to
        // unwind the budget ledger after the rows are gone
        let mut doomed = Vec::new();
        for id in &existing_ids {
            if let Some(transaction) = self
                .transaction_repository
                .get_transaction(&request.user_id, id)
                .await?
            {
                doomed.push(transaction);
            }
        }

        let deleted_count = if !existing_ids.is_empty() {
            self.transaction_repository
                .delete_transactions(&request.user_id, &existing_ids)
                .await?
        } else {
            0
        };

        for transaction in &doomed {
            self.profile_service
                .revert_transaction(
                    &request.user_id,
                    transaction.transaction_type,
                    transaction.amount,
                )
                .await?;
        }

        if deleted_count > 0 {
            self.events.publish(DataChanged::TransactionsDeleted {
                user_id: request.user_id.clone(),
                transaction_ids: existing_ids,
            });
        }

        let success_message = match deleted_count {
            0 => "No transactions were deleted".to_string(),
            1 => "1 transaction deleted successfully".to_string(),
            n => format!("{} transactions deleted successfully", n),
        };

        Ok(DeleteTransactionsResponse {
            deleted_count: deleted_count as usize,
            success_message,
            not_found_ids,
        })
    }
}

/// Millisecond timestamp for new transaction IDs, forced strictly increasing
/// within the process so back-to-back creates never collide on an ID.
fn next_creation_timestamp() -> Result<u64> {
    static LAST: AtomicU64 = AtomicU64::new(0);

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;
    let mut prev = LAST.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(prev + 1);
        match LAST.compare_exchange(prev, candidate, Ordering::SeqCst, Ordering::Relaxed) {
            Ok(_) => return Ok(candidate),
            Err(actual) => prev = actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteConnection;

    fn create_request(
        transaction_type: TransactionType,
        category: &str,
        amount: f64,
        date: &str,
    ) -> CreateTransactionRequest {
        CreateTransactionRequest {
            user_id: "test_user".to_string(),
            transaction_type,
            category: category.to_string(),
            amount,
            description: "Test transaction".to_string(),
            date: Some(date.parse().unwrap()),
        }
    }

    async fn create_test_service() -> (TransactionService<SqliteConnection>, EventBus) {
        let connection = Arc::new(SqliteConnection::init_test().await.unwrap());
        let events = EventBus::default();
        let profile_service = ProfileService::new(connection.clone(), events.clone());
        let service = TransactionService::new(
            connection,
            profile_service,
            Arc::new(ReportConfig::default()),
            events.clone(),
        );
        (service, events)
    }

    #[tokio::test]
    async fn test_create_transaction_basic() {
        let (service, _) = create_test_service().await;

        let transaction = service
            .create_transaction(create_request(
                TransactionType::Expense,
                "Food",
                12.5,
                "2024-03-05",
            ))
            .await
            .unwrap();

        assert_eq!(transaction.amount, 12.5);
        assert_eq!(transaction.category, "Food");
        assert_eq!(transaction.transaction_type, TransactionType::Expense);
        assert_eq!(transaction.date, "2024-03-05".parse().unwrap());
        assert!(transaction.id.starts_with("transaction::expense::"));
    }

    #[tokio::test]
    async fn test_create_transaction_updates_budget_ledger() {
        let (service, _) = create_test_service().await;

        service
            .profile_service
            .set_budget(shared::SetBudgetRequest {
                user_id: "test_user".to_string(),
                amount: 100.0,
            })
            .await
            .unwrap();

        service
            .create_transaction(create_request(
                TransactionType::Expense,
                "Food",
                30.0,
                "2024-03-05",
            ))
            .await
            .unwrap();
        service
            .create_transaction(create_request(
                TransactionType::Income,
                "Salary",
                500.0,
                "2024-03-06",
            ))
            .await
            .unwrap();

        let profile = service.profile_service.get_profile("test_user").await.unwrap();
        assert_eq!(profile.expense_total, 30.0);
        assert_eq!(profile.budget_left, 70.0);
        assert_eq!(profile.income_total, 500.0);
    }

    #[tokio::test]
    async fn test_create_transaction_validation() {
        let (service, _) = create_test_service().await;

        // Non-positive and non-finite amounts
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = service
                .create_transaction(create_request(
                    TransactionType::Expense,
                    "Food",
                    amount,
                    "2024-03-05",
                ))
                .await;
            assert!(result.is_err(), "amount {} should be rejected", amount);
        }

        // Category must match the transaction type
        let result = service
            .create_transaction(create_request(
                TransactionType::Income,
                "Food",
                10.0,
                "2024-03-05",
            ))
            .await;
        assert!(result.is_err());

        // Description length cap
        let mut request =
            create_request(TransactionType::Expense, "Food", 10.0, "2024-03-05");
        request.description = "x".repeat(257);
        assert!(service.create_transaction(request).await.is_err());

        // Empty description is allowed
        let mut request =
            create_request(TransactionType::Expense, "Food", 10.0, "2024-03-05");
        request.description = String::new();
        assert!(service.create_transaction(request).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_transaction_publishes_event() {
        let (service, events) = create_test_service().await;
        let mut receiver = events.subscribe();

        let transaction = service
            .create_transaction(create_request(
                TransactionType::Expense,
                "Food",
                10.0,
                "2024-03-05",
            ))
            .await
            .unwrap();

        assert_eq!(
            receiver.recv().await.unwrap(),
            DataChanged::TransactionCreated {
                user_id: "test_user".to_string(),
                transaction_id: transaction.id,
            }
        );
    }

    #[tokio::test]
    async fn test_transaction_ids_are_unique() {
        let (service, _) = create_test_service().await;

        let mut ids = std::collections::HashSet::new();
        for _ in 0..10 {
            let transaction = service
                .create_transaction(create_request(
                    TransactionType::Expense,
                    "Food",
                    1.0,
                    "2024-03-05",
                ))
                .await
                .unwrap();
            assert!(ids.insert(transaction.id));
        }
    }

    #[tokio::test]
    async fn test_list_transactions_pagination() {
        let (service, _) = create_test_service().await;

        for day in 1..=5 {
            service
                .create_transaction(create_request(
                    TransactionType::Expense,
                    "Food",
                    1.0,
                    &format!("2024-03-{:02}", day),
                ))
                .await
                .unwrap();
        }

        let first_page = service
            .list_transactions(TransactionListRequest {
                user_id: "test_user".to_string(),
                after: None,
                limit: Some(2),
                start_date: None,
                end_date: None,
            })
            .await
            .unwrap();

        assert_eq!(first_page.transactions.len(), 2);
        assert!(first_page.pagination.has_more);
        let cursor = first_page.pagination.next_cursor.clone().unwrap();
        assert_eq!(cursor, first_page.transactions.last().unwrap().id);

        // Newest first
        assert_eq!(
            first_page.transactions[0].date,
            "2024-03-05".parse().unwrap()
        );

        let second_page = service
            .list_transactions(TransactionListRequest {
                user_id: "test_user".to_string(),
                after: Some(cursor.clone()),
                limit: Some(10),
                start_date: None,
                end_date: None,
            })
            .await
            .unwrap();

        assert_eq!(second_page.transactions.len(), 3);
        assert!(!second_page.pagination.has_more);
        assert!(second_page.transactions.iter().all(|t| t.id != cursor));
    }

    #[tokio::test]
    async fn test_list_transactions_date_range() {
        let (service, _) = create_test_service().await;

        for date in ["2024-02-28", "2024-03-10", "2024-04-01"] {
            service
                .create_transaction(create_request(
                    TransactionType::Expense,
                    "Food",
                    1.0,
                    date,
                ))
                .await
                .unwrap();
        }

        let march = service
            .list_transactions(TransactionListRequest {
                user_id: "test_user".to_string(),
                after: None,
                limit: None,
                start_date: Some("2024-03-01".parse().unwrap()),
                end_date: Some("2024-03-31".parse().unwrap()),
            })
            .await
            .unwrap();
        assert_eq!(march.transactions.len(), 1);

        let inverted = service
            .list_transactions(TransactionListRequest {
                user_id: "test_user".to_string(),
                after: None,
                limit: None,
                start_date: Some("2024-03-31".parse().unwrap()),
                end_date: Some("2024-03-01".parse().unwrap()),
            })
            .await;
        assert!(inverted.is_err());
    }

    #[tokio::test]
    async fn test_transactions_for_month_filters_type_and_month() {
        let (service, _) = create_test_service().await;

        service
            .create_transaction(create_request(
                TransactionType::Expense,
                "Food",
                10.0,
                "2024-03-05",
            ))
            .await
            .unwrap();
        service
            .create_transaction(create_request(
                TransactionType::Income,
                "Salary",
                500.0,
                "2024-03-06",
            ))
            .await
            .unwrap();
        service
            .create_transaction(create_request(
                TransactionType::Expense,
                "Debt",
                20.0,
                "2024-04-01",
            ))
            .await
            .unwrap();

        let march_expenses = service
            .transactions_for_month("test_user", TransactionType::Expense, 3, 2024)
            .await
            .unwrap();
        assert_eq!(march_expenses.len(), 1);
        assert_eq!(march_expenses[0].category, "Food");

        let march_income = service
            .transactions_for_month("test_user", TransactionType::Income, 3, 2024)
            .await
            .unwrap();
        assert_eq!(march_income.len(), 1);

        assert!(service
            .transactions_for_month("test_user", TransactionType::Expense, 13, 2024)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_delete_transactions_reverts_budget() {
        let (service, events) = create_test_service().await;

        let transaction = service
            .create_transaction(create_request(
                TransactionType::Expense,
                "Food",
                40.0,
                "2024-03-05",
            ))
            .await
            .unwrap();
        let mut receiver = events.subscribe();

        let response = service
            .delete_transactions(DeleteTransactionsRequest {
                user_id: "test_user".to_string(),
                transaction_ids: vec![transaction.id.clone(), "missing".to_string()],
            })
            .await
            .unwrap();

        assert_eq!(response.deleted_count, 1);
        assert_eq!(response.not_found_ids, vec!["missing".to_string()]);

        let profile = service.profile_service.get_profile("test_user").await.unwrap();
        assert_eq!(profile.expense_total, 0.0);
        assert_eq!(profile.budget_left, 0.0);

        assert_eq!(
            receiver.recv().await.unwrap(),
            DataChanged::TransactionsDeleted {
                user_id: "test_user".to_string(),
                transaction_ids: vec![transaction.id],
            }
        );
    }

    #[tokio::test]
    async fn test_delete_transactions_empty_list() {
        let (service, _) = create_test_service().await;

        let response = service
            .delete_transactions(DeleteTransactionsRequest {
                user_id: "test_user".to_string(),
                transaction_ids: vec![],
            })
            .await
            .unwrap();

        assert_eq!(response.deleted_count, 0);
        assert_eq!(response.success_message, "No transactions were deleted");
    }
}
