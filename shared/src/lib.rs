use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single recorded income or expense event.
///
/// Transaction ID format: "transaction::<income|expense>::epoch_millis"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// ID of the user this transaction belongs to
    pub user_id: String,
    /// Calendar date of the transaction (day granularity)
    pub date: NaiveDate,
    /// Free-text description, may be empty (max 256 characters)
    pub description: String,
    /// Transaction amount, always non-negative
    pub amount: f64,
    /// Category label, one of the enumerated set for the transaction type
    pub category: String,
    pub transaction_type: TransactionType,
}

/// Whether a transaction adds to or subtracts from the user's funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    /// Lowercase tag used inside transaction IDs
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Expense => write!(f, "Expense"),
            TransactionType::Income => write!(f, "Income"),
        }
    }
}

impl Transaction {
    /// Generate a transaction ID from the type and creation timestamp
    pub fn generate_id(transaction_type: TransactionType, epoch_millis: u64) -> String {
        format!("transaction::{}::{}", transaction_type.as_str(), epoch_millis)
    }

    /// Parse a transaction ID into its type tag and creation timestamp
    pub fn parse_id(id: &str) -> Result<(TransactionType, u64), TransactionIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 3 || parts[0] != "transaction" {
            return Err(TransactionIdError::InvalidFormat);
        }

        let transaction_type = match parts[1] {
            "income" => TransactionType::Income,
            "expense" => TransactionType::Expense,
            _ => return Err(TransactionIdError::InvalidType),
        };

        let epoch_millis = parts[2]
            .parse::<u64>()
            .map_err(|_| TransactionIdError::InvalidTimestamp)?;

        Ok((transaction_type, epoch_millis))
    }

    /// Extract the creation timestamp from this transaction's ID
    pub fn extract_timestamp(&self) -> Result<u64, TransactionIdError> {
        Self::parse_id(&self.id).map(|(_, timestamp)| timestamp)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransactionIdError {
    #[error("Invalid transaction ID format")]
    InvalidFormat,
    #[error("Invalid transaction type")]
    InvalidType,
    #[error("Invalid timestamp in transaction ID")]
    InvalidTimestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub user_id: String,
    pub transaction_type: TransactionType,
    /// Category label; must belong to the set for the transaction type
    pub category: String,
    /// Positive amount
    pub amount: f64,
    /// Description, may be empty (max 256 characters)
    #[serde(default)]
    pub description: String,
    /// Optional date override; today is used if not provided
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionListRequest {
    pub user_id: String,
    /// Cursor for pagination - transaction ID to start after
    pub after: Option<String>,
    /// Maximum number of transactions to return
    pub limit: Option<u32>,
    /// Inclusive start of the date range filter
    pub start_date: Option<NaiveDate>,
    /// Inclusive end of the date range filter
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<Transaction>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteTransactionsRequest {
    pub user_id: String,
    pub transaction_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteTransactionsResponse {
    pub deleted_count: usize,
    pub success_message: String,
    pub not_found_ids: Vec<String>,
}

/// Per-category aggregate derived from a transaction list.
///
/// Created fresh on every aggregation; the `id` is unique per instance and
/// not stable across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: Uuid,
    /// Category label
    pub name: String,
    /// Sum of amounts over all transactions in this category
    pub total: f64,
    /// Number of transactions aggregated into this category
    pub count: usize,
    /// Share of the grand total, fixed-decimal with a trailing '%'
    pub percentage_label: String,
    /// Display color, stable per category name
    pub color: String,
}

/// One transaction's display fields inside a category group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub id: String,
    pub description: String,
    pub date: NaiveDate,
    pub amount: f64,
}

/// All transactions of one category, for the grouped list view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub name: String,
    pub entries: Vec<CategoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdownResponse {
    pub summaries: Vec<CategorySummary>,
    pub grand_total: f64,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroupsResponse {
    pub groups: Vec<CategoryGroup>,
}

/// Type of calendar day for explicit rendering logic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CalendarDayType {
    /// Empty padding day before the start of the month
    PaddingBefore,
    /// Actual day within the month
    MonthDay,
}

/// Represents a single day in the calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub day: u32,
    pub day_type: CalendarDayType,
    pub transactions: Vec<Transaction>,
    /// Sum of expense amounts on this day
    pub spent: f64,
    /// Sum of income amounts on this day
    pub received: f64,
}

/// Represents a calendar month with its associated transaction data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub month: u32,
    pub year: i32,
    pub days: Vec<CalendarDay>,
    /// Weekday of the first of the month (0 = Sunday, 1 = Monday, ...)
    pub first_day_of_week: u32,
}

/// Per-user record carrying identity fields and the budget ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: Option<u32>,
    pub job: String,
    pub address: String,
    /// URL of the profile photo, set after an external upload
    pub photo_url: Option<String>,
    /// Budget ceiling chosen by the user
    pub budget_total: f64,
    /// budget_total minus the running expense total
    pub budget_left: f64,
    /// Running sum of all income amounts
    pub income_total: f64,
    /// Running sum of all expense amounts
    pub expense_total: f64,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub user_id: String,
    pub name: Option<String>,
    pub age: Option<u32>,
    pub job: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetBudgetRequest {
    pub user_id: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetPhotoRequest {
    pub user_id: String,
    pub photo_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_transaction_id() {
        let income_id = Transaction::generate_id(TransactionType::Income, 1702516122000);
        assert_eq!(income_id, "transaction::income::1702516122000");

        let expense_id = Transaction::generate_id(TransactionType::Expense, 1702516125000);
        assert_eq!(expense_id, "transaction::expense::1702516125000");
    }

    #[test]
    fn test_parse_transaction_id() {
        let (tx_type, timestamp) =
            Transaction::parse_id("transaction::income::1702516122000").unwrap();
        assert_eq!(tx_type, TransactionType::Income);
        assert_eq!(timestamp, 1702516122000);

        let (tx_type, timestamp) =
            Transaction::parse_id("transaction::expense::1702516125000").unwrap();
        assert_eq!(tx_type, TransactionType::Expense);
        assert_eq!(timestamp, 1702516125000);

        assert!(Transaction::parse_id("invalid::format").is_err());
        assert!(Transaction::parse_id("transaction::income").is_err());
        assert!(Transaction::parse_id("not_transaction::income::123").is_err());
        assert!(Transaction::parse_id("transaction::invalid::123").is_err());
        assert!(Transaction::parse_id("transaction::income::not_a_number").is_err());
    }

    #[test]
    fn test_extract_timestamp() {
        let transaction = Transaction {
            id: "transaction::income::1702516122000".to_string(),
            user_id: "test_user_id".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 12, 14).unwrap(),
            description: "Test transaction".to_string(),
            amount: 10.0,
            category: "Salary".to_string(),
            transaction_type: TransactionType::Income,
        };

        assert_eq!(transaction.extract_timestamp().unwrap(), 1702516122000);
    }
}
