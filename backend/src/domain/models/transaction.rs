use chrono::NaiveDate;

/// Domain representation of a recorded income or expense event.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub transaction_type: TransactionType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    /// Tag stored in the transactions table
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }

    /// Inverse of [`TransactionType::as_str`]; unknown tags fall back to Expense
    pub fn from_str_or_expense(value: &str) -> Self {
        match value {
            "income" => TransactionType::Income,
            _ => TransactionType::Expense,
        }
    }
}
