//! Category reporting for the expense tracker.
//!
//! Turns a flat list of transactions into category-grouped summary data for
//! the chart view (per-category totals, percentage labels, colors) and the
//! grouped list view. Aggregation is pure and synchronous: no I/O, no shared
//! state, one fresh result per call. Fetching the transactions to aggregate
//! is the transaction service's job.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use shared::{
    CategoryBreakdownResponse, CategoryEntry, CategoryGroup, CategorySummary, Transaction,
    TransactionType,
};
use uuid::Uuid;

/// Expense category labels accepted at transaction entry
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Debt",
    "Food",
    "Transportation",
    "Clothing",
    "Education",
    "Bill",
    "Gift",
    "Vacation",
    "Health",
    "Other",
];

/// Income category labels accepted at transaction entry
pub const INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Freelancing",
    "Inheritance",
    "Allowance",
    "Other",
];

/// Color assigned to any category name missing from the color table.
/// Must stay constant so repeated renders of an unknown category agree.
pub const FALLBACK_COLOR: &str = "#000000";

static DEFAULT_CATEGORY_COLORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Debt", "#003f5c"),
        ("Food", "#2f4b7c"),
        ("Transportation", "#4CAF50"),
        ("Clothing", "#a05195"),
        ("Education", "#d45087"),
        ("Bill", "#d45087"),
        ("Gift", "#ff7c43"),
        ("Vacation", "#ffa600"),
        ("Health", "#00BCD4"),
        ("Other", "#607D8B"),
        ("Salary", "#003f5c"),
        ("Freelancing", "#2f4b7c"),
        ("Inheritance", "#a05195"),
        ("Allowance", "#d45087"),
    ])
});

/// Injectable reporting configuration: category catalog, color table and
/// percentage formatting. Tests substitute their own instances.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub expense_categories: Vec<String>,
    pub income_categories: Vec<String>,
    /// Color table keyed by category name
    pub colors: HashMap<String, String>,
    /// Deterministic color for names missing from the table
    pub fallback_color: String,
    /// Decimal places in percentage labels
    pub percent_decimals: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            expense_categories: EXPENSE_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            income_categories: INCOME_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            colors: DEFAULT_CATEGORY_COLORS
                .iter()
                .map(|(name, color)| (name.to_string(), color.to_string()))
                .collect(),
            fallback_color: FALLBACK_COLOR.to_string(),
            percent_decimals: 1,
        }
    }
}

impl ReportConfig {
    /// Whether `category` belongs to the enumerated set for `transaction_type`
    pub fn is_valid_category(&self, transaction_type: TransactionType, category: &str) -> bool {
        let catalog = match transaction_type {
            TransactionType::Expense => &self.expense_categories,
            TransactionType::Income => &self.income_categories,
        };
        catalog.iter().any(|c| c == category)
    }

    /// Look up the display color for a category name
    pub fn color_for(&self, category: &str) -> &str {
        self.colors
            .get(category)
            .map(String::as_str)
            .unwrap_or(&self.fallback_color)
    }

    fn percentage_label(&self, value: f64) -> String {
        format!("{:.prec$}%", value, prec = self.percent_decimals)
    }
}

/// Group transactions by exact category name (case-sensitive), preserving
/// first-seen category order and per-group input order.
///
/// Shared by the chart-summary path and the grouped list view so the two
/// never disagree on grouping.
pub fn group_by_category(transactions: &[Transaction]) -> Vec<(String, Vec<&Transaction>)> {
    let mut groups: Vec<(String, Vec<&Transaction>)> = Vec::new();
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();

    for transaction in transactions {
        match index_by_name.get(transaction.category.as_str()) {
            Some(&index) => groups[index].1.push(transaction),
            None => {
                index_by_name.insert(transaction.category.as_str(), groups.len());
                groups.push((transaction.category.clone(), vec![transaction]));
            }
        }
    }

    groups
}

/// Stateless aggregation engine producing display-ready category data.
#[derive(Clone)]
pub struct ReportService {
    config: Arc<ReportConfig>,
}

impl ReportService {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Aggregate transactions into one summary per category present.
    ///
    /// Totals partition the grand total exactly and the output name set
    /// equals the distinct input category set. Empty input yields an empty
    /// result; a non-empty input whose amounts sum to zero yields summaries
    /// labeled "0.0%" rather than dividing by zero.
    pub fn aggregate(&self, transactions: &[Transaction]) -> Vec<CategorySummary> {
        if transactions.is_empty() {
            return Vec::new();
        }

        let grand_total: f64 = transactions.iter().map(|t| t.amount).sum();

        group_by_category(transactions)
            .into_iter()
            .map(|(name, group)| {
                let total: f64 = group.iter().map(|t| t.amount).sum();
                let share = if grand_total == 0.0 {
                    0.0
                } else {
                    total / grand_total * 100.0
                };

                CategorySummary {
                    id: Uuid::new_v4(),
                    percentage_label: self.config.percentage_label(share),
                    color: self.config.color_for(&name).to_string(),
                    total,
                    count: group.len(),
                    name,
                }
            })
            .collect()
    }

    /// Full chart response: summaries plus the grand total and input size
    pub fn category_breakdown(&self, transactions: &[Transaction]) -> CategoryBreakdownResponse {
        let grand_total = transactions.iter().map(|t| t.amount).sum();
        CategoryBreakdownResponse {
            summaries: self.aggregate(transactions),
            grand_total,
            transaction_count: transactions.len(),
        }
    }

    /// Group transactions into `{category, entries}` records for the list
    /// view, retaining each transaction's display fields.
    pub fn organize_by_category(&self, transactions: &[Transaction]) -> Vec<CategoryGroup> {
        group_by_category(transactions)
            .into_iter()
            .map(|(name, group)| CategoryGroup {
                name,
                entries: group
                    .iter()
                    .map(|t| CategoryEntry {
                        id: t.id.clone(),
                        description: t.description.clone(),
                        date: t.date,
                        amount: t.amount,
                    })
                    .collect(),
            })
            .collect()
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}
