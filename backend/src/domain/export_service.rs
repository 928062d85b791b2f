//! CSV export of a user's transaction history.

use anyhow::Result;
use shared::Transaction;

#[derive(Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Render transactions as a CSV document, one row per transaction
    pub fn transactions_to_csv(&self, transactions: &[Transaction]) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer.write_record(["id", "date", "type", "category", "amount", "description"])?;

        for transaction in transactions {
            writer.write_record([
                transaction.id.as_str(),
                &transaction.date.to_string(),
                &transaction.transaction_type.to_string(),
                transaction.category.as_str(),
                &transaction.amount.to_string(),
                transaction.description.as_str(),
            ])?;
        }

        let bytes = writer.into_inner()?;
        Ok(String::from_utf8(bytes)?)
    }
}
