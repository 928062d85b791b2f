//! Interface layer that exposes backend functionality over HTTP.

pub mod rest;

pub use rest::calendar_apis::get_calendar_month;
pub use rest::export_apis::export_transactions;
pub use rest::profile_apis::{get_profile, set_budget, set_photo, update_profile};
pub use rest::report_apis::{get_category_breakdown, get_category_groups};
pub use rest::transaction_apis::{create_transaction, delete_transactions, list_transactions};
