//! # Domain Module
//!
//! Contains all business logic for the expense tracker application.
//!
//! ## Module Organization
//!
//! - **reporting**: Category aggregation for the chart and grouped list views
//! - **transaction_service**: Transaction entry validation, CRUD, and
//!   date-range queries
//! - **calendar**: Calendar view generation and date-based transaction
//!   organization
//! - **profile_service**: User profile and budget ledger
//! - **events**: Data-changed broadcast channel
//! - **export_service**: CSV export of transaction history
//!
//! ## Business Rules
//!
//! - Amounts are positive at entry; the transaction type decides whether
//!   they add to or subtract from the user's funds
//! - Category labels must belong to the configured set for their type
//! - Budget ledger totals move in step with transaction creation and
//!   deletion
//! - Aggregation is pure: validation happens at entry, never during
//!   reporting

pub mod calendar;
pub mod events;
pub mod export_service;
pub mod models;
pub mod profile_service;
pub mod reporting;
pub mod transaction_service;

pub use calendar::CalendarService;
pub use events::{DataChanged, EventBus};
pub use export_service::ExportService;
pub use profile_service::ProfileService;
pub use reporting::{ReportConfig, ReportService};
pub use transaction_service::TransactionService;
