//! # REST API for CSV Export
//!
//! Serves a user's full transaction history as a CSV download.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::{error, info};

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub user_id: String,
}

/// Export all of a user's transactions as CSV
pub async fn export_transactions(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> impl IntoResponse {
    info!("GET /api/export/transactions - user: {}", query.user_id);

    let transactions = match state.transaction_service.all_transactions(&query.user_id).await {
        Ok(transactions) => transactions,
        Err(e) => {
            error!("Failed to load transactions for export: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error exporting transactions")
                .into_response();
        }
    };

    match state.export_service.transactions_to_csv(&transactions) {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"transactions.csv\"",
                ),
            ],
            csv,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to render CSV: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error exporting transactions").into_response()
        }
    }
}
