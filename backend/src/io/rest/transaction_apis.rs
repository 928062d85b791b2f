//! # REST API for Transactions
//!
//! Endpoints for listing, creating and deleting transactions.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{error, info};

use crate::AppState;
use shared::{
    CreateTransactionRequest, DeleteTransactionsRequest, TransactionListRequest,
};

// Query parameters for transaction listing API
#[derive(Debug, Deserialize)]
pub struct TransactionListQuery {
    pub user_id: String,
    pub after: Option<String>,
    pub limit: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// List transactions with optional filtering and pagination
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionListQuery>,
) -> impl IntoResponse {
    info!("GET /api/transactions - query: {:?}", query);

    let request = TransactionListRequest {
        user_id: query.user_id,
        after: query.after,
        limit: query.limit,
        start_date: query.start_date,
        end_date: query.end_date,
    };

    match state.transaction_service.list_transactions(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list transactions: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing transactions").into_response()
        }
    }
}

/// Create a new transaction
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(request): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    info!("POST /api/transactions - request: {:?}", request);

    match state.transaction_service.create_transaction(request).await {
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(e) => {
            error!("Failed to create transaction: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Delete multiple transactions
pub async fn delete_transactions(
    State(state): State<AppState>,
    Json(request): Json<DeleteTransactionsRequest>,
) -> impl IntoResponse {
    info!("DELETE /api/transactions - request: {:?}", request);

    match state.transaction_service.delete_transactions(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to delete transactions: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error deleting transactions").into_response()
        }
    }
}
