//! # REST API for Category Reports
//!
//! Endpoints backing the chart view (category breakdown with percentages and
//! colors) and the grouped list view. Handlers fetch the month's
//! transactions through the transaction service and hand them to the pure
//! aggregation engine; the last response to arrive is the one the client
//! shows.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{error, info};

use crate::AppState;
use shared::{CategoryGroupsResponse, TransactionType};

// Query parameters shared by both report endpoints
#[derive(Debug, Deserialize)]
pub struct CategoryReportQuery {
    pub user_id: String,
    pub transaction_type: TransactionType,
    pub month: u32,
    pub year: i32,
}

/// Chart view: per-category totals, counts, percentage labels and colors
pub async fn get_category_breakdown(
    State(state): State<AppState>,
    Query(query): Query<CategoryReportQuery>,
) -> impl IntoResponse {
    info!("GET /api/reports/categories - query: {:?}", query);

    let transactions = match state
        .transaction_service
        .transactions_for_month(&query.user_id, query.transaction_type, query.month, query.year)
        .await
    {
        Ok(transactions) => transactions,
        Err(e) => {
            error!("Failed to load report data: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    let breakdown = state.report_service.category_breakdown(&transactions);
    (StatusCode::OK, Json(breakdown)).into_response()
}

/// List view: transactions grouped by category, raw entries retained
pub async fn get_category_groups(
    State(state): State<AppState>,
    Query(query): Query<CategoryReportQuery>,
) -> impl IntoResponse {
    info!("GET /api/reports/category-groups - query: {:?}", query);

    let transactions = match state
        .transaction_service
        .transactions_for_month(&query.user_id, query.transaction_type, query.month, query.year)
        .await
    {
        Ok(transactions) => transactions,
        Err(e) => {
            error!("Failed to load report data: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    let groups = state.report_service.organize_by_category(&transactions);
    (StatusCode::OK, Json(CategoryGroupsResponse { groups })).into_response()
}
