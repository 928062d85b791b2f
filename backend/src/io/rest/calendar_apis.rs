//! # REST API for the Calendar View
//!
//! Serves the month grid with per-day transactions and daily totals.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{error, info};

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CalendarMonthQuery {
    pub user_id: String,
    pub month: u32,
    pub year: i32,
}

/// Build a calendar month from the user's transactions in that month
pub async fn get_calendar_month(
    State(state): State<AppState>,
    Query(query): Query<CalendarMonthQuery>,
) -> impl IntoResponse {
    info!("GET /api/calendar/month - query: {:?}", query);

    let Some((first, last)) = state.calendar_service.month_bounds(query.month, query.year)
    else {
        return (
            StatusCode::BAD_REQUEST,
            format!("Invalid month: {}/{}", query.month, query.year),
        )
            .into_response();
    };

    let transactions = match state
        .transaction_service
        .transactions_in_range(&query.user_id, first, last)
        .await
    {
        Ok(transactions) => transactions,
        Err(e) => {
            error!("Failed to load calendar data: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error loading calendar data")
                .into_response();
        }
    };

    let calendar_month =
        state
            .calendar_service
            .generate_calendar_month(query.month, query.year, transactions);

    (StatusCode::OK, Json(calendar_month)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_state;
    use axum::body::to_bytes;
    use shared::{CalendarMonth, CreateTransactionRequest, TransactionType};

    #[tokio::test]
    async fn test_get_calendar_month_handler() {
        let state = test_state().await;
        state
            .transaction_service
            .create_transaction(CreateTransactionRequest {
                user_id: "test_user".to_string(),
                transaction_type: TransactionType::Expense,
                category: "Food".to_string(),
                amount: 12.0,
                description: String::new(),
                date: Some("2024-03-15".parse().unwrap()),
            })
            .await
            .unwrap();

        let query = CalendarMonthQuery {
            user_id: "test_user".to_string(),
            month: 3,
            year: 2024,
        };
        let response = get_calendar_month(State(state), Query(query))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let calendar: CalendarMonth = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(calendar.month, 3);
        assert_eq!(calendar.year, 2024);
        let day_15 = calendar.days.iter().find(|d| d.day == 15).unwrap();
        assert_eq!(day_15.transactions.len(), 1);
        assert_eq!(day_15.spent, 12.0);
    }

    #[tokio::test]
    async fn test_get_calendar_month_invalid_month() {
        let state = test_state().await;

        let query = CalendarMonthQuery {
            user_id: "test_user".to_string(),
            month: 0,
            year: 2024,
        };
        let response = get_calendar_month(State(state), Query(query))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
