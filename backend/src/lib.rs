//! # Expense Tracker Backend
//!
//! Contains all non-UI logic for the expense tracker application.
//!
//! The backend follows a layered architecture:
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (Business logic, services)
//!     ↓
//! Storage Layer (Repositories, SQLite)
//! ```
//!
//! The domain layer is UI-agnostic and storage-agnostic: services are
//! generic over the storage [`Connection`](storage::Connection), and view
//! builders (reporting, calendar) are pure functions over fetched data.

pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::domain::{
    CalendarService, EventBus, ExportService, ProfileService, ReportConfig, ReportService,
    TransactionService,
};
use crate::storage::SqliteConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub transaction_service: TransactionService<SqliteConnection>,
    pub profile_service: ProfileService<SqliteConnection>,
    pub report_service: ReportService,
    pub calendar_service: CalendarService,
    pub export_service: ExportService,
    pub events: EventBus,
}

/// Wire up all services on top of an established storage connection
pub fn build_state(connection: Arc<SqliteConnection>) -> AppState {
    let config = Arc::new(ReportConfig::default());
    let events = EventBus::default();

    let profile_service = ProfileService::new(connection.clone(), events.clone());
    let transaction_service = TransactionService::new(
        connection,
        profile_service.clone(),
        config.clone(),
        events.clone(),
    );

    AppState {
        transaction_service,
        profile_service,
        report_service: ReportService::new((*config).clone()),
        calendar_service: CalendarService::new(),
        export_service: ExportService::new(),
        events,
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend() -> Result<AppState> {
    info!("Setting up database");
    let connection = SqliteConnection::init().await?;

    info!("Setting up domain model");
    Ok(build_state(Arc::new(connection)))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow the app frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Set up our application routes
    let api_routes = Router::new()
        .route(
            "/transactions",
            get(io::list_transactions)
                .post(io::create_transaction)
                .delete(io::delete_transactions),
        )
        .route("/reports/categories", get(io::get_category_breakdown))
        .route("/reports/category-groups", get(io::get_category_groups))
        .route("/calendar/month", get(io::get_calendar_month))
        .route("/profile", get(io::get_profile).put(io::update_profile))
        .route("/profile/budget", put(io::set_budget))
        .route("/profile/photo", put(io::set_photo))
        .route("/export/transactions", get(io::export_transactions));

    // Define our main application router
    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}

/// Application state backed by a fresh in-memory database, for handler tests
#[cfg(test)]
pub(crate) async fn test_state() -> AppState {
    let connection = SqliteConnection::init_test()
        .await
        .expect("Failed to init test DB");
    build_state(Arc::new(connection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_router_serves_transactions_endpoint() {
        let app = create_router(test_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/transactions?user_id=test_user")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_router_unknown_route_is_404() {
        let app = create_router(test_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_router_create_and_report_round_trip() {
        let app = create_router(test_state().await);

        let create = Request::builder()
            .method("POST")
            .uri("/api/transactions")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({
                    "user_id": "test_user",
                    "transaction_type": "Expense",
                    "category": "Food",
                    "amount": 25.0,
                    "description": "Groceries",
                    "date": "2024-03-10"
                })
                .to_string(),
            ))
            .unwrap();

        let response = app.clone().oneshot(create).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let report = Request::builder()
            .uri("/api/reports/categories?user_id=test_user&transaction_type=Expense&month=3&year=2024")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(report).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
