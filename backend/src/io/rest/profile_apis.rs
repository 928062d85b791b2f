//! # REST API for User Profiles
//!
//! Profile reads and updates, budget changes, and photo URL changes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{error, info};

use crate::AppState;
use shared::{SetBudgetRequest, SetPhotoRequest, UpdateProfileRequest};

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    pub user_id: String,
}

/// Fetch a user's profile, creating a blank one on first access
pub async fn get_profile(
    State(state): State<AppState>,
    Query(query): Query<ProfileQuery>,
) -> impl IntoResponse {
    info!("GET /api/profile - user: {}", query.user_id);

    match state.profile_service.get_profile(&query.user_id).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => {
            error!("Failed to get profile: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Update the editable profile fields
pub async fn update_profile(
    State(state): State<AppState>,
    Json(request): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    info!("PUT /api/profile - request: {:?}", request);

    match state.profile_service.update_profile(request).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => {
            error!("Failed to update profile: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Set the budget ceiling; budget_left is recomputed from the expense total
pub async fn set_budget(
    State(state): State<AppState>,
    Json(request): Json<SetBudgetRequest>,
) -> impl IntoResponse {
    info!("PUT /api/profile/budget - request: {:?}", request);

    match state.profile_service.set_budget(request).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => {
            error!("Failed to set budget: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

/// Record the URL of an externally uploaded profile photo
pub async fn set_photo(
    State(state): State<AppState>,
    Json(request): Json<SetPhotoRequest>,
) -> impl IntoResponse {
    info!("PUT /api/profile/photo - request: {:?}", request);

    match state.profile_service.set_photo_url(request).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => {
            error!("Failed to set photo: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_state;

    #[tokio::test]
    async fn test_get_profile_handler() {
        let state = test_state().await;

        let query = ProfileQuery {
            user_id: "test_user".to_string(),
        };
        let response = get_profile(State(state), Query(query)).await;
        assert_eq!(response.into_response().status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_profile_rejects_empty_user() {
        let state = test_state().await;

        let query = ProfileQuery {
            user_id: String::new(),
        };
        let response = get_profile(State(state), Query(query)).await;
        assert_eq!(response.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_profile_handler() {
        let state = test_state().await;

        let request = UpdateProfileRequest {
            user_id: "test_user".to_string(),
            name: Some("Alex".to_string()),
            age: None,
            job: Some("Engineer".to_string()),
            address: None,
        };
        let response = update_profile(State(state), Json(request)).await;
        assert_eq!(response.into_response().status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_set_budget_handler() {
        let state = test_state().await;

        let request = SetBudgetRequest {
            user_id: "test_user".to_string(),
            amount: 300.0,
        };
        let response = set_budget(State(state.clone()), Json(request)).await;
        assert_eq!(response.into_response().status(), StatusCode::OK);

        let invalid = SetBudgetRequest {
            user_id: "test_user".to_string(),
            amount: -1.0,
        };
        let response = set_budget(State(state), Json(invalid)).await;
        assert_eq!(response.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_set_photo_handler() {
        let state = test_state().await;

        let request = SetPhotoRequest {
            user_id: "test_user".to_string(),
            photo_url: "https://storage.example/pictures/test_user".to_string(),
        };
        let response = set_photo(State(state), Json(request)).await;
        assert_eq!(response.into_response().status(), StatusCode::OK);
    }
}
