//! User HTTP Routes
//!
//! CRUD and search endpoints over the directory engine, mounted under
//! `/api/v1`.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Json, Path, Query, State,
    },
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tracing::info;

use super::response::{ApiError, ApiResponse, SUCCESS_MSG};
use crate::directory::{CreatedUser, DirectoryEngine, ListQuery, UserId, UserPage, UserView};

/// Largest page size accepted by the list endpoint
pub const MAX_PAGE_SIZE: u64 = 100;

pub const RESET_MSG: &str = "Test data reset successfully";

/// Shared user-route state
pub struct UserState {
    pub engine: Arc<DirectoryEngine>,
}

impl UserState {
    pub fn new(engine: Arc<DirectoryEngine>) -> Self {
        Self { engine }
    }
}

impl Default for UserState {
    fn default() -> Self {
        Self::new(Arc::new(DirectoryEngine::new()))
    }
}

/// User routes with shared state
pub fn user_routes(state: Arc<UserState>) -> Router {
    Router::new()
        .route("/users", post(create_user_handler).get(list_users_handler))
        .route("/users/reset", post(reset_handler))
        .route(
            "/users/:id",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
        .with_state(state)
}

// ==================
// Request Types
// ==================

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_size")]
    pub size: u64,
    #[serde(default)]
    pub keyword: Option<String>,
}

fn default_page() -> u64 {
    1
}

fn default_size() -> u64 {
    10
}

impl ListParams {
    /// Enforce `page >= 1` and `1 <= size <= 100`
    pub fn into_query(self) -> Result<ListQuery, ApiError> {
        if self.page < 1 {
            return Err(ApiError::InvalidRequest(format!("page must be >= 1, got {}", self.page)));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.size) {
            return Err(ApiError::InvalidRequest(format!(
                "size must be within 1..={}, got {}",
                MAX_PAGE_SIZE, self.size
            )));
        }
        Ok(ListQuery {
            page: self.page,
            size: self.size,
            keyword: self.keyword.filter(|k| !k.is_empty()),
        })
    }
}

// ==================
// Handlers
// ==================

/// Create user handler
async fn create_user_handler(
    State(state): State<Arc<UserState>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<ApiResponse<CreatedUser>, ApiError> {
    let Json(request) = payload?;
    let created = state
        .engine
        .create(&request.username, &request.email, &request.password)?;

    info!(user_id = created.id, username = %created.username, "user created");
    Ok(ApiResponse::success(created))
}

/// Get user handler
async fn get_user_handler(
    State(state): State<Arc<UserState>>,
    id: Result<Path<UserId>, PathRejection>,
) -> Result<ApiResponse<UserView>, ApiError> {
    let Path(id) = id?;
    let user = state.engine.get(id)?;
    Ok(ApiResponse::success(user))
}

/// Update email handler
async fn update_user_handler(
    State(state): State<Arc<UserState>>,
    id: Result<Path<UserId>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<ApiResponse<()>, ApiError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let email = request.email.ok_or(ApiError::MissingEmail)?;

    state.engine.update_email(id, &email)?;

    info!(user_id = id, "user email updated");
    Ok(ApiResponse::empty(SUCCESS_MSG))
}

/// Delete user handler
async fn delete_user_handler(
    State(state): State<Arc<UserState>>,
    id: Result<Path<UserId>, PathRejection>,
) -> Result<ApiResponse<()>, ApiError> {
    let Path(id) = id?;
    state.engine.delete(id)?;

    info!(user_id = id, "user deleted");
    Ok(ApiResponse::empty(SUCCESS_MSG))
}

/// Paginated list / search handler
async fn list_users_handler(
    State(state): State<Arc<UserState>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<ApiResponse<UserPage>, ApiError> {
    let Query(params) = params?;
    let query = params.into_query()?;
    let page = state.engine.list(&query)?;
    Ok(ApiResponse::success(page))
}

/// Restore the fixture records
async fn reset_handler(State(state): State<Arc<UserState>>) -> Result<ApiResponse<()>, ApiError> {
    state.engine.reset()?;

    info!("directory reset to seed data");
    Ok(ApiResponse::empty(RESET_MSG))
}
