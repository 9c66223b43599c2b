/**
 * Login Handler
 *
 * `POST /api/v1/users/login`
 *
 * # Security
 *
 * - Passwords are verified using bcrypt
 * - Unknown email and wrong password both return 401 with the same message
 * - Token lifetime comes from `AppConfig::token_ttl_secs`
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::users;
use crate::backend::error::BackendResult;
use crate::backend::server::state::AppState;
use crate::shared::requests::{AuthResponse, LoginRequest};
use crate::shared::ApiResponse;

/// Login handler
///
/// # Example Response
///
/// ```json
/// {
///   "outcome": "Success",
///   "payload": {
///     "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///     "user": { "id": "123e4567-e89b-12d3-a456-426614174000", "email": "ada@example.com" }
///   }
/// }
/// ```
pub async fn login(
    State(app_state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> BackendResult<Json<ApiResponse<AuthResponse>>> {
    let Json(request) = payload?;
    let auth = users::login(app_state.store.as_ref(), &app_state.config, request).await?;
    Ok(Json(ApiResponse::success(auth)))
}
