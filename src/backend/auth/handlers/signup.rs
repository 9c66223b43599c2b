/**
 * Registration Handler
 *
 * `POST /api/v1/users`
 *
 * # Validation
 *
 * - `name`, `email`, `mobile` and `password` are required
 * - Email must contain '@' character (basic validation)
 * - Password must be at least 8 characters long
 * - Email must be unique (409 Conflict naming the field otherwise)
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::users::register_user;
use crate::backend::error::BackendResult;
use crate::backend::server::state::AppState;
use crate::shared::requests::RegisterRequest;
use crate::shared::{ApiResponse, User};

/// Register handler
///
/// # Example Request
///
/// ```http
/// POST /api/v1/users HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "name": "Ada",
///   "email": "ada@example.com",
///   "mobile": "555-0100",
///   "password": "securepassword123"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "outcome": "Success",
///   "payload": {
///     "id": "123e4567-e89b-12d3-a456-426614174000",
///     "name": "Ada",
///     "email": "ada@example.com",
///     "mobile": "555-0100",
///     "image": null,
///     "mainCollection": [],
///     "createdAt": "2024-05-01T12:00:00Z",
///     "modifiedAt": "2024-05-01T12:00:00Z"
///   }
/// }
/// ```
pub async fn register(
    State(app_state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> BackendResult<(StatusCode, Json<ApiResponse<User>>)> {
    let Json(request) = payload?;
    let user = register_user(app_state.store.as_ref(), &app_state.config, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user))))
}
