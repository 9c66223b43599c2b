//! Account Handlers
//!
//! Authenticated routes under `/api/v1/users`. Reads are open to any
//! signed-in user; update and delete only to the account itself.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::backend::auth::users;
use crate::backend::error::BackendResult;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::routes::parse_id;
use crate::backend::server::state::AppState;
use crate::shared::requests::UpdateUserRequest;
use crate::shared::{ApiResponse, ResolvedChild, User, UserProfile};

/// `GET /users/listing`
pub async fn list_users(
    State(app_state): State<AppState>,
    AuthUser(_): AuthUser,
) -> BackendResult<Json<ApiResponse<Vec<User>>>> {
    let users = users::list_users(app_state.store.as_ref()).await?;
    Ok(Json(ApiResponse::success(users)))
}

/// `GET /users/{id}`
pub async fn get_user(
    State(app_state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<String>,
) -> BackendResult<Json<ApiResponse<UserProfile>>> {
    let profile = users::get_user_profile(app_state.store.as_ref(), parse_id(&id)?).await?;
    Ok(Json(ApiResponse::success(profile)))
}

/// `GET /users/{id}/collection`
pub async fn get_user_roots(
    State(app_state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<String>,
) -> BackendResult<Json<ApiResponse<Vec<ResolvedChild>>>> {
    let roots = users::get_user_roots(app_state.store.as_ref(), parse_id(&id)?).await?;
    Ok(Json(ApiResponse::success(roots)))
}

/// `PUT /users/{id}`
pub async fn update_user(
    State(app_state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> BackendResult<Json<ApiResponse<User>>> {
    let id = parse_id(&id)?;
    let Json(request) = payload?;
    let user = users::update_user(
        app_state.store.as_ref(),
        &app_state.config,
        caller.user_id,
        id,
        request,
    )
    .await?;
    Ok(Json(ApiResponse::success(user)))
}

/// `DELETE /users/{id}`
pub async fn delete_user(
    State(app_state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> BackendResult<Json<ApiResponse<Value>>> {
    let id = parse_id(&id)?;
    users::delete_user(app_state.store.as_ref(), caller.user_id, id).await?;
    Ok(Json(ApiResponse::success(json!({
        "message": format!("User {} deleted", id),
    }))))
}
