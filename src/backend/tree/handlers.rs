//! Collection and Item HTTP Handlers
//!
//! Thin axum wrappers over `nodes` and `sharing`. The caller's identity
//! always comes from `AuthUser`, never from the body.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};

use super::{nodes, sharing};
use crate::backend::error::BackendResult;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::routes::parse_id;
use crate::backend::server::state::AppState;
use crate::shared::requests::{
    CreateCollectionRequest, CreateItemRequest, CreatedNode, DeletedNodes, ShareCollectionRequest,
    UpdateNodeRequest,
};
use crate::shared::{ApiResponse, Collection, ExpandedCollection, Node, NodeKind, ResolvedChild};

type Created = (StatusCode, Json<ApiResponse<CreatedNode>>);

fn created(node: CreatedNode) -> Created {
    (StatusCode::CREATED, Json(ApiResponse::success(node)))
}

/// `POST /collections`
pub async fn create_collection(
    State(app_state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<CreateCollectionRequest>, JsonRejection>,
) -> BackendResult<Created> {
    let Json(request) = payload?;
    let (draft, parent_id) = request.into_draft()?;
    let node = nodes::create_node(app_state.store.as_ref(), draft, parent_id, caller.user_id).await?;
    Ok(created(node))
}

/// `POST /items`
pub async fn create_item(
    State(app_state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> BackendResult<Created> {
    let Json(request) = payload?;
    let (draft, parent_id) = request.into_draft()?;
    let node = nodes::create_node(app_state.store.as_ref(), draft, parent_id, caller.user_id).await?;
    Ok(created(node))
}

/// `GET /collections`
pub async fn list_collections(
    State(app_state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> BackendResult<Json<ApiResponse<Vec<Node>>>> {
    let listed = nodes::list_nodes(app_state.store.as_ref(), NodeKind::Collection, caller.user_id).await?;
    Ok(Json(ApiResponse::success(listed)))
}

/// `GET /items`
pub async fn list_items(
    State(app_state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> BackendResult<Json<ApiResponse<Vec<Node>>>> {
    let listed = nodes::list_nodes(app_state.store.as_ref(), NodeKind::Item, caller.user_id).await?;
    Ok(Json(ApiResponse::success(listed)))
}

/// `GET /collections/{id}`, children resolved
pub async fn get_collection(
    State(app_state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<String>,
) -> BackendResult<Json<ApiResponse<ExpandedCollection>>> {
    let expanded = nodes::get_collection_expanded(app_state.store.as_ref(), parse_id(&id)?).await?;
    Ok(Json(ApiResponse::success(expanded)))
}

/// `GET /collections/{id}/children`
pub async fn get_collection_children(
    State(app_state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<String>,
) -> BackendResult<Json<ApiResponse<Vec<ResolvedChild>>>> {
    let children = nodes::get_collection_children(app_state.store.as_ref(), parse_id(&id)?).await?;
    Ok(Json(ApiResponse::success(children)))
}

/// `GET /items/{id}`
pub async fn get_item(
    State(app_state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<String>,
) -> BackendResult<Json<ApiResponse<Node>>> {
    let item = nodes::get_node(app_state.store.as_ref(), NodeKind::Item, parse_id(&id)?).await?;
    Ok(Json(ApiResponse::success(item)))
}

async fn update(
    app_state: &AppState,
    kind: NodeKind,
    caller: uuid::Uuid,
    id: &str,
    payload: Result<Json<UpdateNodeRequest>, JsonRejection>,
) -> BackendResult<Json<ApiResponse<Node>>> {
    let id = parse_id(id)?;
    let Json(request) = payload?;
    let patch = request.into_patch()?;
    let node = nodes::update_node(app_state.store.as_ref(), kind, id, patch, caller).await?;
    Ok(Json(ApiResponse::success(node)))
}

/// `PUT /collections/{id}`
pub async fn update_collection(
    State(app_state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateNodeRequest>, JsonRejection>,
) -> BackendResult<Json<ApiResponse<Node>>> {
    update(&app_state, NodeKind::Collection, caller.user_id, &id, payload).await
}

/// `PUT /items/{id}`
pub async fn update_item(
    State(app_state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateNodeRequest>, JsonRejection>,
) -> BackendResult<Json<ApiResponse<Node>>> {
    update(&app_state, NodeKind::Item, caller.user_id, &id, payload).await
}

/// `DELETE /collections/{id}`; removes the whole subtree
pub async fn delete_collection(
    State(app_state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> BackendResult<Json<ApiResponse<DeletedNodes>>> {
    let deleted = nodes::delete_node(
        app_state.store.as_ref(),
        NodeKind::Collection,
        parse_id(&id)?,
        caller.user_id,
    )
    .await?;
    Ok(Json(ApiResponse::success(deleted)))
}

/// `DELETE /items/{id}`
pub async fn delete_item(
    State(app_state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> BackendResult<Json<ApiResponse<DeletedNodes>>> {
    let deleted = nodes::delete_node(app_state.store.as_ref(), NodeKind::Item, parse_id(&id)?, caller.user_id).await?;
    Ok(Json(ApiResponse::success(deleted)))
}

/// `POST /collections/{id}/share`
pub async fn share_collection(
    State(app_state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<ShareCollectionRequest>, JsonRejection>,
) -> BackendResult<Json<ApiResponse<Collection>>> {
    let id = parse_id(&id)?;
    let Json(request) = payload?;
    let target = request.target()?;
    let collection = sharing::share_collection(app_state.store.as_ref(), id, caller.user_id, target).await?;
    Ok(Json(ApiResponse::success(collection)))
}
