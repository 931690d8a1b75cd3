// handlers/protected/lost_items.rs - lost item mutations (bearer token required)

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};

use crate::database::models::LostItem;
use crate::guard::ensure_owner;
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::types::{Operation, ResourceKind};
use crate::validation::LostItemInput;

/// POST /api/lost-items - report a lost item
pub async fn lost_item_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<LostItemInput>, JsonRejection>,
) -> ApiResult<LostItem> {
    let Json(input) = payload?;

    let item = state.lost_items.create(&input, &auth.user).await?;
    tracing::info!("User {} reported lost item {}", auth.id, item.id);
    Ok(ApiResponse::created(item).with_message("Lost item reported successfully!"))
}

/// PUT /api/lost-items/:id - reporter-only partial update, e.g. marking it found
pub async fn lost_item_put(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<LostItemInput>, JsonRejection>,
) -> ApiResult<LostItem> {
    let Json(input) = payload?;
    let id = parse_id(&id, ResourceKind::LostItem)?;

    let changes = state.lost_items.changes(&input)?;
    let existing = state.lost_items.get_by_id(id).await?;
    ensure_owner(&existing, &auth.id, Operation::Update)?;

    let item = state.lost_items.update(existing, changes).await?;
    Ok(ApiResponse::success(item))
}

/// DELETE /api/lost-items/:id
pub async fn lost_item_delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id, ResourceKind::LostItem)?;

    let existing = state.lost_items.get_by_id(id).await?;
    ensure_owner(&existing, &auth.id, Operation::Delete)?;

    state.lost_items.delete(id).await?;
    tracing::info!("User {} deleted lost item {}", auth.id, id);
    Ok(ApiResponse::message("Lost item deleted successfully"))
}
