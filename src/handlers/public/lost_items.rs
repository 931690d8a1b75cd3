// handlers/public/lost_items.rs - public lost item reads

use axum::extract::{Path, Query, State};

use super::ListParams;
use crate::database::models::LostItem;
use crate::database::ListQuery;
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::ResourceKind;

/// GET /api/lost-items - items still missing, newest first
pub async fn lost_items_get(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<LostItem>> {
    let query = ListQuery::search(params.search.as_deref());
    let items = state.lost_items.list(&query).await?;
    Ok(ApiResponse::listing(items))
}

/// GET /api/lost-items/:id
pub async fn lost_item_get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<LostItem> {
    let id = parse_id(&id, ResourceKind::LostItem)?;
    let item = state.lost_items.get_by_id(id).await?;
    Ok(ApiResponse::success(item))
}
