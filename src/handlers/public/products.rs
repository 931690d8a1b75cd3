// handlers/public/products.rs - public product reads

use axum::extract::{Path, Query, State};

use super::ListParams;
use crate::database::models::Product;
use crate::database::ListQuery;
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::ResourceKind;

/// GET /api/products - available products, newest first
pub async fn products_get(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<Product>> {
    let query = ListQuery::search(params.search.as_deref());
    let products = state.products.list(&query).await?;
    Ok(ApiResponse::listing(products))
}

/// GET /api/products/:id - resolves sold listings too
pub async fn product_get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Product> {
    let id = parse_id(&id, ResourceKind::Product)?;
    let product = state.products.get_by_id(id).await?;
    Ok(ApiResponse::success(product))
}
