// handlers/protected/products.rs - product mutations (bearer token required)

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};

use crate::database::models::Product;
use crate::guard::ensure_owner;
use crate::handlers::parse_id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::types::{Operation, ResourceKind};
use crate::validation::ProductInput;

/// POST /api/products - list an item for sale as the requesting user
pub async fn product_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<Product> {
    let Json(input) = payload?;

    let product = state.products.create(&input, &auth.user).await?;
    tracing::info!("User {} listed product {}", auth.id, product.id);
    Ok(ApiResponse::created(product))
}

/// PUT /api/products/:id - owner-only partial update
pub async fn product_put(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<Product> {
    let Json(input) = payload?;
    let id = parse_id(&id, ResourceKind::Product)?;

    let changes = state.products.changes(&input)?;
    let existing = state.products.get_by_id(id).await?;
    ensure_owner(&existing, &auth.id, Operation::Update)?;

    let product = state.products.update(existing, changes).await?;
    Ok(ApiResponse::success(product))
}

/// DELETE /api/products/:id - owner-only hard delete
pub async fn product_delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_id(&id, ResourceKind::Product)?;

    let existing = state.products.get_by_id(id).await?;
    ensure_owner(&existing, &auth.id, Operation::Delete)?;

    state.products.delete(id).await?;
    tracing::info!("User {} deleted product {}", auth.id, id);
    Ok(ApiResponse::message("Product deleted successfully"))
}
