//! Handlers for the `/products` resource.
//!
//! Writes are optimistic: an update or delete is attempted without checking
//! the row first, and only a conflict reported by `save()` triggers an
//! existence check.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::pagination::PageRequest;
use catalog_core::types::DbId;
use catalog_db::context::ProductContext;
use catalog_db::models::product::Product;
use catalog_db::store::SaveOutcome;

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::routes::PRODUCTS_PATH;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Product",
        id,
    })
}

/// Map a save outcome to a handler result.
///
/// A conflict means a row we expected to touch is gone or changed. If it is
/// gone the request becomes a 404; otherwise the conflict is unrecoverable.
async fn settle(ctx: &ProductContext, outcome: SaveOutcome) -> AppResult<()> {
    match outcome {
        SaveOutcome::Saved => Ok(()),
        SaveOutcome::Conflict { id } => {
            if ctx.exists(id).await? {
                Err(AppError::InternalError(format!(
                    "Unresolved concurrency conflict on product {id}"
                )))
            } else {
                Err(not_found(id))
            }
        }
        SaveOutcome::Failed(err) => Err(err.into()),
    }
}

/// GET /api/products
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = state.products().list().await?;
    Ok(Json(products))
}

/// GET /api/products/pagination?page=&page_size=
///
/// Pages are 1-based and ordered by id. Malformed paging values fall back
/// to defaults; a page past the end is empty.
pub async fn list_paginated(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<Product>>> {
    let page = PageRequest::from_raw(params.page.as_deref(), params.page_size.as_deref());
    let products = state.products().list_page(page).await?;
    Ok(Json(products))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Product>> {
    let product = state
        .products()
        .get(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(product))
}

/// PUT /api/products/{id}
///
/// Replaces every field of the product. The body id must match the path.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<Product>,
) -> AppResult<StatusCode> {
    if input.id != id {
        return Err(AppError::BadRequest(format!(
            "Path id {id} does not match body id {}",
            input.id
        )));
    }

    let mut ctx = state.products();
    ctx.update(input);
    let outcome = ctx.save().await;
    settle(&ctx, outcome).await?;

    tracing::info!(product_id = id, "Product updated");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<Product>,
) -> AppResult<impl IntoResponse> {
    let mut ctx = state.products();
    ctx.add(input.clone());
    let outcome = ctx.save().await;
    settle(&ctx, outcome).await?;

    tracing::info!(product_id = input.id, "Product created");

    let location = format!("{PRODUCTS_PATH}/{}", input.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(input),
    ))
}

/// DELETE /api/products/{id}
///
/// Returns the removed product.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Product>> {
    let mut ctx = state.products();
    let product = ctx.get(id).await?.ok_or_else(|| not_found(id))?;

    ctx.remove(product.clone());
    let outcome = ctx.save().await;
    settle(&ctx, outcome).await?;

    tracing::info!(product_id = id, "Product deleted");

    Ok(Json(product))
}
