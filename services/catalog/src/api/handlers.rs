//! 请求处理器

use axum::extract::{Path, State};
use errors::AppError;

use crate::domain::entities::ProductPatch;
use crate::domain::value_objects::ProductId;
use crate::error::ApiError;

use super::AppState;
use super::dto::{
    CreateProductRequest, CreateProductResponse, HealthResponse, MessageResponse,
    ProductListResponse, ProductResponse,
};
use super::extract::Json;

pub async fn home() -> &'static str {
    "Hello, World!"
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /product
pub async fn create_product(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<Json<CreateProductResponse>, ApiError> {
    let id = state.products.insert(req.into()).await?;

    Ok(Json(CreateProductResponse {
        message: "Product created".to_string(),
        id,
    }))
}

/// GET /product
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ProductListResponse>, ApiError> {
    let products = state.products.list_all().await?;

    Ok(Json(ProductListResponse {
        products: products.into_iter().map(ProductResponse::from).collect(),
    }))
}

/// GET /product/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>, ApiError> {
    let id = ProductId(id);
    let product = state
        .products
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;

    Ok(Json(product.into()))
}

/// PATCH /product/{id}
///
/// 合并更新：读出记录、套用补丁、整行写回
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = ProductId(id);
    let mut product = state
        .products
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;

    product.apply(patch);
    state.products.update(&product).await?;

    Ok(Json(MessageResponse {
        message: "Product updated".to_string(),
    }))
}
