use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::domain::models::product::Product;
use crate::domain::services::product_service::ProductService;
use crate::error::AppError;
use crate::server::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/{id}", get(get_product))
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            stock: product.stock,
            created_at: product.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub stock: i32,
}

#[derive(Debug, Serialize)]
pub struct CreateProductResponse {
    pub success: bool,
    pub message: String,
    pub product: Option<ProductResponse>,
}

async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<Json<CreateProductResponse>, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let product_service = ProductService::new(state.clone());

    match product_service
        .create_product(&payload.name, payload.price, payload.stock)
        .await
    {
        Ok(product) => Ok(Json(CreateProductResponse {
            success: true,
            message: "Product created successfully.".to_string(),
            product: Some(product.into()),
        })),
        Err(AppError::Validation(message)) | Err(AppError::NotFound(message)) => {
            Ok(Json(CreateProductResponse {
                success: false,
                message,
                product: None,
            }))
        }
        Err(err) => Err(err),
    }
}

async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductResponse>, AppError> {
    let product_service = ProductService::new(state.clone());

    let product = product_service.get_product(id).await?;

    Ok(Json(product.into()))
}

async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let product_service = ProductService::new(state.clone());

    let products = product_service.list_products().await?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}
