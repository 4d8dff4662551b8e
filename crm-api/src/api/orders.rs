use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::customers::CustomerResponse;
use crate::api::products::ProductResponse;
use crate::domain::services::order_service::{OrderDetails, OrderService};
use crate::error::AppError;
use crate::server::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/{id}", get(get_order))
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer: CustomerResponse,
    pub products: Vec<ProductResponse>,
    pub order_date: DateTime<Utc>,
    pub total_amount: Decimal,
}

impl From<OrderDetails> for OrderResponse {
    fn from(details: OrderDetails) -> Self {
        Self {
            id: details.order.id,
            customer: details.customer.into(),
            products: details.products.into_iter().map(Into::into).collect(),
            order_date: details.order.order_date,
            total_amount: details.order.total_amount,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: Uuid,
    pub product_ids: Vec<Uuid>,
    pub order_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub message: String,
    pub order: Option<OrderResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub since: Option<DateTime<Utc>>,
}

async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>, AppError> {
    let order_service = OrderService::new(state.clone());

    match order_service
        .create_order(
            payload.customer_id,
            &payload.product_ids,
            payload.order_date,
        )
        .await
    {
        Ok(details) => Ok(Json(CreateOrderResponse {
            success: true,
            message: "Order created successfully.".to_string(),
            order: Some(details.into()),
        })),
        Err(AppError::Validation(message)) | Err(AppError::NotFound(message)) => {
            Ok(Json(CreateOrderResponse {
                success: false,
                message,
                order: None,
            }))
        }
        Err(err) => Err(err),
    }
}

async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, AppError> {
    let order_service = OrderService::new(state.clone());

    let details = order_service.get_order(id).await?;

    Ok(Json(details.into()))
}

async fn list_orders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let order_service = OrderService::new(state.clone());

    let orders = order_service.list_orders(query.since).await?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
