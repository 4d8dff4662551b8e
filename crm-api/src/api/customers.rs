use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::domain::models::customer::{Customer, CustomerInput};
use crate::domain::services::customer_service::CustomerService;
use crate::error::AppError;
use crate::server::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route("/bulk", post(bulk_create_customers))
        .route("/{id}", get(get_customer))
}

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            created_at: customer.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateCustomerResponse {
    pub success: bool,
    pub message: String,
    pub customer: Option<CustomerResponse>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BulkCreateCustomersRequest {
    #[validate(nested)]
    pub customers: Vec<CustomerInput>,
}

#[derive(Debug, Serialize)]
pub struct BulkCreateCustomersResponse {
    pub created_customers: Vec<CustomerResponse>,
    pub errors: Vec<String>,
}

async fn create_customer(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<Json<CreateCustomerResponse>, AppError> {
    // 结构性校验，未通过的请求不会进入业务层
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let customer_service = CustomerService::new(state.clone());

    match customer_service
        .create_customer(&payload.name, &payload.email, payload.phone.as_deref())
        .await
    {
        Ok(customer) => Ok(Json(CreateCustomerResponse {
            success: true,
            message: "Customer created successfully.".to_string(),
            customer: Some(customer.into()),
        })),
        Err(AppError::Validation(message)) | Err(AppError::NotFound(message)) => {
            Ok(Json(CreateCustomerResponse {
                success: false,
                message,
                customer: None,
            }))
        }
        Err(err) => Err(err),
    }
}

async fn bulk_create_customers(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BulkCreateCustomersRequest>,
) -> Result<Json<BulkCreateCustomersResponse>, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let customer_service = CustomerService::new(state.clone());

    let outcome = customer_service
        .bulk_create_customers(&payload.customers)
        .await?;

    Ok(Json(BulkCreateCustomersResponse {
        created_customers: outcome.created.into_iter().map(Into::into).collect(),
        errors: outcome.errors,
    }))
}

async fn get_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<CustomerResponse>, AppError> {
    let customer_service = CustomerService::new(state.clone());

    let customer = customer_service.get_customer(id).await?;

    Ok(Json(customer.into()))
}

async fn list_customers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CustomerResponse>>, AppError> {
    let customer_service = CustomerService::new(state.clone());

    let customers = customer_service.list_customers().await?;

    Ok(Json(customers.into_iter().map(Into::into).collect()))
}
