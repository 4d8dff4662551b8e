use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(name: &str, price: Decimal, stock: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price,
            stock,
            created_at: Utc::now(),
        }
    }
}
