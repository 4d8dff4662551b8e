use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::models::product::Product;
use crate::domain::validation;
use crate::error::AppError;
use crate::server::AppState;

pub struct ProductService {
    state: Arc<AppState>,
}

impl ProductService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn get_product(&self, id: Uuid) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(r#"SELECT * FROM products WHERE id = ?"#)
            .bind(id)
            .fetch_optional(&self.state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found", id)))
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        let products =
            sqlx::query_as::<_, Product>(r#"SELECT * FROM products ORDER BY created_at DESC"#)
                .fetch_all(&self.state.db)
                .await?;

        Ok(products)
    }

    pub async fn create_product(
        &self,
        name: &str,
        price: Decimal,
        stock: i32,
    ) -> Result<Product, AppError> {
        validation::validate_price(price).map_err(AppError::Validation)?;
        validation::validate_stock(stock).map_err(AppError::Validation)?;

        let product = Product::new(name, price, stock);

        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, stock, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.stock)
        .bind(product.created_at)
        .execute(&self.state.db)
        .await?;

        tracing::info!("Created product {} at {}", product.name, product.price);

        Ok(product)
    }
}
