use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::models::customer::Customer;
use crate::domain::models::order::Order;
use crate::domain::models::product::Product;
use crate::domain::validation;
use crate::error::AppError;
use crate::server::AppState;

pub struct OrderService {
    state: Arc<AppState>,
}

/// 订单连同其客户和商品快照
#[derive(Debug)]
pub struct OrderDetails {
    pub order: Order,
    pub customer: Customer,
    pub products: Vec<Product>,
}

impl OrderService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// 客户校验、商品解析、总额计算、订单与关联写入在同一个事务里完成
    pub async fn create_order(
        &self,
        customer_id: Uuid,
        product_ids: &[Uuid],
        order_date: Option<DateTime<Utc>>,
    ) -> Result<OrderDetails, AppError> {
        let mut tx = self.state.db.begin().await?;

        let customer = sqlx::query_as::<_, Customer>(r#"SELECT * FROM customers WHERE id = ?"#)
            .bind(customer_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Invalid customer ID.".to_string()))?;

        if product_ids.is_empty() {
            return Err(AppError::Validation(
                "At least one product must be selected.".to_string(),
            ));
        }

        // 去重后逐一解析；任何一个 ID 解析不到就整体拒绝
        let mut unique_ids: Vec<Uuid> = Vec::with_capacity(product_ids.len());
        for id in product_ids {
            if !unique_ids.contains(id) {
                unique_ids.push(*id);
            }
        }

        let mut query =
            sqlx::QueryBuilder::<sqlx::MySql>::new(r#"SELECT * FROM products WHERE id IN ("#);
        {
            let mut ids = query.separated(", ");
            for id in &unique_ids {
                ids.push_bind(*id);
            }
        }
        query.push(")");

        let products: Vec<Product> = query.build_query_as().fetch_all(&mut *tx).await?;

        if products.len() != unique_ids.len() {
            return Err(AppError::Validation("Invalid product IDs.".to_string()));
        }

        let total_amount = validation::order_total(&products);

        let order = Order {
            id: Uuid::new_v4(),
            customer_id: customer.id,
            order_date: order_date.unwrap_or_else(Utc::now),
            total_amount,
        };

        sqlx::query(
            r#"
            INSERT INTO orders (id, customer_id, order_date, total_amount)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(order.id)
        .bind(order.customer_id)
        .bind(order.order_date)
        .bind(order.total_amount)
        .execute(&mut *tx)
        .await?;

        let mut associations = sqlx::QueryBuilder::<sqlx::MySql>::new(
            r#"INSERT INTO order_products (order_id, product_id) "#,
        );
        associations.push_values(&products, |mut row, product| {
            row.push_bind(order.id).push_bind(product.id);
        });
        associations.build().execute(&mut *tx).await?;

        tx.commit().await?;

        tracing::info!(
            "Created order {} for customer {} with {} products, total {}",
            order.id,
            customer.email,
            products.len(),
            order.total_amount
        );

        Ok(OrderDetails {
            order,
            customer,
            products,
        })
    }

    pub async fn get_order(&self, id: Uuid) -> Result<OrderDetails, AppError> {
        let order = sqlx::query_as::<_, Order>(r#"SELECT * FROM orders WHERE id = ?"#)
            .bind(id)
            .fetch_optional(&self.state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order with ID {} not found", id)))?;

        self.hydrate(order).await
    }

    /// since 过滤在数据库侧完成：order_date >= since
    pub async fn list_orders(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<OrderDetails>, AppError> {
        let orders: Vec<Order> = match since {
            Some(since) => {
                sqlx::query_as(
                    r#"SELECT * FROM orders WHERE order_date >= ? ORDER BY order_date DESC"#,
                )
                .bind(since)
                .fetch_all(&self.state.db)
                .await?
            }
            None => {
                sqlx::query_as(r#"SELECT * FROM orders ORDER BY order_date DESC"#)
                    .fetch_all(&self.state.db)
                    .await?
            }
        };

        let mut details = Vec::with_capacity(orders.len());
        for order in orders {
            details.push(self.hydrate(order).await?);
        }

        Ok(details)
    }

    async fn hydrate(&self, order: Order) -> Result<OrderDetails, AppError> {
        let customer = sqlx::query_as::<_, Customer>(r#"SELECT * FROM customers WHERE id = ?"#)
            .bind(order.customer_id)
            .fetch_one(&self.state.db)
            .await?;

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT p.* FROM products p
            INNER JOIN order_products op ON op.product_id = p.id
            WHERE op.order_id = ?
            "#,
        )
        .bind(order.id)
        .fetch_all(&self.state.db)
        .await?;

        Ok(OrderDetails {
            order,
            customer,
            products,
        })
    }
}
