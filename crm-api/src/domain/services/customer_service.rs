use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::customer::{Customer, CustomerInput};
use crate::domain::validation;
use crate::error::AppError;
use crate::server::AppState;

pub struct CustomerService {
    state: Arc<AppState>,
}

/// 批量创建结果：成功记录按输入顺序，错误信息按出现顺序
#[derive(Debug)]
pub struct BulkCreateOutcome {
    pub created: Vec<Customer>,
    pub errors: Vec<String>,
}

impl CustomerService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn get_customer(&self, id: Uuid) -> Result<Customer, AppError> {
        sqlx::query_as::<_, Customer>(r#"SELECT * FROM customers WHERE id = ?"#)
            .bind(id)
            .fetch_optional(&self.state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer with ID {} not found", id)))
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        let customers =
            sqlx::query_as::<_, Customer>(r#"SELECT * FROM customers ORDER BY created_at DESC"#)
                .fetch_all(&self.state.db)
                .await?;

        Ok(customers)
    }

    pub async fn create_customer(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
    ) -> Result<Customer, AppError> {
        // 先查一次只是为了友好提示，真正的唯一性由 customers.email 的唯一索引保证
        if self.email_exists(email).await? {
            return Err(AppError::Validation("Email already exists.".to_string()));
        }

        if let Some(phone) = phone {
            validation::validate_phone(phone).map_err(AppError::Validation)?;
        }

        let customer = Customer::new(name, email, phone);

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, email, phone, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(customer.created_at)
        .execute(&self.state.db)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                AppError::Validation("Email already exists.".to_string())
            } else {
                AppError::Database(err)
            }
        })?;

        tracing::info!("Created customer {} ({})", customer.name, customer.email);

        Ok(customer)
    }

    /// 整批在一个事务里执行：不合法的记录被跳过并记录错误，
    /// 合法的记录统一在末尾一起提交
    pub async fn bulk_create_customers(
        &self,
        inputs: &[CustomerInput],
    ) -> Result<BulkCreateOutcome, AppError> {
        let mut tx = self.state.db.begin().await?;

        let mut created = Vec::new();
        let mut errors = Vec::new();
        let mut batch_emails: HashSet<String> = HashSet::new();

        for input in inputs {
            let email = input.email.as_str();

            let stored: (i64,) =
                sqlx::query_as(r#"SELECT COUNT(*) FROM customers WHERE email = ?"#)
                    .bind(email)
                    .fetch_one(&mut *tx)
                    .await?;

            if stored.0 > 0 || batch_emails.contains(email) {
                errors.push(format!("Duplicate email: {}", email));
                continue;
            }

            if let Some(phone) = input.phone.as_deref() {
                if validation::validate_phone(phone).is_err() {
                    errors.push(format!("Invalid phone format for {}", email));
                    continue;
                }
            }

            let customer = Customer::new(&input.name, email, input.phone.as_deref());

            let inserted = sqlx::query(
                r#"
                INSERT INTO customers (id, name, email, phone, created_at)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(customer.id)
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.phone)
            .bind(customer.created_at)
            .execute(&mut *tx)
            .await;

            match inserted {
                Ok(_) => {
                    batch_emails.insert(customer.email.clone());
                    created.push(customer);
                }
                // 并发写入抢先占用了该邮箱时走到这里
                Err(err) if is_unique_violation(&err) => {
                    errors.push(format!("Duplicate email: {}", email));
                }
                Err(err) => return Err(err.into()),
            }
        }

        tx.commit().await?;

        tracing::info!(
            "Bulk customer create: {} created, {} skipped",
            created.len(),
            errors.len()
        );

        Ok(BulkCreateOutcome { created, errors })
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let count: (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM customers WHERE email = ?"#)
            .bind(email)
            .fetch_one(&self.state.db)
            .await?;

        Ok(count.0 > 0)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
