//! Repository for products, wishes and sales.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::entities::{CreateProductRequest, Product, SaleWithProduct};
use crate::types::{DatabaseError, DatabaseResult};

#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: i64, request: &CreateProductRequest) -> DatabaseResult<Product> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO products (user_id, name, price, image, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(&request.name)
        .bind(request.price)
        .bind(request.image.as_deref())
        .bind(&request.description)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(product_id = id, user_id, "product created");

        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("product {id}")))
    }

    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, user_id, name, price, image, description, created_at, updated_at FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    /// Records a wish. Wishing twice for the same product is a no-op.
    pub async fn add_wish(&self, user_id: i64, product_id: i64) -> DatabaseResult<()> {
        sqlx::query(
            "INSERT OR IGNORE INTO wishes (user_id, product_id, created_at) VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn record_sale(&self, user_id: i64, product_id: i64) -> DatabaseResult<i64> {
        let result = sqlx::query("INSERT INTO sales (user_id, product_id, created_at) VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(product_id)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Sales recorded for a user, newest first, with the wish count of each product.
    pub async fn sales_for_user(&self, user_id: i64) -> DatabaseResult<Vec<SaleWithProduct>> {
        let sales = sqlx::query_as::<_, SaleWithProduct>(
            r#"
            SELECT s.id, s.user_id, s.product_id, s.created_at,
                   p.name AS product_name, p.price AS product_price, p.image AS product_image,
                   p.description AS product_description, p.user_id AS product_user_id,
                   (SELECT COUNT(*) FROM wishes w WHERE w.product_id = p.id) AS wish_count
            FROM sales s
            JOIN products p ON p.id = s.product_id
            WHERE s.user_id = ?
            ORDER BY s.created_at DESC, s.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(sales)
    }
}
