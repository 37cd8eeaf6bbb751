//! Product, wish and sale entity definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub price: i64,
    pub image: Option<String>,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: i64,
    pub image: Option<String>,
    pub description: String,
}

/// A sale joined with the product sold and how many users wished for it.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct SaleWithProduct {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub created_at: DateTime<Utc>,
    pub product_name: String,
    pub product_price: i64,
    pub product_image: Option<String>,
    pub product_description: String,
    pub product_user_id: i64,
    pub wish_count: i64,
}
