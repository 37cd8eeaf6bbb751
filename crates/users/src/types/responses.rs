//! Views returned by the user endpoints.

use chrono::{DateTime, Utc};
use neighborhood_database::{SaleWithProduct, User};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub created: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            avatar: user.avatar,
            created: user.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleView {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub created: DateTime<Utc>,
    pub product: SaleProductView,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleProductView {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub image: Option<String>,
    pub description: String,
    pub user_id: i64,
    #[serde(rename = "_count")]
    pub count: ProductCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProductCount {
    pub wishes: i64,
}

impl From<SaleWithProduct> for SaleView {
    fn from(sale: SaleWithProduct) -> Self {
        Self {
            id: sale.id,
            user_id: sale.user_id,
            product_id: sale.product_id,
            created: sale.created_at,
            product: SaleProductView {
                id: sale.product_id,
                name: sale.product_name,
                price: sale.product_price,
                image: sale.product_image,
                description: sale.product_description,
                user_id: sale.product_user_id,
                count: ProductCount {
                    wishes: sale.wish_count,
                },
            },
        }
    }
}

/// Public profile of a user.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub id: i64,
    pub name: String,
    pub avatar: Option<String>,
    pub manner_degree: f64,
    pub reviews: Vec<ReviewView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    pub id: i64,
    pub score: i64,
    pub boxes: Vec<String>,
    pub created: DateTime<Utc>,
    pub created_ago: String,
    pub created_by: ReviewAuthor,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ReviewAuthor {
    pub id: i64,
    pub name: String,
    pub avatar: Option<String>,
}
