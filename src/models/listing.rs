use serde::{Deserialize, Serialize};

/// A product offered for sale by a seller. Rows are insert-only.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Listing {
    // `default` keeps checkout item snapshots lenient: carts built from
    // older payloads may omit these fields.
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: String,
    pub seller_name: String,
    #[serde(default)]
    pub created_at: i64,
}

/// Seller submission body for `POST /api/products`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewListing {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub seller_name: String,
}
