use serde::{Deserialize, Serialize};

use super::listing::Listing;

/// One completed (client-asserted) payment. Append-only ledger row;
/// `items` and `gps_coordinates` hold JSON snapshots taken at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_address: String,
    pub gps_coordinates: Option<String>,
    pub items: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GpsPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Shipping and cart details collected by the checkout form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderDetails {
    #[serde(default)]
    pub amount: f64,
    #[serde(default, rename = "customerName")]
    pub customer_name: String,
    #[serde(default, rename = "customerEmail")]
    pub customer_email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub gps: Option<GpsPoint>,
    #[serde(default)]
    pub items: Vec<Listing>,
}

/// Completion callback the client posts after driving the gateway
/// checkout (or simulating it in mock mode).
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentCallback {
    #[serde(default)]
    pub razorpay_order_id: String,
    #[serde(default)]
    pub razorpay_payment_id: String,
    #[serde(default)]
    pub razorpay_signature: String,
    #[serde(default, rename = "orderDetails")]
    pub order_details: OrderDetails,
    #[serde(default, rename = "isMock")]
    pub is_mock: bool,
}
