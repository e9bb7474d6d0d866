use chrono::Utc;

use crate::models::PaymentCallback;
use crate::services::razorpay::GatewayOrder;
use crate::AppState;

const CURRENCY: &str = "INR";

/// Converts a major-unit amount (rupees) to minor units (paise). The
/// amount is taken as-is; zero and negative values pass through.
fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Creates a payment order for the given amount. Without gateway
/// credentials a locally synthesized mock handle is returned so the
/// checkout flow can be exercised end to end.
pub async fn create_payment_order(state: &AppState, amount: f64) -> Result<GatewayOrder, String> {
    let now = Utc::now().timestamp_millis();

    if !state.razorpay.has_keys() {
        return Ok(GatewayOrder::mock(
            format!("order_mock_{now}"),
            to_minor_units(amount),
            CURRENCY,
        ));
    }

    let receipt = format!("receipt_{now}");
    state
        .razorpay
        .create_order(to_minor_units(amount), CURRENCY, &receipt)
        .await
}

/// Records one "PAID" order row from a completion callback. The callback's
/// signature is accepted as-is.
/// TODO: verify `razorpay_signature` (HMAC-SHA256 over order_id|payment_id
/// with the key secret) before trusting the callback.
pub async fn record_paid_order(state: &AppState, callback: &PaymentCallback) -> Result<i64, String> {
    let details = &callback.order_details;

    let gps_json = match &details.gps {
        Some(gps) => Some(serde_json::to_string(gps).map_err(|e| e.to_string())?),
        None => None,
    };
    let items_json = serde_json::to_string(&details.items).map_err(|e| e.to_string())?;
    let now = Utc::now().timestamp_millis();

    let result = sqlx::query(
        r"
        INSERT INTO orders (
            gateway_order_id, gateway_payment_id, amount, currency, status,
            customer_name, customer_email, customer_address, gps_coordinates, items,
            created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        ",
    )
    .bind(&callback.razorpay_order_id)
    .bind(&callback.razorpay_payment_id)
    .bind(details.amount)
    .bind(CURRENCY)
    .bind("PAID")
    .bind(&details.customer_name)
    .bind(&details.customer_email)
    .bind(&details.address)
    .bind(gps_json)
    .bind(items_json)
    .bind(now)
    .execute(&state.db)
    .await
    .map_err(|e| e.to_string())?;

    Ok(result.last_insert_rowid())
}

/// Customer confirmation, then the admin alert. Sequential, no retry; the
/// caller decides what a failure means for the response.
pub async fn send_order_emails(state: &AppState, callback: &PaymentCallback) -> Result<(), String> {
    state
        .mailer
        .send_order_confirmation(&callback.order_details, &callback.razorpay_order_id)
        .await?;
    state
        .mailer
        .send_admin_alert(&callback.order_details, &callback.razorpay_payment_id)
        .await?;
    Ok(())
}
