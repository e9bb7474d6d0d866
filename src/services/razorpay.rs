use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct RazorpayClient {
    http: Client,
    key_id: String,
    key_secret: String,
}

impl RazorpayClient {
    pub fn new(key_id: String, key_secret: String) -> Self {
        Self {
            http: Client::new(),
            key_id,
            key_secret,
        }
    }

    pub fn has_keys(&self) -> bool {
        !self.key_id.trim().is_empty() && !self.key_secret.trim().is_empty()
    }

    /// Creates a payment order for `amount` in minor currency units
    /// (paise). Returns the gateway's order handle.
    pub async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, String> {
        if !self.has_keys() {
            return Err("RAZORPAY_KEY_ID / RAZORPAY_KEY_SECRET are missing in .env".to_string());
        }

        let url = "https://api.razorpay.com/v1/orders";
        let res = self
            .http
            .post(url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&serde_json::json!({
                "amount": amount,
                "currency": currency,
                "receipt": receipt,
            }))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(format!("Razorpay order creation failed: {status} {body}"));
        }

        res.json::<GatewayOrder>().await.map_err(|e| e.to_string())
    }
}

/// Order handle as the gateway reports it. The `mock` flag marks handles
/// synthesized locally when no gateway credentials are configured; the
/// checkout UI uses it to skip the real payment widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default)]
    pub mock: bool,
}

impl GatewayOrder {
    pub fn mock(id: String, amount: i64, currency: &str) -> Self {
        Self {
            id,
            amount,
            currency: currency.to_string(),
            receipt: None,
            status: None,
            mock: true,
        }
    }
}
