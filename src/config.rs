use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    pub razorpay_key_id: String,
    pub razorpay_key_secret: String,

    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub smtp_from: String,
    pub admin_email: String,

    pub gemini_api_key: String,
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:techmarket.db".to_string());

    let host = env::var("HOST")
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    // Absent gateway keys switch order creation into mock mode.
    let razorpay_key_id = env::var("RAZORPAY_KEY_ID").unwrap_or_default();
    let razorpay_key_secret = env::var("RAZORPAY_KEY_SECRET").unwrap_or_default();

    // Absent SMTP host/user means notification emails are skipped.
    let smtp_host = env::var("SMTP_HOST").unwrap_or_default();
    let smtp_port = env::var("SMTP_PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(587);
    let smtp_user = env::var("SMTP_USER").unwrap_or_default();
    let smtp_pass = env::var("SMTP_PASS").unwrap_or_default();
    let smtp_from = env::var("SMTP_FROM")
        .unwrap_or_else(|_| "\"TechMarket\" <noreply@techmarket.com>".to_string());
    // Admin alerts fall back to the SMTP user when no dedicated inbox is set.
    let admin_email = env::var("ADMIN_EMAIL")
        .or_else(|_| env::var("SMTP_USER"))
        .unwrap_or_default();

    let gemini_api_key = env::var("GEMINI_API_KEY").unwrap_or_default();

    Settings {
        database_url,
        host,
        port,
        razorpay_key_id,
        razorpay_key_secret,
        smtp_host,
        smtp_port,
        smtp_user,
        smtp_pass,
        smtp_from,
        admin_email,
        gemini_api_key,
    }
}
