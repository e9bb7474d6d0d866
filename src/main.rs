use std::net::SocketAddr;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use techmarket::{config, routes, services, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    // SQLite connection (WAL, created on first run)
    let connect_options = SqliteConnectOptions::from_str(&settings.database_url)
        .expect("Invalid DATABASE_URL")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);
    let db = SqlitePoolOptions::new()
        .connect_with(connect_options)
        .await
        .expect("Failed to open SQLite database");

    services::db_init::ensure_schema(&db)
        .await
        .expect("Failed to create tables");
    services::db_init::seed_listings(&db)
        .await
        .expect("Failed to seed listings");

    let razorpay = services::razorpay::RazorpayClient::new(
        settings.razorpay_key_id.clone(),
        settings.razorpay_key_secret.clone(),
    );
    let gemini = services::gemini::GeminiClient::new(settings.gemini_api_key.clone());
    let mailer = services::mailer::Mailer::from_settings(&settings);

    let state = AppState {
        db,
        settings: settings.clone(),
        razorpay,
        gemini,
        mailer,
    };

    let app = routes::app(state);

    let addr = SocketAddr::from((settings.host.parse::<std::net::IpAddr>().unwrap(), settings.port));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
