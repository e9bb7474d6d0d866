use chrono::Utc;
use sqlx::SqlitePool;

pub async fn ensure_schema(db: &SqlitePool) -> Result<(), String> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS listings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            price REAL NOT NULL,
            category TEXT NOT NULL DEFAULT '',
            image TEXT NOT NULL DEFAULT '',
            seller_name TEXT NOT NULL DEFAULT '',
            created_at INTEGER NOT NULL
        )
        ",
    )
    .execute(db)
    .await
    .map_err(|e| e.to_string())?;

    // gateway_payment_id carries no uniqueness constraint: repeated
    // completion callbacks for the same payment insert separate rows.
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            gateway_order_id TEXT NOT NULL DEFAULT '',
            gateway_payment_id TEXT NOT NULL DEFAULT '',
            amount REAL NOT NULL DEFAULT 0,
            currency TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT '',
            customer_name TEXT NOT NULL DEFAULT '',
            customer_email TEXT NOT NULL DEFAULT '',
            customer_address TEXT NOT NULL DEFAULT '',
            gps_coordinates TEXT,
            items TEXT NOT NULL DEFAULT '[]',
            created_at INTEGER NOT NULL
        )
        ",
    )
    .execute(db)
    .await
    .map_err(|e| e.to_string())?;

    Ok(())
}

/// Inserts the demo catalog on first run. A non-empty table is left alone.
pub async fn seed_listings(db: &SqlitePool) -> Result<(), String> {
    let count: i64 = sqlx::query_scalar("SELECT count(*) FROM listings")
        .fetch_one(db)
        .await
        .map_err(|e| e.to_string())?;

    if count > 0 {
        return Ok(());
    }

    let seeds = [
        (
            "UltraCharge 20000mAh Power Bank",
            "High-capacity portable charger with fast charging support for all devices.",
            2499.0,
            "Power Banks",
            "https://images.unsplash.com/photo-1609091839311-d5365f9ff1c5?auto=format&fit=crop&w=800&q=80",
            "TechGear Official",
        ),
        (
            "SonicBlast Pro Wireless Speaker",
            "Immersive 360-degree sound with deep bass and 24-hour battery life.",
            8999.0,
            "Speakers",
            "https://images.unsplash.com/photo-1608043152269-423dbba4e7e1?auto=format&fit=crop&w=800&q=80",
            "AudioMaster",
        ),
        (
            "ProBook X1 Carbon",
            "Ultra-slim laptop with 4K display, i7 processor, and 1TB SSD.",
            124999.0,
            "Laptops",
            "https://images.unsplash.com/photo-1496181133206-80ce9b88a853?auto=format&fit=crop&w=800&q=80",
            "LaptopWorld",
        ),
        (
            "HyperFast 65W GaN Charger",
            "Compact fast charger for laptops, tablets, and phones.",
            1999.0,
            "Chargers",
            "https://images.unsplash.com/photo-1583863788434-e58a36330cf0?auto=format&fit=crop&w=800&q=80",
            "PowerUp",
        ),
        (
            "Zenith Noise Cancelling Headphones",
            "Premium over-ear headphones with industry-leading noise cancellation.",
            24999.0,
            "Headphones",
            "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?auto=format&fit=crop&w=800&q=80",
            "AudioMaster",
        ),
    ];

    let now = Utc::now().timestamp_millis();
    for (title, description, price, category, image, seller_name) in seeds {
        sqlx::query(
            r"
            INSERT INTO listings (title, description, price, category, image, seller_name, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(title)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(image)
        .bind(seller_name)
        .bind(now)
        .execute(db)
        .await
        .map_err(|e| e.to_string())?;
    }

    tracing::info!("seeded {} demo listings", seeds.len());
    Ok(())
}
