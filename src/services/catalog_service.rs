use chrono::Utc;

use crate::models::{Listing, NewListing};
use crate::AppState;

/// All listings, newest first. Same-millisecond inserts fall back to the
/// rowid so the most recent submission still lists first.
pub async fn list_listings(state: &AppState) -> Result<Vec<Listing>, String> {
    sqlx::query_as::<_, Listing>(
        r"
        SELECT id, title, description, price, category, image, seller_name, created_at
        FROM listings
        ORDER BY created_at DESC, id DESC
        ",
    )
    .fetch_all(&state.db)
    .await
    .map_err(|e| e.to_string())
}

/// Inserts a seller submission and returns the generated id.
pub async fn create_listing(state: &AppState, new: &NewListing) -> Result<i64, String> {
    let now = Utc::now().timestamp_millis();

    let result = sqlx::query(
        r"
        INSERT INTO listings (title, description, price, category, image, seller_name, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        ",
    )
    .bind(&new.title)
    .bind(&new.description)
    .bind(new.price)
    .bind(&new.category)
    .bind(&new.image)
    .bind(&new.seller_name)
    .bind(now)
    .execute(&state.db)
    .await
    .map_err(|e| e.to_string())?;

    Ok(result.last_insert_rowid())
}
