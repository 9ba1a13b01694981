use anyhow::Result;
use chrono::NaiveDate;
use futures_util::StreamExt;
use moka::future::Cache;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::time::Duration;

/// Dates known to be holidays. Positive cache only: a miss still has to hit
/// the database.
static HOLIDAY_CACHE: Lazy<Cache<NaiveDate, bool>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(4_096)
        .time_to_live(Duration::from_secs(86_400)) // 24h TTL
        .build()
});

/// Mark a single date as a holiday.
pub async fn mark_holiday(date: NaiveDate) {
    HOLIDAY_CACHE.insert(date, true).await;
}

/// Drop a date from the cache (holiday deleted).
pub async fn forget(date: NaiveDate) {
    HOLIDAY_CACHE.invalidate(&date).await;
}

/// Check whether a date is a cached holiday.
pub async fn is_known_holiday(date: NaiveDate) -> bool {
    HOLIDAY_CACHE.get(&date).await.unwrap_or(false)
}

/// Load the holidays around the current year into the cache at startup so
/// the first working-day decisions of the day skip the database.
pub async fn warmup_holiday_cache(pool: &MySqlPool, year: i32) -> Result<()> {
    let mut stream = sqlx::query_scalar::<_, NaiveDate>(
        r#"
        SELECT date
        FROM holidays
        WHERE YEAR(date) BETWEEN ? AND ?
        ORDER BY date
        "#,
    )
    .bind(year)
    .bind(year + 1)
    .fetch(pool);

    let mut loaded = 0usize;
    while let Some(date) = stream.next().await {
        mark_holiday(date?).await;
        loaded += 1;
    }

    tracing::info!(loaded, "Holiday cache warmed up");
    Ok(())
}
