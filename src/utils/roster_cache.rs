use anyhow::Result;
use futures_util::StreamExt;
use moka::future::Cache;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::time::Duration;

/// lowercased email => display name
pub static ROSTER_NAME_CACHE: Lazy<Cache<String, String>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(50_000)
        .time_to_live(Duration::from_secs(3600)) // 1h TTL
        .build()
});

pub async fn cache_name(email: &str, name: &str) {
    ROSTER_NAME_CACHE
        .insert(email.to_lowercase(), name.to_string())
        .await;
}

pub async fn cached_name(email: &str) -> Option<String> {
    ROSTER_NAME_CACHE.get(&email.to_lowercase()).await
}

/// Drop a stale entry after a staff update or delete.
pub async fn invalidate(email: &str) {
    ROSTER_NAME_CACHE.invalidate(&email.to_lowercase()).await;
}

/// Cache-aside display-name lookup: cached value, else the roster table.
pub async fn resolve_name(pool: &MySqlPool, email: &str) -> Option<String> {
    if let Some(name) = cached_name(email).await {
        return Some(name);
    }
    let name = sqlx::query_scalar::<_, String>(r#"SELECT name FROM staff WHERE email = ?"#)
        .bind(email)
        .fetch_optional(pool)
        .await
        .ok()
        .flatten()?;
    cache_name(email, &name).await;
    Some(name)
}

async fn batch_cache(pairs: &[(String, String)]) {
    let futures: Vec<_> = pairs
        .iter()
        .map(|(email, name)| ROSTER_NAME_CACHE.insert(email.to_lowercase(), name.clone()))
        .collect();

    // Await all insertions concurrently
    futures::future::join_all(futures).await;
}

/// Load active staff display names into the in-memory cache (batched)
pub async fn warmup_roster_cache(pool: &MySqlPool, batch_size: usize) -> Result<()> {
    let mut stream = sqlx::query_as::<_, (String, String)>(
        r#"
        SELECT email, name
        FROM staff
        WHERE status = 'active'
        "#,
    )
    .fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total_count = 0usize;

    while let Some(row) = stream.next().await {
        let pair = row?;
        batch.push(pair);
        total_count += 1;

        if batch.len() >= batch_size {
            batch_cache(&batch).await;
            batch.clear();
        }
    }

    if !batch.is_empty() {
        batch_cache(&batch).await;
    }

    log::info!("Roster name cache warmup complete: {} active staff", total_count);

    Ok(())
}
