use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

const MAX_CONNECTIONS: u32 = 20;
const CONNECT_ATTEMPTS: u32 = 6;

/// Connects with a bounded retry loop so the server survives the database
/// coming up a few seconds after it (compose, restarts).
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let mut backoff = Duration::from_secs(1);

    for attempt in 1..=CONNECT_ATTEMPTS {
        let connected = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url)
            .await;

        match connected {
            Ok(pool) => {
                info!("Database connection established.");
                return Ok(pool);
            }
            Err(e) if attempt < CONNECT_ATTEMPTS => {
                warn!(
                    "Database unreachable (attempt {attempt}/{CONNECT_ATTEMPTS}): {e}. Retrying in {}s...",
                    backoff.as_secs()
                );
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
            Err(e) => return Err(e),
        }
    }

    unreachable!("the final attempt either returned a pool or an error")
}
