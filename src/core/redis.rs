use std::sync::Arc;

use redis::aio::ConnectionManager;
use redis::{cmd, Client, RedisError};
use tokio::sync::RwLock;

/// Shared Redis connection used only for auth-endpoint rate limiting and
/// health reporting. The service stays functional when Redis is unavailable;
/// rate limiting fails open in that case.
#[derive(Clone)]
pub(crate) struct RedisHandle {
    url: String,
    manager: Arc<RwLock<Option<ConnectionManager>>>,
}

#[derive(Debug, Clone)]
pub(crate) enum RedisHealth {
    Healthy,
    Disconnected,
    Unhealthy(String),
}

impl RedisHandle {
    pub(crate) fn new(url: String) -> Self {
        Self { url, manager: Arc::new(RwLock::new(None)) }
    }

    pub(crate) async fn connect(&self) -> Result<(), RedisError> {
        let client = Client::open(self.url.clone())?;
        let manager = ConnectionManager::new(client).await?;
        let mut guard = self.manager.write().await;
        *guard = Some(manager);
        Ok(())
    }

    pub(crate) async fn disconnect(&self) {
        let mut guard = self.manager.write().await;
        *guard = None;
    }

    pub(crate) async fn health(&self) -> RedisHealth {
        let manager = { self.manager.read().await.clone() };
        let Some(mut manager) = manager else {
            return RedisHealth::Disconnected;
        };

        match cmd("PING").query_async::<_, String>(&mut manager).await {
            Ok(_) => RedisHealth::Healthy,
            Err(err) => RedisHealth::Unhealthy(err.to_string()),
        }
    }

    /// Fixed-window counter: allows at most `limit` calls per `window_seconds`
    /// for the given key. Returns `true` when the call is within the limit.
    pub(crate) async fn rate_limit(
        &self,
        key: &str,
        limit: u64,
        window_seconds: u64,
    ) -> Result<bool, RedisError> {
        let manager = { self.manager.read().await.clone() };
        let Some(mut manager) = manager else {
            return Ok(true);
        };

        let script = redis::Script::new(
            r#"
            local current = redis.call("INCR", KEYS[1])
            if current == 1 then
                redis.call("EXPIRE", KEYS[1], ARGV[1])
            end
            return current
        "#,
        );

        let current: i64 =
            script.key(key).arg(window_seconds as i64).invoke_async(&mut manager).await?;

        Ok(current <= limit as i64)
    }
}
