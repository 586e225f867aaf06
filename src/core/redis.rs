use std::sync::Arc;

use redis::aio::ConnectionManager;
use redis::{cmd, Client, RedisError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

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

    /// Cached JSON value, or `None` when disconnected, missing, or no longer decodable.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, RedisError> {
        let manager = { self.manager.read().await.clone() };
        let Some(mut manager) = manager else {
            return Ok(None);
        };

        let payload: Option<String> = cmd("GET").arg(key).query_async(&mut manager).await?;
        let Some(payload) = payload else {
            return Ok(None);
        };

        match serde_json::from_str(&payload) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Discarding undecodable cache entry");
                Ok(None)
            }
        }
    }

    pub(crate) async fn set_json<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> Result<(), RedisError> {
        let manager = { self.manager.read().await.clone() };
        let Some(mut manager) = manager else {
            return Ok(());
        };

        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Skipping cache write");
                return Ok(());
            }
        };

        cmd("SET")
            .arg(key)
            .arg(payload)
            .arg("EX")
            .arg(ttl_seconds.max(1))
            .query_async::<_, ()>(&mut manager)
            .await
    }

    pub(crate) async fn delete(&self, key: &str) -> Result<(), RedisError> {
        let manager = { self.manager.read().await.clone() };
        let Some(mut manager) = manager else {
            return Ok(());
        };

        cmd("DEL").arg(key).query_async::<_, ()>(&mut manager).await
    }
}

pub(crate) fn exam_reports_key(exam_id: &str) -> String {
    format!("gradebook:exam:{exam_id}:reports")
}

#[cfg(test)]
mod tests {
    use super::{exam_reports_key, RedisHandle, RedisHealth};

    fn disconnected() -> RedisHandle {
        RedisHandle::new("redis://127.0.0.1:6379/1".to_string())
    }

    #[tokio::test]
    async fn disconnected_handle_is_a_no_op_cache() {
        let redis = disconnected();

        redis.set_json("key", &vec![1, 2, 3], 60).await.expect("set");
        let cached: Option<Vec<i32>> = redis.get_json("key").await.expect("get");
        redis.delete("key").await.expect("delete");

        assert!(cached.is_none());
        assert!(matches!(redis.health().await, RedisHealth::Disconnected));
    }

    #[test]
    fn exam_reports_key_is_scoped_by_exam() {
        assert_eq!(exam_reports_key("exam-1"), "gradebook:exam:exam-1:reports");
        assert_ne!(exam_reports_key("exam-1"), exam_reports_key("exam-2"));
    }
}
