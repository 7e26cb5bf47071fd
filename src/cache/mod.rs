use redis::{Client, RedisError, aio::ConnectionManager};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;

#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    pub async fn new(redis_url: &str) -> Result<Self, RedisError> {
        let client = Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }

    /// Get a value from cache
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> redis::RedisResult<Option<T>> {
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await?;

        match value {
            Some(v) => {
                let deserialized = serde_json::from_str(&v).map_err(|e| {
                    redis::RedisError::from((
                        redis::ErrorKind::TypeError,
                        "Deserialization error",
                        e.to_string(),
                    ))
                })?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    /// Set a value in cache with optional TTL (in seconds)
    pub async fn set<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: Option<u64>,
    ) -> redis::RedisResult<()> {
        let serialized = serde_json::to_string(value).map_err(|e| {
            redis::RedisError::from((
                redis::ErrorKind::TypeError,
                "Serialization error",
                e.to_string(),
            ))
        })?;

        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(serialized);

        if let Some(ttl) = ttl_seconds {
            cmd.arg("EX").arg(ttl);
        }

        cmd.query_async(&mut self.connection.clone()).await
    }

    /// Delete a key from cache
    pub async fn delete(&self, key: &str) -> redis::RedisResult<()> {
        redis::cmd("DEL")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await
    }

    /// Delete multiple keys matching a pattern
    pub async fn delete_pattern(&self, pattern: &str) -> redis::RedisResult<()> {
        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(pattern)
            .query_async(&mut self.connection.clone())
            .await?;

        if !keys.is_empty() {
            let _: () = redis::cmd("DEL")
                .arg(&keys)
                .query_async(&mut self.connection.clone())
                .await?;
        }

        Ok(())
    }
}

/// Cache key generators
pub mod keys {
    /// Generate key for job listings (suffix is the filter fingerprint)
    pub fn job_list(filters: &str) -> String {
        format!("jobs:list:{}", filters)
    }

    /// Generate key for a single job
    pub fn job(id: &str) -> String {
        format!("job:{}", id)
    }

    /// Generate key for a user record
    pub fn user(id: &str) -> String {
        format!("user:{}", id)
    }

    /// Generate key for a profile by owning user
    pub fn profile(user_id: &str) -> String {
        format!("profile:{}", user_id)
    }

    /// Generate key for the browsable engineer pool
    pub fn engineer_pool() -> String {
        "profiles:engineers".to_string()
    }
}

/// Cache TTLs in seconds, overridable from the environment.
pub struct CacheConfig {
    pub job_list_ttl: u64,
    pub job_ttl: u64,
    pub user_ttl: u64,
    pub profile_ttl: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            job_list_ttl: 300,  // 5 minutes
            job_ttl: 600,       // 10 minutes
            user_ttl: 900,      // 15 minutes
            profile_ttl: 600,   // 10 minutes
        }
    }
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self {
            job_list_ttl: parse_secs("CACHE_TTL_JOB_LIST", 300),
            job_ttl: parse_secs("CACHE_TTL_JOB_DETAIL", 600),
            user_ttl: parse_secs("CACHE_TTL_USERS", 900),
            profile_ttl: parse_secs("CACHE_TTL_PROFILES", 600),
        }
    }
}

fn parse_secs(env_var: &str, default: u64) -> u64 {
    std::env::var(env_var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
