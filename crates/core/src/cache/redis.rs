//! Redis cache backend.
//!
//! Shared by every worker process. Entries are stored as JSON under
//! `SET key value EX ttl`, so Redis expires them on its own; an entry that
//! decodes as past its TTL (clock skew, manual edits) is deleted on read.
//! Clearing and counting walk the key prefix with `SCAN`, never `KEYS`.
//!
//! Every command is bounded by the configured operation timeout. A server
//! that accepts a command and never answers yields `CacheError::Connection`.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use redis::FromRedisValue;
use redis::aio::ConnectionManager;

use super::{BackendKind, CacheBackend, CacheEntry, CacheError};
use crate::query::CacheKey;
use crate::query::key::KEY_PREFIX;

const SCAN_BATCH: usize = 200;

/// Networked cache backend.
#[derive(Clone)]
pub struct RedisBackend {
    conn: ConnectionManager,
    op_timeout: Duration,
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend")
            .field("op_timeout", &self.op_timeout)
            .finish_non_exhaustive()
    }
}

impl RedisBackend {
    /// Connect and verify the server answers `PING` within `connect_timeout`.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Connection` if the URL is invalid, the server is
    /// unreachable, or it does not answer in time.
    pub async fn connect(url: &str, connect_timeout: Duration, op_timeout: Duration) -> Result<Self, CacheError> {
        let client = redis::Client::open(url).map_err(|e| CacheError::Connection(e.to_string()))?;

        let connect = async {
            let mut conn = ConnectionManager::new(client).await?;
            let _: String = redis::cmd("PING").query_async(&mut conn).await?;
            Ok::<_, redis::RedisError>(conn)
        };

        let conn = tokio::time::timeout(connect_timeout, connect)
            .await
            .map_err(|_| CacheError::Connection(format!("no answer within {}ms", connect_timeout.as_millis())))?
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        Ok(Self { conn, op_timeout })
    }

    /// Run one command under the operation timeout.
    async fn run<T: FromRedisValue>(&self, cmd: &redis::Cmd) -> Result<T, CacheError> {
        let mut conn = self.conn.clone();
        match tokio::time::timeout(self.op_timeout, cmd.query_async(&mut conn)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(CacheError::Connection(format!("no reply within {}ms", self.op_timeout.as_millis()))),
        }
    }

    /// Every distinct key under the crate prefix.
    ///
    /// `SCAN` may return a key more than once across batches.
    async fn scan_keys(&self) -> Result<Vec<String>, CacheError> {
        let pattern = format!("{KEY_PREFIX}*");
        let mut cursor: u64 = 0;
        let mut keys = HashSet::new();

        loop {
            let mut cmd = redis::cmd("SCAN");
            cmd.arg(cursor).arg("MATCH").arg(&pattern).arg("COUNT").arg(SCAN_BATCH);
            let (next, batch): (u64, Vec<String>) = self.run(&cmd).await?;
            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        Ok(keys.into_iter().collect())
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Redis
    }

    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>, CacheError> {
        let mut cmd = redis::cmd("GET");
        cmd.arg(key.as_str());
        let raw: Option<String> = self.run(&cmd).await?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        let entry: CacheEntry = serde_json::from_str(&raw)?;
        if entry.is_expired() {
            self.remove(key).await?;
            return Ok(None);
        }

        Ok(Some(entry))
    }

    async fn set(&self, entry: CacheEntry) -> Result<(), CacheError> {
        let ttl = entry.remaining_ttl_secs();
        if ttl == 0 {
            return Ok(());
        }

        let value = serde_json::to_string(&entry)?;
        let mut cmd = redis::cmd("SET");
        cmd.arg(entry.key.as_str()).arg(value).arg("EX").arg(ttl);
        let _: () = self.run(&cmd).await?;
        Ok(())
    }

    async fn remove(&self, key: &CacheKey) -> Result<bool, CacheError> {
        let mut cmd = redis::cmd("DEL");
        cmd.arg(key.as_str());
        let removed: u64 = self.run(&cmd).await?;
        Ok(removed > 0)
    }

    async fn clear_all(&self) -> Result<u64, CacheError> {
        let keys = self.scan_keys().await?;
        let mut removed = 0;
        for chunk in keys.chunks(SCAN_BATCH) {
            let mut cmd = redis::cmd("DEL");
            cmd.arg(chunk.to_vec());
            let n: u64 = self.run(&cmd).await?;
            removed += n;
        }
        Ok(removed)
    }

    async fn count(&self) -> Result<u64, CacheError> {
        Ok(self.scan_keys().await?.len() as u64)
    }

    async fn purge_expired(&self) -> Result<u64, CacheError> {
        // Redis drops keys on its own once EX elapses.
        Ok(0)
    }
}
