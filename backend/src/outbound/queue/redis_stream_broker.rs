//! Broker appending notifications to a Redis stream.

use async_trait::async_trait;
use bb8_redis::redis;
use tracing::debug;

use crate::domain::NotificationMessage;
use crate::domain::ports::{NotificationBroker, NotificationBrokerError};
use crate::outbound::redis::RedisPool;

/// Approximate upper bound on retained stream entries.
pub const DEFAULT_STREAM_MAXLEN: u64 = 10_000;

/// Appends each message to a stream with `XADD … MAXLEN ~`.
///
/// Entries carry two fields: `subject` and `payload` (the message as JSON).
#[derive(Clone)]
pub struct RedisStreamBroker {
    pool: RedisPool,
    stream: String,
    max_len: u64,
}

impl RedisStreamBroker {
    /// Create a broker writing to `stream`.
    pub fn new(pool: RedisPool, stream: impl Into<String>) -> Self {
        Self {
            pool,
            stream: stream.into(),
            max_len: DEFAULT_STREAM_MAXLEN,
        }
    }

    /// Override the approximate stream length cap.
    #[must_use]
    pub fn with_max_len(mut self, max_len: u64) -> Self {
        self.max_len = max_len;
        self
    }
}

#[async_trait]
impl NotificationBroker for RedisStreamBroker {
    async fn deliver(&self, message: &NotificationMessage) -> Result<(), NotificationBrokerError> {
        let payload = serde_json::to_string(message)
            .map_err(|err| NotificationBrokerError::encoding(err.to_string()))?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| NotificationBrokerError::unavailable(err.to_string()))?;

        let entry_id: String = redis::cmd("XADD")
            .arg(&self.stream)
            .arg("MAXLEN")
            .arg("~")
            .arg(self.max_len)
            .arg("*")
            .arg("subject")
            .arg(&message.subject)
            .arg("payload")
            .arg(payload)
            .query_async(&mut *conn)
            .await
            .map_err(|err| NotificationBrokerError::unavailable(err.to_string()))?;

        debug!(stream = %self.stream, %entry_id, "notification appended to stream");
        Ok(())
    }
}
