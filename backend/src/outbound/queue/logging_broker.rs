//! Broker that writes notifications to the log instead of a message bus.

use async_trait::async_trait;
use tracing::info;

use crate::domain::NotificationMessage;
use crate::domain::ports::{NotificationBroker, NotificationBrokerError};

/// Development broker used when no Redis URL is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingBroker;

#[async_trait]
impl NotificationBroker for LoggingBroker {
    async fn deliver(&self, message: &NotificationMessage) -> Result<(), NotificationBrokerError> {
        info!(
            subject = %message.subject,
            body = %message.body,
            trace_id = message.trace_id.as_deref(),
            occurred_at = %message.occurred_at,
            "notification"
        );
        Ok(())
    }
}
