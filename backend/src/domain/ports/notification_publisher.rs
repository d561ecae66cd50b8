//! Ports for fire-and-forget notifications.
//!
//! [`NotificationPublisher`] is what the domain calls: it must return
//! immediately and never fail the caller. [`NotificationBroker`] is the
//! delivery side used by the background worker behind a publisher.
use async_trait::async_trait;

use crate::domain::NotificationMessage;

use super::define_port_error;

define_port_error! {
    /// Errors raised while delivering a message to the broker.
    pub enum NotificationBrokerError {
        /// Broker could not be reached.
        Unavailable { message: String } => "notification broker unavailable: {message}",
        /// Message could not be encoded for the broker.
        Encoding { message: String } => "notification encoding failed: {message}",
    }
}

/// Non-blocking, at-most-once hand-off of notifications.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationPublisher: Send + Sync {
    /// Queue a message for delivery. Dropped messages are logged, not returned.
    fn publish(&self, message: NotificationMessage);
}

/// Transport that delivers a single message to an external broker.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationBroker: Send + Sync {
    /// Deliver one message.
    async fn deliver(&self, message: &NotificationMessage) -> Result<(), NotificationBrokerError>;
}
