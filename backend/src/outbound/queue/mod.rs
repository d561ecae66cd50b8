//! Notification delivery: a bounded in-process queue in front of a broker.
//!
//! The domain publishes through [`QueuedNotificationPublisher`], which never
//! blocks and never fails. A Tokio worker drains the queue into a
//! [`NotificationBroker`](crate::domain::ports::NotificationBroker):
//! [`RedisStreamBroker`] in production, [`LoggingBroker`] otherwise.
//! Delivery is at most once.

mod logging_broker;
mod publisher;
mod redis_stream_broker;

pub use logging_broker::LoggingBroker;
pub use publisher::{QueuedNotificationPublisher, drain_worker};
pub use redis_stream_broker::RedisStreamBroker;
