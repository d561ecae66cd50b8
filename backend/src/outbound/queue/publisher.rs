//! Bounded channel publisher with a background delivery worker.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, Receiver, Sender, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::NotificationMessage;
use crate::domain::ports::{NotificationBroker, NotificationPublisher};

/// Hands notifications to a background worker through a bounded queue.
#[derive(Clone)]
pub struct QueuedNotificationPublisher {
    sender: Sender<NotificationMessage>,
}

impl QueuedNotificationPublisher {
    /// Start the delivery worker on the current Tokio runtime.
    ///
    /// The worker stops once every publisher clone has been dropped and the
    /// queue is drained. A `capacity` of zero is treated as one.
    pub fn spawn(broker: Arc<dyn NotificationBroker>, capacity: usize) -> (Self, JoinHandle<()>) {
        let (publisher, receiver) = Self::channel(capacity);
        let worker = tokio::spawn(deliver_all(receiver, broker));
        (publisher, worker)
    }

    pub(crate) fn channel(capacity: usize) -> (Self, Receiver<NotificationMessage>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

impl NotificationPublisher for QueuedNotificationPublisher {
    fn publish(&self, message: NotificationMessage) {
        match self.sender.try_send(message) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => warn!(
                subject = %dropped.subject,
                trace_id = dropped.trace_id.as_deref(),
                "notification queue full; message dropped"
            ),
            Err(TrySendError::Closed(dropped)) => warn!(
                subject = %dropped.subject,
                trace_id = dropped.trace_id.as_deref(),
                "notification worker stopped; message dropped"
            ),
        }
    }
}

/// Wait up to `grace` for a delivery worker to empty its queue and exit.
///
/// The worker only exits once every publisher clone has been dropped, so
/// callers release the HTTP state first. Returns `false` when the worker
/// panicked or was still running when `grace` elapsed.
pub async fn drain_worker(worker: JoinHandle<()>, grace: Duration) -> bool {
    match tokio::time::timeout(grace, worker).await {
        Ok(Ok(())) => true,
        Ok(Err(error)) => {
            warn!(%error, "notification worker failed");
            false
        }
        Err(_) => {
            warn!(
                grace_secs = grace.as_secs_f64(),
                "notification worker still busy; pending notifications abandoned"
            );
            false
        }
    }
}

async fn deliver_all(mut receiver: Receiver<NotificationMessage>, broker: Arc<dyn NotificationBroker>) {
    while let Some(message) = receiver.recv().await {
        match broker.deliver(&message).await {
            Ok(()) => debug!(subject = %message.subject, "notification delivered"),
            Err(error) => warn!(
                %error,
                subject = %message.subject,
                trace_id = message.trace_id.as_deref(),
                "notification delivery failed"
            ),
        }
    }
    debug!("notification worker stopped");
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{MockNotificationBroker, NotificationBrokerError};

    #[derive(Default)]
    struct RecordingBroker {
        delivered: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl NotificationBroker for RecordingBroker {
        async fn deliver(&self, message: &NotificationMessage) -> Result<(), NotificationBrokerError> {
            self.delivered
                .lock()
                .expect("recording lock")
                .push(message.body.clone());
            Ok(())
        }
    }

    fn message(body: &str) -> NotificationMessage {
        NotificationMessage {
            subject: NotificationMessage::CONTACT_CREATED.to_owned(),
            body: body.to_owned(),
            trace_id: None,
            occurred_at: Utc::now(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn worker_delivers_in_publish_order() {
        let broker = Arc::new(RecordingBroker::default());
        let (publisher, worker) = QueuedNotificationPublisher::spawn(broker.clone(), 8);

        publisher.publish(message("first"));
        publisher.publish(message("second"));
        drop(publisher);
        worker.await.expect("worker exits cleanly");

        let delivered = broker.delivered.lock().expect("recording lock").clone();
        assert_eq!(delivered, vec!["first".to_owned(), "second".to_owned()]);
    }

    #[rstest]
    #[tokio::test]
    async fn drain_delivers_queued_messages_once_publishers_are_gone() {
        let broker = Arc::new(RecordingBroker::default());
        let (publisher, worker) = QueuedNotificationPublisher::spawn(broker.clone(), 8);
        let handler_copy = publisher.clone();

        publisher.publish(message("queued before shutdown"));
        handler_copy.publish(message("also queued"));
        drop(publisher);
        drop(handler_copy);

        assert!(drain_worker(worker, Duration::from_secs(5)).await);
        let delivered = broker.delivered.lock().expect("recording lock").clone();
        assert_eq!(
            delivered,
            vec!["queued before shutdown".to_owned(), "also queued".to_owned()]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn drain_gives_up_while_a_publisher_is_alive() {
        let broker = Arc::new(RecordingBroker::default());
        let (publisher, worker) = QueuedNotificationPublisher::spawn(broker, 8);

        assert!(!drain_worker(worker, Duration::from_millis(20)).await);
        drop(publisher);
    }

    #[rstest]
    #[tokio::test]
    async fn delivery_failure_does_not_stop_worker() {
        let mut broker = MockNotificationBroker::new();
        let mut calls = 0;
        broker.expect_deliver().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(NotificationBrokerError::unavailable("connection reset"))
            } else {
                Ok(())
            }
        });
        let (publisher, worker) = QueuedNotificationPublisher::spawn(Arc::new(broker), 4);

        publisher.publish(message("lost"));
        publisher.publish(message("kept"));
        drop(publisher);

        worker.await.expect("worker exits cleanly");
    }

    #[rstest]
    #[tokio::test]
    async fn full_queue_drops_without_blocking() {
        let (publisher, mut receiver) = QueuedNotificationPublisher::channel(1);

        publisher.publish(message("queued"));
        publisher.publish(message("dropped"));
        drop(publisher);

        assert_eq!(receiver.recv().await.map(|m| m.body), Some("queued".to_owned()));
        assert!(receiver.recv().await.is_none());
    }

    #[rstest]
    fn closed_queue_drops_silently() {
        let (publisher, receiver) = QueuedNotificationPublisher::channel(0);
        drop(receiver);

        publisher.publish(message("nobody listening"));
    }
}
