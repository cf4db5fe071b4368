//! Change notifications delivered through the chat transport.

use std::sync::Arc;

use super::ChatTransport;
use super::format;
use crate::monitor::{ChangeHandler, DeviceDiff, DispatchError};
use crate::notify::Subscription;

/// [`ChangeHandler`] that messages each subscriber about the change.
///
/// Delivery is best effort: a failed send is logged and the next
/// subscriber is still notified.
#[derive(Debug)]
pub struct ChangeNotifier<T> {
    transport: Arc<T>,
}

impl<T: ChatTransport> ChangeNotifier<T> {
    /// Creates a notifier sending through `transport`.
    #[must_use]
    pub const fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }
}

impl<T: ChatTransport> ChangeHandler for ChangeNotifier<T> {
    async fn handle(
        &self,
        subscription: &Subscription,
        change: &DeviceDiff,
    ) -> Result<(), DispatchError> {
        let text = format::changes(change);
        if text.is_empty() {
            tracing::debug!(%subscription, "No arrivals or departures, nothing to send");
            return Ok(());
        }

        tracing::debug!(chat_id = subscription.chat_id, "Notify changed devices:\n{text}");
        if !self.transport.send(subscription.chat_id, &text).await {
            tracing::error!(%subscription, "Failed to deliver device change notification");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::mock::MockTransport;
    use crate::device::DeviceRecord;

    fn record(id: &str) -> DeviceRecord {
        DeviceRecord {
            id: id.to_string(),
            device: "Computer".to_string(),
            devtype: Some("Apple".to_string()),
            name: None,
            net: None,
            kname: None,
        }
    }

    #[tokio::test]
    async fn sends_rendered_change_to_subscriber() {
        let transport = Arc::new(MockTransport::default());
        let notifier = ChangeNotifier::new(Arc::clone(&transport));
        let change = DeviceDiff {
            online: vec![record("a")],
            ..DeviceDiff::default()
        };

        notifier
            .handle(&Subscription::device_changes(42), &change)
            .await
            .unwrap();

        assert_eq!(
            transport.sent(),
            [(42, "<< Computer: Apple (online)\n".to_string())]
        );
    }

    #[tokio::test]
    async fn empty_change_sends_nothing() {
        let transport = Arc::new(MockTransport::default());
        let notifier = ChangeNotifier::new(Arc::clone(&transport));

        notifier
            .handle(&Subscription::device_changes(42), &DeviceDiff::default())
            .await
            .unwrap();

        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn failed_delivery_is_not_an_error() {
        let transport = Arc::new(MockTransport::default());
        transport.fail_sends();
        let notifier = ChangeNotifier::new(Arc::clone(&transport));
        let change = DeviceDiff {
            offline: vec![record("a")],
            ..DeviceDiff::default()
        };

        let result = notifier.handle(&Subscription::device_changes(1), &change).await;

        assert!(result.is_ok());
        assert_eq!(transport.sent().len(), 1);
    }
}
