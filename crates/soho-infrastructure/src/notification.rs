//! Notification sinks.

use tokio::sync::mpsc;
use tracing::{info, warn};

use soho_core::notification::Notifier;

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        info!(target: "notification", "{}", message);
    }
}

/// Forwards notifications to a channel consumed by a UI.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<String>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, message: &str) {
        if self.sender.send(message.to_string()).is_err() {
            warn!(target: "notification", "Notification receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_notifier_delivers() {
        let (notifier, mut rx) = ChannelNotifier::new();
        notifier.notify("Auto-replied to 2 threads");
        assert_eq!(rx.recv().await.unwrap(), "Auto-replied to 2 threads");
    }
}
