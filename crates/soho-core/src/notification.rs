//! Operator notifications.

/// Receives transient, human-readable status messages for the operator.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _message: &str) {}
}
