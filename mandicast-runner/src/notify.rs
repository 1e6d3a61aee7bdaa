//! Notification delivery — alerts sent when a commitment's signal changes.
//!
//! The observer only notifies on a signal transition, never on every sweep.
//! Delivery is best-effort: a failed send is reported in the sweep outcome
//! and retried naturally on the next transition.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid recipient '{recipient}': expected +<country><number>")]
    InvalidRecipient { recipient: String },

    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Outbound message channel.
pub trait Notifier: Send + Sync {
    fn notify(&self, recipient: &str, message: &str) -> Result<(), NotifyError>;
}

/// Console notifier — prints the message instead of sending it.
///
/// Stands in for an SMS gateway during development; enforces the same
/// recipient format so a swap to a real channel changes no call sites.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, recipient: &str, message: &str) -> Result<(), NotifyError> {
        if !recipient.starts_with('+') {
            return Err(NotifyError::InvalidRecipient {
                recipient: recipient.to_string(),
            });
        }
        println!("-- notification to {recipient} --\n{message}\n");
        Ok(())
    }
}
