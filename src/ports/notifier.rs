//! Notifier Port - user-facing warnings outside the chat transcript.
//!
//! The dashboard surfaces these as toasts; the server surfaces them as
//! structured log events. Either way the conversation flow just says
//! "warn the user once" and moves on.

/// Port for surfacing one-off warnings to the user.
pub trait Notifier: Send + Sync {
    /// Surfaces a warning message.
    fn warn(&self, message: &str);
}
