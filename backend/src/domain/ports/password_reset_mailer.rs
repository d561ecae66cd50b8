//! Port for delivering password reset links.
use async_trait::async_trait;

use crate::domain::EmailAddress;

use super::define_port_error;

define_port_error! {
    /// Errors raised by mail adapters.
    pub enum PasswordResetMailerError {
        /// The message could not be handed to the mail transport.
        Delivery { message: String } => "password reset mail delivery failed: {message}",
    }
}

/// Sends the reset token to the account owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordResetMailer: Send + Sync {
    /// Send a reset link carrying `token` to `recipient`.
    async fn send_reset_link(
        &self,
        recipient: &EmailAddress,
        token: &str,
    ) -> Result<(), PasswordResetMailerError>;
}
