//! Mailer that logs reset links instead of sending e-mail.

use async_trait::async_trait;
use tracing::info;

use crate::domain::EmailAddress;
use crate::domain::ports::{PasswordResetMailer, PasswordResetMailerError};

/// Path of the reset form relative to the public base URL.
pub const RESET_PASSWORD_PATH: &str = "/api/auth/reset-password";

/// Logs each reset link at `info`.
#[derive(Debug, Clone)]
pub struct LoggingPasswordResetMailer {
    public_base_url: String,
}

impl LoggingPasswordResetMailer {
    /// Create a mailer building links under `public_base_url`.
    pub fn new(public_base_url: impl Into<String>) -> Self {
        let public_base_url = public_base_url.into();
        Self {
            public_base_url: public_base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// The link handed to the recipient.
    #[must_use]
    pub fn reset_link(&self, token: &str) -> String {
        format!(
            "{}{RESET_PASSWORD_PATH}?token={}",
            self.public_base_url,
            encode_query_value(token)
        )
    }
}

fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

#[async_trait]
impl PasswordResetMailer for LoggingPasswordResetMailer {
    async fn send_reset_link(
        &self,
        recipient: &EmailAddress,
        token: &str,
    ) -> Result<(), PasswordResetMailerError> {
        info!(
            %recipient,
            subject = "Password reset",
            link = %self.reset_link(token),
            "password reset mail"
        );
        Ok(())
    }
}
