//! Password reset mail adapters.

mod logging_mailer;

pub use logging_mailer::LoggingPasswordResetMailer;
