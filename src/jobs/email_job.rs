//! Email background job.
//!
//! Outbound mail (verification links, password-reset links) is enqueued
//! by the services and drained by the `worker` command. In development
//! mode (no SMTP configured) emails are logged instead of sent.

use serde::{Deserialize, Serialize};
use std::env;

use crate::errors::AppError;

/// Email job payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailJob {
    /// Recipient email address
    pub to: String,
    /// Email subject line
    pub subject: String,
    /// Email body content (plain text)
    pub body: String,
}

impl EmailJob {
    /// Build the email-verification message for a fresh account.
    pub fn email_verification(to: impl Into<String>, verify_url: &str) -> Self {
        Self {
            to: to.into(),
            subject: "Verify your email address".to_string(),
            body: format!(
                "Welcome!\n\n\
                 Confirm your email address by opening the link below:\n\n\
                 {}\n\n\
                 If you did not create an account, you can ignore this message.",
                verify_url
            ),
        }
    }

    /// Build the password-reset message.
    pub fn password_reset(to: impl Into<String>, reset_url: &str) -> Self {
        Self {
            to: to.into(),
            subject: "Reset your password".to_string(),
            body: format!(
                "A password reset was requested for your account.\n\n\
                 Open the link below to choose a new password:\n\n\
                 {}\n\n\
                 The link expires in one hour. If you did not request a reset,\n\
                 you can ignore this message.",
                reset_url
            ),
        }
    }
}

/// Email configuration from environment.
struct EmailConfig {
    smtp_host: Option<String>,
    smtp_from: String,
}

impl EmailConfig {
    fn from_env() -> Self {
        Self {
            smtp_host: env::var("SMTP_HOST").ok(),
            smtp_from: env::var("SMTP_FROM").unwrap_or_else(|_| "noreply@example.com".to_string()),
        }
    }

    fn is_configured(&self) -> bool {
        self.smtp_host.is_some()
    }
}

/// Email job handler - processes email sending jobs
pub async fn email_job_handler(job: EmailJob) -> Result<(), AppError> {
    let config = EmailConfig::from_env();

    tracing::info!(
        to = %job.to,
        from = %config.smtp_from,
        subject = %job.subject,
        "Processing email job"
    );

    if !config.is_configured() {
        // Development mode: log the email instead of sending
        tracing::warn!("SMTP not configured - logging email instead of sending");
        tracing::info!(
            "=== EMAIL (not sent) ===\n\
             From: {}\n\
             To: {}\n\
             Subject: {}\n\
             Body:\n{}\n\
             ========================",
            config.smtp_from,
            job.to,
            job.subject,
            job.body
        );
        return Ok(());
    }

    // TODO: wire lettre for real SMTP delivery once a relay is provisioned
    tracing::warn!(
        "SMTP is configured but no transport is wired; email to {} was not sent",
        job.to
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_mail_carries_the_link() {
        let job = EmailJob::password_reset("user@example.com", "https://app/reset?token=abc");
        assert_eq!(job.to, "user@example.com");
        assert!(job.body.contains("https://app/reset?token=abc"));
    }

    #[test]
    fn verification_mail_carries_the_link() {
        let job = EmailJob::email_verification("user@example.com", "https://app/verify?token=abc");
        assert!(job.body.contains("https://app/verify?token=abc"));
    }
}
