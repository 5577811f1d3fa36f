use crate::config::MailConfig;
use crate::domain::message::RenderedMessage;
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

/// Failure surfaced by the mail transport. Terminal: deliveries are
/// never retried, and the variant detail stays server-side.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("invalid address: {0}")]
    Address(String),
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("transport error: {0}")]
    Transport(String),
}

/// The submitter the practice should reply to.
#[derive(Clone, Debug)]
pub struct ReplyTo {
    pub name: String,
    pub email: String,
}

/// Outbound email delivery.
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug {
    /// Delivers one rendered message.
    ///
    /// # Errors
    /// Returns [`DeliveryError`] on any provider failure.
    async fn send(&self, message: &RenderedMessage, reply_to: &ReplyTo) -> Result<(), DeliveryError>;

    /// Connectivity probe for readiness checks.
    ///
    /// # Errors
    /// Returns [`DeliveryError`] when the transport is unreachable.
    async fn check(&self) -> Result<(), DeliveryError> {
        Ok(())
    }
}

/// SMTP delivery via the configured relay.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpMailer {
    /// Builds the transport and parses the configured addresses.
    ///
    /// # Errors
    /// Fails when the relay URL or either mailbox is invalid.
    pub fn new(config: &MailConfig) -> anyhow::Result<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::from_url(&config.smtp_url)?;

        // Credentials are only attached over TLS connections.
        if config.smtp_url.starts_with("smtps://") {
            if let (Some(username), Some(password)) = (&config.smtp_username, &config.smtp_password) {
                builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
            }
        }

        let from: Mailbox = format!("{} Website <{}>", config.practice_name, config.from_email).parse()?;
        let to: Mailbox = config.to_email.parse()?;

        Ok(Self { transport: builder.build(), from, to })
    }
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer").field("from", &self.from).field("to", &self.to).finish_non_exhaustive()
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &RenderedMessage, reply_to: &ReplyTo) -> Result<(), DeliveryError> {
        let reply_mailbox: Mailbox = format!("{} <{}>", reply_to.name, reply_to.email)
            .parse()
            .or_else(|_| reply_to.email.parse())
            .map_err(|_| DeliveryError::Address(reply_to.email.clone()))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .reply_to(reply_mailbox)
            .subject(message.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                message.text_body.clone(),
                message.html_body.clone(),
            ))?;

        self.transport
            .send(email)
            .await
            .map(|_| ())
            .map_err(|e| DeliveryError::Transport(e.to_string()))
    }

    async fn check(&self) -> Result<(), DeliveryError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(DeliveryError::Transport("SMTP connection test failed".to_owned())),
            Err(e) => Err(DeliveryError::Transport(e.to_string())),
        }
    }
}
