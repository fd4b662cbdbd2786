//! SMTP campaign dispatch
//!
//! One tracked message per recipient over an authenticated STARTTLS
//! session. A successful send inserts exactly one tracking record; a
//! failed send is logged and skipped, and the batch continues. There is
//! no retry and no queueing: a failed recipient is simply absent from
//! the store.

use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{error, info};

use crate::config::{CampaignConfig, SmtpConfig};
use crate::errors::{MailBeaconError, Result};
use crate::services::composer;
use crate::storage::SeaOrmStorage;
use crate::utils::token::new_token;

pub struct MailDispatcher {
    transport: SmtpTransport,
    sender: Mailbox,
    campaign: CampaignConfig,
}

impl std::fmt::Debug for MailDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailDispatcher")
            .field("sender", &self.sender)
            .field("campaign", &self.campaign)
            .finish_non_exhaustive()
    }
}

impl MailDispatcher {
    /// Build a dispatcher from configuration
    ///
    /// Missing relay host or credentials fail here, before any send is
    /// attempted, so a misconfigured batch aborts clearly instead of
    /// failing one recipient at a time.
    pub fn from_config(smtp: &SmtpConfig, campaign: &CampaignConfig) -> Result<Self> {
        if smtp.host.is_empty() {
            return Err(MailBeaconError::mail_config(
                "smtp.host is not set (MB__SMTP__HOST)",
            ));
        }
        if smtp.username.is_empty() || smtp.password.is_empty() {
            return Err(MailBeaconError::mail_config(
                "smtp.username / smtp.password are not set (MB__SMTP__USERNAME, MB__SMTP__PASSWORD)",
            ));
        }

        let transport = SmtpTransport::starttls_relay(&smtp.host)
            .map_err(|e| {
                MailBeaconError::mail_config(format!("invalid relay host '{}': {}", smtp.host, e))
            })?
            .port(smtp.port)
            .credentials(Credentials::new(
                smtp.username.clone(),
                smtp.password.clone(),
            ))
            .build();

        let sender: Mailbox = smtp.sender().parse()?;

        Ok(Self {
            transport,
            sender,
            campaign: campaign.clone(),
        })
    }

    /// Send one tracked message; on success insert its tracking record
    ///
    /// The token is generated fresh for each send and embedded in both
    /// the pixel and the button link before delivery.
    pub async fn send_one(&self, storage: &SeaOrmStorage, recipient: &str) -> Result<()> {
        let token = new_token();
        let to: Mailbox = recipient.parse()?;

        let html = composer::html_body(
            &self.campaign.public_base_url,
            &token,
            &self.campaign.destination_url,
            &self.campaign.subject,
        );

        let message = Message::builder()
            .from(self.sender.clone())
            .to(to)
            .subject(self.campaign.subject.as_str())
            .multipart(MultiPart::alternative_plain_html(
                composer::text_body().to_string(),
                html,
            ))?;

        self.transport.send(&message)?;
        info!("Email sent successfully to {}", recipient);

        storage.insert_metric(recipient, &token).await?;
        Ok(())
    }

    /// Dispatch to every recipient sequentially
    ///
    /// Returns the number of successful sends. One recipient failing
    /// never aborts the batch.
    pub async fn send_batch(&self, storage: &SeaOrmStorage, recipients: &[String]) -> usize {
        let mut sent = 0;

        for recipient in recipients {
            match self.send_one(storage, recipient).await {
                Ok(()) => sent += 1,
                Err(e) => {
                    error!("Failed to send email to {}: {}", recipient, e);
                }
            }
        }

        info!(
            "Campaign dispatch finished: {}/{} messages sent",
            sent,
            recipients.len()
        );
        sent
    }
}
