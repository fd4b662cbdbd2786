//! Send mode
//!
//! Runs the campaign batch: one tracked message per recipient, inserting
//! a tracking record for each successful send. The batch is strictly
//! sequential and a failed recipient never aborts it.

use anyhow::Result;
use tracing::info;

use crate::config::get_config;
use crate::services::MailDispatcher;
use crate::storage::SeaOrmStorage;

/// Run the campaign dispatch
///
/// `recipients_override` replaces the configured recipient list when
/// given (the `--to` flag). SMTP settings are validated before the first
/// send so a misconfigured relay aborts the whole batch up front.
pub async fn run_send(recipients_override: Option<Vec<String>>) -> Result<()> {
    let config = get_config();

    let recipients =
        recipients_override.unwrap_or_else(|| config.campaign.recipients.clone());
    if recipients.is_empty() {
        anyhow::bail!("No recipients: set [campaign].recipients in config.toml or pass --to");
    }

    let dispatcher = MailDispatcher::from_config(&config.smtp, &config.campaign)?;
    let storage = SeaOrmStorage::from_url(&config.database.database_url).await?;

    info!("Dispatching campaign to {} recipients", recipients.len());
    dispatcher.send_batch(&storage, &recipients).await;

    Ok(())
}
